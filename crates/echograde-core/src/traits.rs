//! Speech capability traits.
//!
//! Recognition and synthesis are provided by the host application. The
//! scoring engine only ever sees the text they produce.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Speech recognition
// ---------------------------------------------------------------------------

/// Trait for speech-to-text backends used by read-aloud exercises.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Transcribe a recording.
    async fn recognize(&self, recording: &Recording) -> anyhow::Result<Transcript>;
}

/// Captured learner audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Encoded audio bytes.
    pub audio: Vec<u8>,
    /// MIME type of `audio` (e.g. "audio/wav").
    pub mime_type: String,
    /// Recording language tag (e.g. "en-US").
    #[serde(default = "default_language")]
    pub language: String,
}

/// Text recognized from a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Recognizer confidence in `0.0..=1.0`, when the backend reports one.
    #[serde(default)]
    pub confidence: Option<f64>,
}

// ---------------------------------------------------------------------------
// Speech synthesis
// ---------------------------------------------------------------------------

/// Trait for text-to-speech backends used to play dictation prompts.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Render text as playable audio.
    async fn synthesize(&self, request: &SynthesisRequest) -> anyhow::Result<Playback>;
}

/// Request to speak a text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Speaking rate multiplier; 1.0 is normal speed.
    #[serde(default = "default_rate")]
    pub rate: f64,
}

/// Synthesized audio ready for playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playback {
    pub audio: Vec<u8>,
    pub mime_type: String,
    pub duration_ms: u64,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_rate() -> f64 {
    1.0
}
