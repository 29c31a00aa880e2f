//! Text normalization into word tokens.
//!
//! Both the reference text and the learner's response go through the same
//! normalization before matching, so casing and punctuation never affect a
//! score.

use serde::{Deserialize, Serialize};

/// A normalized word and its position in the source sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Lower-cased word with punctuation stripped. Never empty.
    pub text: String,
    /// Zero-based index of the token within its sequence.
    pub position: usize,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Normalize raw text into a sequence of word tokens.
///
/// Lower-cases the input, removes everything that is not a letter, digit, or
/// whitespace, then splits on whitespace runs. Never fails; empty or
/// whitespace-only input yields an empty sequence.
pub fn normalize(text: &str) -> Vec<Token> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(position, piece)| Token {
            text: piece.to_string(),
            position,
        })
        .collect()
}

/// Like [`normalize`], but treats a missing text as empty.
pub fn normalize_opt(text: Option<&str>) -> Vec<Token> {
    text.map(normalize).unwrap_or_default()
}

/// Join tokens back into a single-space separated string.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
