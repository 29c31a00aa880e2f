//! Core data model types for echograde.
//!
//! Exercises, exercise sets, and the answer sheets learners hand in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the learner produces a response to an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// The learner reads the text aloud; the response is a transcript.
    ReadAloud,
    /// The learner hears the text and writes it down.
    Dictation,
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseKind::ReadAloud => write!(f, "read_aloud"),
            ExerciseKind::Dictation => write!(f, "dictation"),
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read_aloud" | "read-aloud" | "speech" | "speaking" => Ok(ExerciseKind::ReadAloud),
            "dictation" | "listening" => Ok(ExerciseKind::Dictation),
            other => Err(format!("unknown exercise kind: {other}")),
        }
    }
}

/// A single exercise: the reference text a learner must reproduce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier within its set.
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Read-aloud or dictation.
    pub kind: ExerciseKind,
    /// The reference text.
    pub text: String,
    /// Tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A collection of exercises taken together as one test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Kind used by exercises that don't specify one.
    #[serde(default = "default_kind")]
    pub default_kind: ExerciseKind,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl ExerciseSet {
    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

fn default_kind() -> ExerciseKind {
    ExerciseKind::ReadAloud
}

/// One learner response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub exercise_id: String,
    /// The transcript or typed text. `None` when the learner gave no answer.
    #[serde(default)]
    pub response: Option<String>,
}

/// All of one learner's answers to an exercise set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSheet {
    /// Who submitted the answers, if the sheet says.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl AnswerSheet {
    /// The submitting student, or `"anonymous"` when the sheet names nobody.
    pub fn student_name(&self) -> &str {
        self.student.as_deref().unwrap_or(ANONYMOUS_STUDENT)
    }
}

/// Name recorded for answer sheets that carry no student.
pub const ANONYMOUS_STUDENT: &str = "anonymous";
