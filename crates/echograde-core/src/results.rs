//! Per-question grading results.

use serde::{Deserialize, Serialize};

use crate::model::ExerciseKind;
use crate::scoring::ScoreResult;
use crate::statistics::SessionSummary;

/// The graded outcome of one exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub exercise_id: String,
    pub kind: ExerciseKind,
    /// The reference text the response was scored against.
    pub reference: String,
    /// The learner's response, if any.
    pub response: Option<String>,
    pub result: ScoreResult,
}

impl QuestionResult {
    /// Whether this question counts as correct in the test's accuracy.
    pub fn is_correct(&self) -> bool {
        self.result.passed
    }

    pub fn is_answered(&self) -> bool {
        self.response.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

/// All question results for one answer sheet plus their aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedSession {
    pub student: String,
    pub questions: Vec<QuestionResult>,
    pub summary: SessionSummary,
}
