//! Error types for the scoring boundary and session grading.
//!
//! The scoring pipeline itself cannot fail. These errors cover the places
//! where untyped input enters the crate and where an answer sheet does not
//! fit the exercise set it is graded against.

use thiserror::Error;

/// Rejected input at the JSON scoring boundary or in a stored score.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// A text field held something other than a string or null.
    #[error("{field} must be a string or null, got {found}")]
    NotAString { field: &'static str, found: &'static str },

    /// A stored score was larger than 100.
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(u8),
}

/// Errors raised while grading an answer sheet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradingError {
    /// The answer sheet references an exercise the set does not contain.
    #[error("answer references unknown exercise: {0}")]
    UnknownExercise(String),

    /// The answer sheet holds more than one answer for the same exercise.
    #[error("duplicate answer for exercise: {0}")]
    DuplicateAnswer(String),
}
