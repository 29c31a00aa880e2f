//! Aggregate statistics over graded questions.
//!
//! The overall test score is the mean of the per-question scores; accuracy is
//! the share of questions that passed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{classify, PerformanceBand};
use crate::model::ExerciseKind;
use crate::results::QuestionResult;
use crate::scorer::Score;

/// Aggregate outcome of a graded test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Number of exercises graded.
    pub question_count: usize,
    /// Questions with a non-blank response.
    pub answered_count: usize,
    /// Questions whose score reached the pass threshold.
    pub correct_count: usize,
    /// Rounded mean of the per-question scores.
    pub overall_score: Score,
    /// Percentage of correct questions, rounded.
    pub accuracy: u8,
    /// Band of the overall score.
    pub band: PerformanceBand,
    /// Whether the overall score passes.
    pub passed: bool,
    /// How many questions landed in each band.
    pub band_counts: BTreeMap<PerformanceBand, usize>,
    /// Mean score per exercise kind.
    pub per_kind: BTreeMap<String, Score>,
}

/// Summarize a list of question results.
pub fn summarize(questions: &[QuestionResult]) -> SessionSummary {
    let question_count = questions.len();
    let answered_count = questions.iter().filter(|q| q.is_answered()).count();
    let correct_count = questions.iter().filter(|q| q.is_correct()).count();

    let overall_score = mean_score(questions.iter().map(|q| q.result.score));
    let accuracy = percentage(correct_count, question_count);
    let classification = classify(overall_score);

    let mut band_counts = BTreeMap::new();
    for q in questions {
        *band_counts.entry(q.result.band).or_insert(0) += 1;
    }

    let mut per_kind = BTreeMap::new();
    for kind in [ExerciseKind::ReadAloud, ExerciseKind::Dictation] {
        let scores: Vec<Score> = questions
            .iter()
            .filter(|q| q.kind == kind)
            .map(|q| q.result.score)
            .collect();
        if !scores.is_empty() {
            per_kind.insert(kind.to_string(), mean_score(scores.into_iter()));
        }
    }

    SessionSummary {
        question_count,
        answered_count,
        correct_count,
        overall_score,
        accuracy,
        band: classification.band,
        passed: classification.passed,
        band_counts,
        per_kind,
    }
}

/// Rounded mean of scores; zero for no scores.
pub fn mean_score(scores: impl Iterator<Item = Score>) -> Score {
    let (sum, n) = scores.fold((0u64, 0u64), |(sum, n), s| (sum + u64::from(s.value()), n + 1));
    if n == 0 {
        return Score::MIN;
    }
    Score::from_raw(sum as f64 / n as f64)
}

fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round().min(100.0) as u8
}
