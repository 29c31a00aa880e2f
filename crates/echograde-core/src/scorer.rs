//! Fidelity score computation from match counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Weight of an exact match, in score points when every token matches.
pub const EXACT_WEIGHT: f64 = 100.0;

/// Weight of a partial match. Partial matches never earn full credit.
pub const PARTIAL_WEIGHT: f64 = 30.0;

/// Multiplier applied when the response length is far from the reference.
pub const LENGTH_PENALTY: f64 = 0.8;

/// Candidate/reference length ratios outside this range are penalized.
pub const MIN_LENGTH_RATIO: f64 = 0.5;
pub const MAX_LENGTH_RATIO: f64 = 1.5;

/// An integer fidelity score in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Build a score, clamping anything above 100.
    pub fn new(value: u8) -> Self {
        Score(value.min(100))
    }

    /// Round and clamp a raw floating-point score into `0..=100`.
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return Score::MIN;
        }
        Score(raw.round().clamp(0.0, 100.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl TryFrom<u8> for Score {
    type Error = InputError;

    /// Accept a stored score, rejecting anything above 100.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Score::MAX.0 {
            return Err(InputError::ScoreOutOfRange(value));
        }
        Ok(Score(value))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every intermediate value of a score computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Share of exact matches, scaled to [`EXACT_WEIGHT`].
    pub exact_score: f64,
    /// Share of partial matches, scaled to [`PARTIAL_WEIGHT`].
    pub partial_score: f64,
    /// Candidate token count divided by reference token count.
    pub length_ratio: f64,
    /// 1.0, or [`LENGTH_PENALTY`] when the length ratio is out of range.
    pub length_factor: f64,
    /// Weighted score before rounding and clamping.
    pub raw: f64,
    /// The final score.
    pub score: Score,
}

impl ScoreBreakdown {
    /// Breakdown for an input that scores zero without computation.
    fn zero() -> Self {
        Self {
            exact_score: 0.0,
            partial_score: 0.0,
            length_ratio: 0.0,
            length_factor: 1.0,
            raw: 0.0,
            score: Score::MIN,
        }
    }

    /// Compute the score for `reference_count` reference tokens,
    /// `candidate_count` candidate tokens, and the given match counts.
    pub fn compute(
        reference_count: usize,
        candidate_count: usize,
        exact_matches: usize,
        partial_matches: usize,
    ) -> Self {
        if reference_count == 0 || candidate_count == 0 {
            return Self::zero();
        }

        let r = reference_count as f64;
        let exact_score = exact_matches as f64 / r * EXACT_WEIGHT;
        let partial_score = partial_matches as f64 / r * PARTIAL_WEIGHT;
        let length_ratio = candidate_count as f64 / r;
        let length_factor = length_factor(length_ratio);
        let raw = (exact_score + partial_score) * length_factor;

        Self {
            exact_score,
            partial_score,
            length_ratio,
            length_factor,
            raw,
            score: Score::from_raw(raw),
        }
    }
}

/// Penalty multiplier for a candidate/reference length ratio.
pub fn length_factor(length_ratio: f64) -> f64 {
    if length_ratio > MAX_LENGTH_RATIO || length_ratio < MIN_LENGTH_RATIO {
        LENGTH_PENALTY
    } else {
        1.0
    }
}

/// Compute the fidelity score from token and match counts.
///
/// Returns 0 when either the reference or the candidate has no tokens.
pub fn score(
    reference_count: usize,
    candidate_count: usize,
    exact_matches: usize,
    partial_matches: usize,
) -> Score {
    ScoreBreakdown::compute(reference_count, candidate_count, exact_matches, partial_matches).score
}
