//! The answer-fidelity scoring entry points.
//!
//! Every caller scores responses through this module: normalize both texts,
//! match tokens, score the counts, and classify the score.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{classify, PerformanceBand};
use crate::error::InputError;
use crate::matcher::match_tokens;
use crate::normalize::normalize_opt;
use crate::scorer::{Score, ScoreBreakdown};

/// Outcome of scoring one response against its reference text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: Score,
    pub band: PerformanceBand,
    /// Whether the response counts as correct.
    pub passed: bool,
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub reference_token_count: usize,
    pub candidate_token_count: usize,
}

/// Score a candidate response against a reference text.
pub fn score_response(reference: &str, candidate: &str) -> ScoreResult {
    score_response_opt(Some(reference), Some(candidate))
}

/// Score with possibly-absent texts; a missing text counts as empty.
pub fn score_response_opt(reference: Option<&str>, candidate: Option<&str>) -> ScoreResult {
    explain_response_opt(reference, candidate).0
}

/// Score a response and also return the intermediate score values.
pub fn explain_response(reference: &str, candidate: &str) -> (ScoreResult, ScoreBreakdown) {
    explain_response_opt(Some(reference), Some(candidate))
}

fn explain_response_opt(
    reference: Option<&str>,
    candidate: Option<&str>,
) -> (ScoreResult, ScoreBreakdown) {
    let reference_tokens = normalize_opt(reference);
    let candidate_tokens = normalize_opt(candidate);
    let tally = match_tokens(&reference_tokens, &candidate_tokens);

    let breakdown = ScoreBreakdown::compute(
        tally.reference_token_count,
        candidate_tokens.len(),
        tally.exact_matches,
        tally.partial_matches,
    );
    let classification = classify(breakdown.score);

    tracing::debug!(
        reference_tokens = tally.reference_token_count,
        candidate_tokens = candidate_tokens.len(),
        exact = tally.exact_matches,
        partial = tally.partial_matches,
        score = breakdown.score.value(),
        "scored response"
    );

    let result = ScoreResult {
        score: breakdown.score,
        band: classification.band,
        passed: classification.passed,
        exact_matches: tally.exact_matches,
        partial_matches: tally.partial_matches,
        reference_token_count: tally.reference_token_count,
        candidate_token_count: candidate_tokens.len(),
    };
    (result, breakdown)
}

/// Score untyped JSON inputs.
///
/// Strings are scored as-is and `null` counts as an empty text. Any other
/// JSON type is rejected.
pub fn score_json(reference: &Value, candidate: &Value) -> Result<ScoreResult, InputError> {
    let reference = json_text("reference", reference)?;
    let candidate = json_text("candidate", candidate)?;
    Ok(score_response_opt(reference, candidate))
}

fn json_text<'a>(field: &'static str, value: &'a Value) -> Result<Option<&'a str>, InputError> {
    match value {
        Value::String(s) => Ok(Some(s.as_str())),
        Value::Null => Ok(None),
        other => Err(InputError::NotAString {
            field,
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
