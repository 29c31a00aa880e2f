//! The `echograde score` command.

use anyhow::Result;
use serde::Serialize;

use echograde_core::scorer::ScoreBreakdown;
use echograde_core::scoring::{explain_response, ScoreResult};

#[derive(Serialize)]
struct ScoreOutput<'a> {
    #[serde(flatten)]
    result: &'a ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a ScoreBreakdown>,
}

pub fn execute(reference: String, candidate: String, explain: bool, format: String) -> Result<()> {
    let (result, breakdown) = explain_response(&reference, &candidate);

    match format.as_str() {
        "json" => {
            let output = ScoreOutput {
                result: &result,
                breakdown: explain.then_some(&breakdown),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "text" => {
            println!(
                "Score: {} ({}) {}",
                result.score,
                result.band,
                if result.passed { "PASS" } else { "FAIL" }
            );
            println!(
                "Matches: {} exact, {} partial of {} words",
                result.exact_matches, result.partial_matches, result.reference_token_count
            );
            println!("{}", result.band.feedback());

            if explain {
                println!("\nBreakdown:");
                println!("  exact score:   {:.1}", breakdown.exact_score);
                println!("  partial score: {:.1}", breakdown.partial_score);
                println!(
                    "  length ratio:  {:.2} ({} / {} words)",
                    breakdown.length_ratio,
                    result.candidate_token_count,
                    result.reference_token_count
                );
                println!("  length factor: {:.1}", breakdown.length_factor);
                println!("  raw:           {:.2}", breakdown.raw);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
