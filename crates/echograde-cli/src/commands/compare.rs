//! The `echograde compare` command.

use std::path::PathBuf;

use anyhow::Result;

use echograde_core::report::GradeReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: u8,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = GradeReport::load_json(&baseline_path)?;
    let current = GradeReport::load_json(&current_path)?;

    if baseline.exercise_set.id != current.exercise_set.id {
        tracing::warn!(
            "comparing different exercise sets: {} vs {}",
            baseline.exercise_set.id,
            current.exercise_set.id
        );
    }

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Overall: {} -> {} ({:+})",
                report.baseline_overall,
                report.current_overall,
                i16::from(report.current_overall) - i16::from(report.baseline_overall)
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {} -> {} ({:+})",
                        r.exercise_id, r.baseline_score, r.current_score, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {} -> {} ({:+})",
                        i.exercise_id, i.baseline_score, i.current_score, i.delta
                    );
                }
            }

            if report.new_exercises > 0 {
                println!("\n{} new exercise(s)", report.new_exercises);
            }
            if report.removed_exercises > 0 {
                println!("{} removed exercise(s)", report.removed_exercises);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
