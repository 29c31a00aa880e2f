//! The `echograde grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use echograde_core::config::load_config_from;
use echograde_core::engine::{grade_session, unanswered};
use echograde_core::model::ExerciseSet;
use echograde_core::parser;
use echograde_core::report::GradeReport;

pub fn execute(
    exercises_path: PathBuf,
    answers_path: PathBuf,
    set_id: Option<String>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = format.unwrap_or_else(|| config.default_format.clone());
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format: {format} (expected text or json)"
    );

    let sets = parser::load_exercise_sets(&exercises_path)?;
    let set = select_set(sets, set_id.as_deref())?;

    let mut sheet = parser::parse_answer_sheet(&answers_path)?;
    if sheet.student.is_none() {
        sheet.student = Some(config.student.clone());
    }

    let missing = unanswered(&set, &sheet);
    if !missing.is_empty() {
        tracing::warn!("unanswered exercises scored as 0: {}", missing.join(", "));
    }

    let session = grade_session(&set, &sheet)
        .with_context(|| format!("failed to grade {}", answers_path.display()))?;
    let report = GradeReport::new(&set, session);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    let output_dir = output.unwrap_or(config.output_dir);
    let report_path = output_dir.join(format!("{}-{}.json", report.exercise_set.id, report.id));
    report.save_json(&report_path)?;
    eprintln!("Report saved to {}", report_path.display());

    Ok(())
}

fn select_set(sets: Vec<ExerciseSet>, set_id: Option<&str>) -> Result<ExerciseSet> {
    match set_id {
        Some(id) => sets
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("exercise set not found: {id}")),
        None => {
            let mut sets = sets;
            match sets.len() {
                0 => anyhow::bail!("no exercise sets found"),
                1 => Ok(sets.remove(0)),
                n => anyhow::bail!("{n} exercise sets found; choose one with --set"),
            }
        }
    }
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Exercise", "Kind", "Score", "Band", "Exact", "Partial", "Result"]);

    for q in &report.questions {
        table.add_row(vec![
            Cell::new(&q.exercise_id),
            Cell::new(q.kind),
            Cell::new(q.result.score),
            Cell::new(q.result.band),
            Cell::new(format!(
                "{}/{}",
                q.result.exact_matches, q.result.reference_token_count
            )),
            Cell::new(q.result.partial_matches),
            Cell::new(if q.is_correct() { "correct" } else { "incorrect" }),
        ]);
    }

    let summary = &report.summary;
    println!(
        "{} :: {} ({} exercises)",
        report.student, report.exercise_set.name, report.exercise_set.exercise_count
    );
    println!("{table}");
    println!(
        "Overall: {} ({}) {}",
        summary.overall_score,
        summary.band,
        if summary.passed { "PASS" } else { "FAIL" }
    );
    println!(
        "Accuracy: {}% ({}/{} correct, {} answered)",
        summary.accuracy, summary.correct_count, summary.question_count, summary.answered_count
    );
    println!("{}", summary.band.feedback());
}
