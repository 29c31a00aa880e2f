//! The `echograde validate` command.

use std::path::PathBuf;

use anyhow::Result;

use echograde_core::parser;

pub fn execute(exercises_path: PathBuf) -> Result<()> {
    let sets = parser::load_exercise_sets(&exercises_path)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no exercise sets found in {}",
        exercises_path.display()
    );

    let mut total_warnings = 0;

    for set in &sets {
        println!("Exercise set: {} ({} exercises)", set.name, set.exercises.len());

        let warnings = parser::validate_exercise_set(set);
        for w in &warnings {
            let prefix = w
                .exercise_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All exercise sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
