//! TOML exercise set and answer sheet parser.
//!
//! Loads exercise sets from TOML files and directories, loads answer sheets,
//! and validates exercise sets.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Answer, AnswerSheet, Exercise, ExerciseKind, ExerciseSet};
use crate::normalize::normalize;

/// Intermediate TOML structure for parsing exercise set files.
#[derive(Debug, Deserialize)]
struct TomlExerciseFile {
    exercise_set: TomlExerciseSetHeader,
    #[serde(default)]
    exercises: Vec<TomlExercise>,
}

#[derive(Debug, Deserialize)]
struct TomlExerciseSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_kind_str")]
    default_kind: String,
}

fn default_kind_str() -> String {
    "read_aloud".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlExercise {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    kind: Option<String>,
    text: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    student: Option<String>,
    #[serde(default)]
    answers: Vec<TomlAnswer>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswer {
    exercise: String,
    #[serde(default)]
    response: Option<String>,
}

/// Parse a single TOML file into an `ExerciseSet`.
pub fn parse_exercise_set(path: &Path) -> Result<ExerciseSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise set file: {}", path.display()))?;

    parse_exercise_set_str(&content, path)
}

/// Parse a TOML string into an `ExerciseSet`.
pub fn parse_exercise_set_str(content: &str, source_path: &Path) -> Result<ExerciseSet> {
    let parsed: TomlExerciseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_kind: ExerciseKind = parsed
        .exercise_set
        .default_kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let exercises = parsed
        .exercises
        .into_iter()
        .map(|e| {
            let kind = e
                .kind
                .map(|k| k.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
                .transpose()?
                .unwrap_or(default_kind);

            Ok(Exercise {
                id: e.id,
                title: e.title,
                kind,
                text: e.text,
                tags: e.tags,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ExerciseSet {
        id: parsed.exercise_set.id,
        name: parsed.exercise_set.name,
        description: parsed.exercise_set.description,
        default_kind,
        exercises,
    })
}

/// Load a single exercise set file, or every set under a directory.
pub fn load_exercise_sets(path: &Path) -> Result<Vec<ExerciseSet>> {
    if path.is_dir() {
        load_exercise_directory(path)
    } else {
        Ok(vec![parse_exercise_set(path)?])
    }
}

/// Recursively load all `.toml` exercise set files from a directory.
pub fn load_exercise_directory(dir: &Path) -> Result<Vec<ExerciseSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_exercise_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exercise_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load an answer sheet from a `.toml` or `.json` file.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answer sheet JSON: {}", path.display()))
    } else {
        parse_answer_sheet_str(&content, path)
    }
}

/// Parse a TOML answer sheet.
pub fn parse_answer_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(AnswerSheet {
        student: parsed.student,
        answers: parsed
            .answers
            .into_iter()
            .map(|a| Answer {
                exercise_id: a.exercise,
                response: a.response,
            })
            .collect(),
    })
}

/// A warning from exercise set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise ID (if applicable).
    pub exercise_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an exercise set for common issues.
pub fn validate_exercise_set(set: &ExerciseSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.exercises.is_empty() {
        warnings.push(ValidationWarning {
            exercise_id: None,
            message: "exercise set has no exercises".into(),
        });
    }

    let mut seen_ids = std::collections::HashSet::new();
    for exercise in &set.exercises {
        if !seen_ids.insert(&exercise.id) {
            warnings.push(ValidationWarning {
                exercise_id: Some(exercise.id.clone()),
                message: format!("duplicate exercise ID: {}", exercise.id),
            });
        }
    }

    // Text with no scoreable words always grades as zero
    for exercise in &set.exercises {
        if exercise.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                exercise_id: Some(exercise.id.clone()),
                message: "text is empty".into(),
            });
        } else if normalize(&exercise.text).is_empty() {
            warnings.push(ValidationWarning {
                exercise_id: Some(exercise.id.clone()),
                message: "text contains no words after normalization".into(),
            });
        }
    }

    warnings
}
