//! Grade reports with JSON persistence and attempt-to-attempt comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ExerciseSet;
use crate::results::{GradedSession, QuestionResult};
use crate::statistics::SessionSummary;

/// A complete graded attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the exercise set.
    pub exercise_set: ExerciseSetSummary,
    /// Who took the test.
    pub student: String,
    /// Per-question results.
    pub questions: Vec<QuestionResult>,
    /// Aggregate outcome.
    pub summary: SessionSummary,
}

/// Summary of an exercise set (without the exercise texts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSetSummary {
    pub id: String,
    pub name: String,
    pub exercise_count: usize,
}

impl GradeReport {
    /// Build a report for a freshly graded session.
    pub fn new(set: &ExerciseSet, session: GradedSession) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            exercise_set: ExerciseSetSummary {
                id: set.id.clone(),
                name: set.name.clone(),
                exercise_count: set.exercises.len(),
            },
            student: session.student,
            questions: session.questions,
            summary: session.summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this attempt against an earlier one.
    ///
    /// A score change larger than `threshold` points in either direction is a
    /// regression or an improvement; anything smaller counts as unchanged.
    pub fn compare(&self, baseline: &GradeReport, threshold: u8) -> ProgressReport {
        let score_map = |report: &GradeReport| -> HashMap<String, u8> {
            report
                .questions
                .iter()
                .map(|q| (q.exercise_id.clone(), q.result.score.value()))
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_exercises = 0usize;

        for question in &self.questions {
            let id = &question.exercise_id;
            let current = question.result.score.value();
            let Some(&baseline_score) = baseline_scores.get(id) else {
                new_exercises += 1;
                continue;
            };

            let change = ScoreChange {
                exercise_id: id.clone(),
                baseline_score,
                current_score: current,
                delta: i16::from(current) - i16::from(baseline_score),
            };
            if change.delta < -i16::from(threshold) {
                regressions.push(change);
            } else if change.delta > i16::from(threshold) {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_exercises = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        ProgressReport {
            baseline_overall: baseline.summary.overall_score.value(),
            current_overall: self.summary.overall_score.value(),
            regressions,
            improvements,
            unchanged,
            new_exercises,
            removed_exercises,
        }
    }
}

/// Result of comparing two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_overall: u8,
    pub current_overall: u8,
    /// Exercises where the score went down.
    pub regressions: Vec<ScoreChange>,
    /// Exercises where the score went up.
    pub improvements: Vec<ScoreChange>,
    /// Exercises with no significant change.
    pub unchanged: usize,
    /// Exercises in current but not baseline.
    pub new_exercises: usize,
    /// Exercises in baseline but not current.
    pub removed_exercises: usize,
}

/// A per-exercise score change between attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub exercise_id: String,
    pub baseline_score: u8,
    pub current_score: u8,
    pub delta: i16,
}

impl ProgressReport {
    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Overall:** {} -> {} ({:+})\n\n",
            self.baseline_overall,
            self.current_overall,
            i16::from(self.current_overall) - i16::from(self.baseline_overall)
        ));
        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Exercise | Baseline | Current | Delta |\n");
            md.push_str("|----------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {} | {} | {:+} |\n",
                    c.exercise_id, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
