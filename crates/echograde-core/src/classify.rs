//! Performance bands and the pass/fail rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scorer::Score;

/// Minimum score for a question to count as correct.
pub const PASS_THRESHOLD: u8 = 70;

/// Qualitative label derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    NeedsImprovement,
    Satisfactory,
    Good,
    VeryGood,
    Excellent,
}

impl PerformanceBand {
    /// All bands, best first.
    pub const ALL: [PerformanceBand; 5] = [
        PerformanceBand::Excellent,
        PerformanceBand::VeryGood,
        PerformanceBand::Good,
        PerformanceBand::Satisfactory,
        PerformanceBand::NeedsImprovement,
    ];

    /// Lowest score that falls in this band.
    pub fn min_score(self) -> u8 {
        match self {
            PerformanceBand::Excellent => 90,
            PerformanceBand::VeryGood => 80,
            PerformanceBand::Good => 70,
            PerformanceBand::Satisfactory => 60,
            PerformanceBand::NeedsImprovement => 0,
        }
    }

    pub fn from_score(score: Score) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| score.value() >= band.min_score())
            .unwrap_or(PerformanceBand::NeedsImprovement)
    }

    /// Short learner-facing feedback for this band.
    pub fn feedback(self) -> &'static str {
        match self {
            PerformanceBand::Excellent => {
                "Excellent! Your answer matches the text almost perfectly."
            }
            PerformanceBand::VeryGood => "Very good! Only a few words were off.",
            PerformanceBand::Good => "Good job. Some words were missed or unclear.",
            PerformanceBand::Satisfactory => {
                "Satisfactory. Listen again and pay attention to the missed words."
            }
            PerformanceBand::NeedsImprovement => {
                "Needs improvement. Try again slowly, word by word."
            }
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceBand::Excellent => write!(f, "excellent"),
            PerformanceBand::VeryGood => write!(f, "very_good"),
            PerformanceBand::Good => write!(f, "good"),
            PerformanceBand::Satisfactory => write!(f, "satisfactory"),
            PerformanceBand::NeedsImprovement => write!(f, "needs_improvement"),
        }
    }
}

impl FromStr for PerformanceBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "excellent" => Ok(PerformanceBand::Excellent),
            "very_good" | "verygood" => Ok(PerformanceBand::VeryGood),
            "good" => Ok(PerformanceBand::Good),
            "satisfactory" => Ok(PerformanceBand::Satisfactory),
            "needs_improvement" | "needsimprovement" => Ok(PerformanceBand::NeedsImprovement),
            other => Err(format!("unknown performance band: {other}")),
        }
    }
}

/// Band and pass flag for one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub band: PerformanceBand,
    pub passed: bool,
}

/// Classify a score into its band and pass/fail outcome.
pub fn classify(score: Score) -> Classification {
    Classification {
        band: PerformanceBand::from_score(score),
        passed: score.value() >= PASS_THRESHOLD,
    }
}
