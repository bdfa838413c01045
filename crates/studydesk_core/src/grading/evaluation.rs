//! Weighted average and academic status for one subject.
//!
//! # Invariants
//! - The average is computed over the graded subset only (present, non-NaN
//!   scores) and rounded to two decimals, half away from zero.
//! - A zero weight sum yields an average of `0.0`, not an error.
//! - Status depends on every assessment having a score, not on the graded
//!   subset: any `None` slot keeps the subject `InProgress`. A NaN score
//!   fills its slot even though the average skips it.
//! - Scores and weights are trusted as given; nothing is clamped.

use crate::model::subject::Subject;
use serde::{Deserialize, Serialize};

/// Minimum rounded average for `Status::Passed`.
pub const PASSING_AVERAGE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Passed,
    Failed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// `None` when no assessment is graded yet.
    pub average: Option<f64>,
    pub status: Status,
}

/// Evaluates one subject.
pub fn evaluate(subject: &Subject) -> Evaluation {
    let graded = subject
        .assessments
        .iter()
        .filter_map(|a| a.graded_score().map(|score| (score, a.weight)))
        .collect::<Vec<_>>();

    if graded.is_empty() {
        return Evaluation {
            average: None,
            status: Status::InProgress,
        };
    }

    let weight_sum: f64 = graded.iter().map(|(_, weight)| weight).sum();
    let weighted_total: f64 = graded.iter().map(|(score, weight)| score * weight).sum();
    let average = if weight_sum == 0.0 {
        0.0
    } else {
        round_to_hundredths(weighted_total / weight_sum)
    };

    let fully_graded = subject
        .assessments
        .iter()
        .all(|a| a.score.is_some());
    let status = if !fully_graded {
        Status::InProgress
    } else if average >= PASSING_AVERAGE {
        Status::Passed
    } else {
        Status::Failed
    };

    Evaluation {
        average: Some(average),
        status,
    }
}

/// Rounds to two decimals, ties away from zero.
///
/// This is `f64::round` applied to `value * 100.0`. The multiplication itself
/// rounds, so results at decimal ties depend on it: `2.675` gives `2.68`
/// while `1.005` gives `1.0`.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
