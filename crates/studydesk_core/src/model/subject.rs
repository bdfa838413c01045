//! Subjects and their weighted assessments.
//!
//! # Invariants
//! - A subject's assessment list has fixed cardinality; only scores and
//!   weights change after seeding.
//! - `weight` is expected to be non-negative; `score` is expected within
//!   `[0, 10]` but is never clamped here.

use serde::{Deserialize, Serialize};

/// Fixed set of assessment slots every subject can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssessmentId {
    #[serde(rename = "E1")]
    FirstExam,
    #[serde(rename = "E2")]
    SecondExam,
    #[serde(rename = "AW1")]
    AppliedWorkI,
    #[serde(rename = "AW2")]
    AppliedWorkII,
}

impl AssessmentId {
    pub const ALL: [AssessmentId; 4] = [
        Self::FirstExam,
        Self::SecondExam,
        Self::AppliedWorkI,
        Self::AppliedWorkII,
    ];

    /// Short code used in persisted data and reports.
    pub fn code(self) -> &'static str {
        match self {
            Self::FirstExam => "E1",
            Self::SecondExam => "E2",
            Self::AppliedWorkI => "AW1",
            Self::AppliedWorkII => "AW2",
        }
    }

    /// Parses a short code (`E1|E2|AW1|AW2`), case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|id| id.code() == normalized.as_str())
    }
}

/// One weighted, optionally scored component of a subject's grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub description: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Assessment {
    pub fn new(id: AssessmentId, description: impl Into<String>, weight: f64) -> Self {
        Self {
            id,
            description: description.into(),
            weight,
            score: None,
        }
    }

    /// Score usable in the weighted average: present and not NaN.
    pub fn graded_score(&self) -> Option<f64> {
        self.score.filter(|score| !score.is_nan())
    }
}

/// Academic course with its assessment slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Stable slug such as `calc1`.
    pub id: String,
    pub name: String,
    pub assessments: Vec<Assessment>,
}

impl Subject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        assessments: Vec<Assessment>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            assessments,
        }
    }

    pub fn assessment(&self, id: AssessmentId) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.id == id)
    }

    pub fn assessment_mut(&mut self, id: AssessmentId) -> Option<&mut Assessment> {
        self.assessments.iter_mut().find(|a| a.id == id)
    }
}
