//! Class session (one scheduled lecture on a calendar day).
//!
//! # Invariants
//! - `start_time`/`end_time` use zero-padded 24h `HH:MM`.
//! - `end_time` is not earlier than `start_time`.
//! - Many sessions may share one `calendar_date`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock time regex"));

pub type ClassSessionId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: ClassSessionId,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub calendar_date: NaiveDate,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

impl ClassSession {
    /// Checks name and time-window invariants.
    pub fn validate(&self) -> Result<(), ClassSessionValidationError> {
        if self.name.trim().is_empty() {
            return Err(ClassSessionValidationError::EmptyName);
        }
        for value in [&self.start_time, &self.end_time] {
            if !is_clock_time(value) {
                return Err(ClassSessionValidationError::InvalidClockTime(value.clone()));
            }
        }
        // Zero-padded HH:MM compares correctly as text.
        if self.end_time < self.start_time {
            return Err(ClassSessionValidationError::EndBeforeStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }
        Ok(())
    }
}

/// Returns whether `value` is a zero-padded 24h `HH:MM` string.
pub fn is_clock_time(value: &str) -> bool {
    CLOCK_TIME_RE.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSessionValidationError {
    EmptyName,
    InvalidClockTime(String),
    EndBeforeStart { start: String, end: String },
}

impl Display for ClassSessionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "class session name must not be empty"),
            Self::InvalidClockTime(value) => {
                write!(f, "invalid clock time `{value}`; expected HH:MM")
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "end_time {end} is earlier than start_time {start}")
            }
        }
    }
}

impl Error for ClassSessionValidationError {}

#[cfg(test)]
mod tests {
    use super::{is_clock_time, ClassSession, ClassSessionValidationError};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn session(start: &str, end: &str) -> ClassSession {
        ClassSession {
            id: Uuid::new_v4(),
            calendar_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
            name: "Calculus I".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: None,
            instructor: None,
        }
    }

    #[test]
    fn clock_time_requires_zero_padded_24h() {
        assert!(is_clock_time("08:20"));
        assert!(is_clock_time("23:59"));
        assert!(!is_clock_time("8:20"));
        assert!(!is_clock_time("24:00"));
        assert!(!is_clock_time("12:60"));
    }

    #[test]
    fn validate_rejects_reversed_window() {
        let err = session("10:00", "09:00")
            .validate()
            .expect_err("reversed window must fail");
        assert_eq!(
            err,
            ClassSessionValidationError::EndBeforeStart {
                start: "10:00".to_string(),
                end: "09:00".to_string(),
            }
        );
    }

    #[test]
    fn serializes_date_as_iso_and_skips_absent_optionals() {
        let json = serde_json::to_value(session("08:00", "09:40")).expect("serialize");
        assert_eq!(json["calendarDate"], "2026-03-02");
        assert_eq!(json["startTime"], "08:00");
        assert!(json.get("room").is_none());
    }
}
