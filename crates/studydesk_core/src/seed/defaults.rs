//! Canonical default datasets written on first run.

use crate::model::class_session::ClassSession;
use crate::model::subject::{Assessment, AssessmentId, Subject};
use crate::model::transport::{Shift, TransportSchedule, Weekday};
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;
use uuid::Uuid;

const DEFAULT_INSTRUCTOR: &str = "Prof. Maria Clara";

const DEFAULT_SUBJECTS: &[(&str, &str)] = &[
    ("calc1", "Calculus I"),
    ("linalg", "Linear Algebra"),
    ("paradigms", "Programming Paradigms"),
    ("db2", "Databases II"),
    ("hci", "Human-Computer Interaction"),
    ("softeng", "Software Engineering"),
];

/// (day offset from today, name, start, end, room)
const DEFAULT_SESSIONS: &[(u64, &str, &str, &str, &str)] = &[
    (0, "Databases II", "08:20", "10:00", "Lab 3"),
    (0, "Human-Computer Interaction", "10:20", "12:00", "Room 204"),
    (1, "Programming Paradigms", "09:00", "10:40", "Room 305"),
    (3, "Calculus I", "07:30", "09:10", "Auditorium 1"),
    (4, "Linear Algebra", "11:00", "12:40", "Room 102"),
];

/// Standard four-slot assessment list, all unscored.
pub fn standard_assessments() -> Vec<Assessment> {
    vec![
        Assessment::new(AssessmentId::FirstExam, "Exam 1", 2.0),
        Assessment::new(AssessmentId::SecondExam, "Exam 2", 2.0),
        Assessment::new(AssessmentId::AppliedWorkI, "Applied Work I", 1.0),
        Assessment::new(AssessmentId::AppliedWorkII, "Applied Work II", 1.0),
    ]
}

pub fn default_subjects() -> Vec<Subject> {
    DEFAULT_SUBJECTS
        .iter()
        .map(|(id, name)| Subject::new(*id, *name, standard_assessments()))
        .collect()
}

/// Every weekday × shift pair with three sample lines.
///
/// Departure hours shift by one per shift index, starting at 6.
pub fn default_transport_schedules() -> Vec<TransportSchedule> {
    Weekday::ALL
        .into_iter()
        .flat_map(|weekday| {
            Shift::ALL
                .into_iter()
                .enumerate()
                .map(move |(index, shift)| {
                    let lines = vec![
                        format!("{}:30 - Line Downtown → Campus", 6 + index),
                        format!("{}:15 - Line District A → Campus", 7 + index),
                        format!("{}:05 - Line Terminal → Downtown", 8 + index),
                    ];
                    TransportSchedule::new(weekday, shift, lines)
                })
        })
        .collect()
}

fn default_session_id(today: NaiveDate, index: usize) -> Uuid {
    let name = format!("studydesk.class_session.{today}.{index}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

pub fn default_favorite_days() -> BTreeSet<Weekday> {
    BTreeSet::from([Weekday::Monday, Weekday::Wednesday])
}

/// Sample sessions spread over the days following `today`.
///
/// Ids derive from `today` and the entry position, so repeated calls for the
/// same day yield the same sessions.
pub fn default_class_sessions(today: NaiveDate) -> Vec<ClassSession> {
    DEFAULT_SESSIONS
        .iter()
        .enumerate()
        .map(|(index, (offset, name, start, end, room))| ClassSession {
            id: default_session_id(today, index),
            calendar_date: today.checked_add_days(Days::new(*offset)).unwrap_or(today),
            name: (*name).to_string(),
            start_time: (*start).to_string(),
            end_time: (*end).to_string(),
            room: Some((*room).to_string()),
            instructor: Some(DEFAULT_INSTRUCTOR.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        default_class_sessions, default_subjects, default_transport_schedules,
    };
    use crate::model::transport::{Shift, Weekday};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn transport_defaults_cover_each_pair_once() {
        let schedules = default_transport_schedules();
        let pairs: HashSet<(Weekday, Shift)> =
            schedules.iter().map(|s| (s.weekday, s.shift)).collect();
        assert_eq!(schedules.len(), 21);
        assert_eq!(pairs.len(), 21);

        let evening = schedules
            .iter()
            .find(|s| s.is_for(Weekday::Friday, Shift::Evening))
            .expect("friday evening present");
        assert_eq!(evening.lines[0], "8:30 - Line Downtown → Campus");
    }

    #[test]
    fn default_subjects_are_unscored_with_standard_weights() {
        let subjects = default_subjects();
        assert_eq!(subjects.len(), 6);
        for subject in &subjects {
            let weights: Vec<f64> = subject.assessments.iter().map(|a| a.weight).collect();
            assert_eq!(weights, vec![2.0, 2.0, 1.0, 1.0]);
            assert!(subject.assessments.iter().all(|a| a.score.is_none()));
        }
    }

    #[test]
    fn default_sessions_are_valid_and_anchored_at_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let sessions = default_class_sessions(today);
        assert_eq!(sessions.len(), 5);
        assert_eq!(
            sessions.iter().filter(|s| s.calendar_date == today).count(),
            2
        );
        assert_eq!(
            sessions[4].calendar_date,
            NaiveDate::from_ymd_opt(2026, 10, 21).expect("valid date")
        );
        for session in &sessions {
            session.validate().expect("default sessions must be valid");
        }
    }

    #[test]
    fn default_session_ids_are_stable_and_distinct() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let ids = |day| {
            default_class_sessions(day)
                .into_iter()
                .map(|s| s.id)
                .collect::<Vec<_>>()
        };
        let first = ids(today);
        assert_eq!(first, ids(today));
        assert_eq!(first.iter().collect::<HashSet<_>>().len(), first.len());

        let tomorrow = today.succ_opt().expect("valid date");
        assert_ne!(first, ids(tomorrow));
    }
}
