//! Class agenda use-cases: per-day listing, editing and day exports.
//!
//! # Invariants
//! - Sessions are validated before any write.
//! - Day listings keep stored order.
//! - Exports produce text/rows only; turning them into files is the
//!   caller's job.

use crate::medium::KeyValueMedium;
use crate::model::class_session::ClassSession;
use crate::service::{ServiceError, ServiceResult};
use crate::store::DomainStore;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;
use uuid::Uuid;

const DAY_SUMMARY_RULE: &str = "--------------------------";
const INSTRUCTOR_PLACEHOLDER: &str = "Instructor TBD";
const EMPTY_CELL: &str = "-";

/// Header row for `day_rows`.
pub const DAY_ROWS_HEADER: [&str; 5] = ["Subject", "Start", "End", "Instructor", "Room"];

/// Input for adding a session on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClassSession {
    pub calendar_date: NaiveDate,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Blank values are stored as absent.
    pub room: Option<String>,
    /// Blank values are stored as absent.
    pub instructor: Option<String>,
}

pub struct AgendaService<'s, M: KeyValueMedium> {
    store: &'s DomainStore<M>,
}

impl<'s, M: KeyValueMedium> AgendaService<'s, M> {
    pub fn new(store: &'s DomainStore<M>) -> Self {
        Self { store }
    }

    pub fn sessions_on(&self, date: NaiveDate) -> Vec<ClassSession> {
        self.store
            .class_sessions()
            .into_iter()
            .filter(|session| session.calendar_date == date)
            .collect()
    }

    /// Distinct dates that have at least one session, ascending.
    pub fn highlighted_dates(&self) -> Vec<NaiveDate> {
        self.store
            .class_sessions()
            .into_iter()
            .map(|session| session.calendar_date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Appends a new session with a generated id.
    pub fn add_session(&self, request: NewClassSession) -> ServiceResult<ClassSession> {
        let session = ClassSession {
            id: Uuid::new_v4(),
            calendar_date: request.calendar_date,
            name: request.name.trim().to_string(),
            start_time: request.start_time.trim().to_string(),
            end_time: request.end_time.trim().to_string(),
            room: non_blank(request.room),
            instructor: non_blank(request.instructor),
        };
        session.validate()?;

        let mut sessions = self.store.class_sessions();
        sessions.push(session.clone());
        self.store.replace_class_sessions(&sessions)?;
        info!(
            "event=session_add module=service status=ok session_id={} date={}",
            session.id, session.calendar_date
        );
        Ok(session)
    }

    /// Replaces the stored session carrying the same id.
    ///
    /// Fields are trimmed the same way `add_session` trims them.
    pub fn update_session(&self, session: ClassSession) -> ServiceResult<()> {
        let session = ClassSession {
            name: session.name.trim().to_string(),
            start_time: session.start_time.trim().to_string(),
            end_time: session.end_time.trim().to_string(),
            room: non_blank(session.room),
            instructor: non_blank(session.instructor),
            ..session
        };
        session.validate()?;

        let mut sessions = self.store.class_sessions();
        let slot = sessions
            .iter_mut()
            .find(|existing| existing.id == session.id)
            .ok_or(ServiceError::ClassSessionNotFound(session.id))?;
        let session_id = session.id;
        *slot = session;
        self.store.replace_class_sessions(&sessions)?;
        info!("event=session_update module=service status=ok session_id={session_id}");
        Ok(())
    }

    /// Plain-text agenda for one day.
    ///
    /// # Errors
    /// - `ServiceError::EmptyDay` when the day has no sessions.
    pub fn day_summary(&self, date: NaiveDate) -> ServiceResult<String> {
        let sessions = self.non_empty_day(date)?;
        let mut lines = vec![
            format!("Classes on {}", date.format("%A, %B %-d")),
            DAY_SUMMARY_RULE.to_string(),
        ];
        lines.extend(sessions.iter().map(|session| {
            format!(
                "{} - {} to {} ({})",
                session.name,
                session.start_time,
                session.end_time,
                session.instructor.as_deref().unwrap_or(INSTRUCTOR_PLACEHOLDER)
            )
        }));
        Ok(lines.join("\n"))
    }

    /// Table for CSV export: header row then one row per session.
    ///
    /// # Errors
    /// - `ServiceError::EmptyDay` when the day has no sessions.
    pub fn day_rows(&self, date: NaiveDate) -> ServiceResult<Vec<Vec<String>>> {
        let sessions = self.non_empty_day(date)?;
        let header = DAY_ROWS_HEADER.iter().map(|h| h.to_string()).collect();
        let mut rows: Vec<Vec<String>> = vec![header];
        rows.extend(sessions.into_iter().map(|session| {
            vec![
                session.name,
                session.start_time,
                session.end_time,
                session.instructor.unwrap_or_else(|| EMPTY_CELL.to_string()),
                session.room.unwrap_or_else(|| EMPTY_CELL.to_string()),
            ]
        }));
        Ok(rows)
    }

    fn non_empty_day(&self, date: NaiveDate) -> ServiceResult<Vec<ClassSession>> {
        let sessions = self.sessions_on(date);
        if sessions.is_empty() {
            return Err(ServiceError::EmptyDay(date));
        }
        Ok(sessions)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
