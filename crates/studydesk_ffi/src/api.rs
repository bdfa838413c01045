//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose sync, use-case-level functions over the core services.
//! - Translate core errors into response envelopes with readable messages.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - When the database cannot be opened, calls run against a detached store:
//!   reads return defaults and writes are not persisted.
//! - Structured payloads are JSON strings using the persisted field names.

use chrono::NaiveDate;
use log::warn;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::OnceLock;
use studydesk_core::db::{open_db, resolve_db_path};
use studydesk_core::{
    core_version as core_version_inner, ensure_seeded, init_logging as init_logging_inner,
    AccountService, AgendaService, AssessmentId, ClassSession, DomainStore, GradeService,
    NewClassSession, Shift, SqliteMedium, TransportService, User, Weekday,
};
use uuid::Uuid;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

const NOT_PERSISTED_SUFFIX: &str = " Storage unavailable; change not persisted.";

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Outcome of a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Result of evaluating one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResponse {
    pub ok: bool,
    /// Rounded to two decimals; `None` while nothing is graded.
    pub average: Option<f64>,
    /// `in_progress|passed|failed`; empty on failure.
    pub status: String,
    pub message: String,
}

/// Result of an account call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountResponse {
    pub ok: bool,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub message: String,
}

impl AccountResponse {
    fn signed_in(user: &User, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            user_id: Some(user.id.to_string()),
            email: Some(user.email.clone()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            user_id: None,
            email: None,
            message: message.into(),
        }
    }
}

/// Seeds missing collections. Call once at app start before any read.
#[flutter_rust_bridge::frb(sync)]
pub fn store_bootstrap() -> ActionResponse {
    with_store(|store| match ensure_seeded(store) {
        Ok(report) => ActionResponse::success(with_persist_note(
            store,
            format!("Seeded {} collection(s).", report.seeded.len()),
        )),
        Err(err) => ActionResponse::failure(format!("store_bootstrap failed: {err}")),
    })
}

/// All subjects as a JSON array.
#[flutter_rust_bridge::frb(sync)]
pub fn grades_subjects_json() -> String {
    with_store(|store| to_json(&GradeService::new(store).subjects()))
}

/// Sets (`Some`) or clears (`None`) one assessment score.
#[flutter_rust_bridge::frb(sync)]
pub fn grades_set_score(
    subject_id: String,
    assessment_id: String,
    score: Option<f64>,
) -> ActionResponse {
    let Some(assessment_id) = AssessmentId::parse(&assessment_id) else {
        return ActionResponse::failure(format!("unknown assessment id `{assessment_id}`"));
    };
    with_store(|store| {
        match GradeService::new(store).set_score(subject_id.trim(), assessment_id, score) {
            Ok(_) => ActionResponse::success(with_persist_note(store, "Score saved.")),
            Err(err) => ActionResponse::failure(format!("grades_set_score failed: {err}")),
        }
    })
}

/// Sets one assessment weight; invalid or negative values are stored as `0`.
#[flutter_rust_bridge::frb(sync)]
pub fn grades_set_weight(subject_id: String, assessment_id: String, weight: f64) -> ActionResponse {
    let Some(assessment_id) = AssessmentId::parse(&assessment_id) else {
        return ActionResponse::failure(format!("unknown assessment id `{assessment_id}`"));
    };
    with_store(|store| {
        match GradeService::new(store).set_weight(subject_id.trim(), assessment_id, weight) {
            Ok(_) => ActionResponse::success(with_persist_note(store, "Weight saved.")),
            Err(err) => ActionResponse::failure(format!("grades_set_weight failed: {err}")),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn grades_evaluate(subject_id: String) -> EvaluationResponse {
    with_store(
        |store| match GradeService::new(store).evaluate_subject(subject_id.trim()) {
            Ok(evaluation) => EvaluationResponse {
                ok: true,
                average: evaluation.average,
                status: status_code(evaluation.status).to_string(),
                message: evaluation.status.label().to_string(),
            },
            Err(err) => EvaluationResponse {
                ok: false,
                average: None,
                status: String::new(),
                message: format!("grades_evaluate failed: {err}"),
            },
        },
    )
}

/// Academic report text for download.
#[flutter_rust_bridge::frb(sync)]
pub fn grades_report() -> String {
    with_store(|store| GradeService::new(store).report())
}

/// Sessions on `date_iso` (`YYYY-MM-DD`) as a JSON array; `[]` for bad dates.
#[flutter_rust_bridge::frb(sync)]
pub fn agenda_day_json(date_iso: String) -> String {
    let Ok(date) = parse_date(&date_iso) else {
        return "[]".to_string();
    };
    with_store(|store| to_json(&AgendaService::new(store).sessions_on(date)))
}

/// Distinct dates with sessions, as ISO strings.
#[flutter_rust_bridge::frb(sync)]
pub fn agenda_highlighted_dates() -> Vec<String> {
    with_store(|store| {
        AgendaService::new(store)
            .highlighted_dates()
            .into_iter()
            .map(|date| date.to_string())
            .collect()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn agenda_add_session(
    date_iso: String,
    name: String,
    start_time: String,
    end_time: String,
    room: Option<String>,
    instructor: Option<String>,
) -> ActionResponse {
    let calendar_date = match parse_date(&date_iso) {
        Ok(date) => date,
        Err(message) => return ActionResponse::failure(message),
    };
    let request = NewClassSession {
        calendar_date,
        name,
        start_time,
        end_time,
        room,
        instructor,
    };
    with_store(|store| match AgendaService::new(store).add_session(request) {
        Ok(_) => ActionResponse::success(with_persist_note(store, "Class added.")),
        Err(err) => ActionResponse::failure(format!("agenda_add_session failed: {err}")),
    })
}

/// Replaces the session with id `session_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn agenda_update_session(
    session_id: String,
    date_iso: String,
    name: String,
    start_time: String,
    end_time: String,
    room: Option<String>,
    instructor: Option<String>,
) -> ActionResponse {
    let id = match Uuid::parse_str(session_id.trim()) {
        Ok(id) => id,
        Err(err) => {
            return ActionResponse::failure(format!("invalid session id `{session_id}`: {err}"))
        }
    };
    let calendar_date = match parse_date(&date_iso) {
        Ok(date) => date,
        Err(message) => return ActionResponse::failure(message),
    };
    let session = ClassSession {
        id,
        calendar_date,
        name,
        start_time,
        end_time,
        room,
        instructor,
    };
    with_store(|store| match AgendaService::new(store).update_session(session) {
        Ok(()) => ActionResponse::success(with_persist_note(store, "Class updated.")),
        Err(err) => ActionResponse::failure(format!("agenda_update_session failed: {err}")),
    })
}

/// Day table for CSV export: header row then one row per session.
/// Empty when the day has no sessions or the date is invalid.
#[flutter_rust_bridge::frb(sync)]
pub fn agenda_day_rows(date_iso: String) -> Vec<Vec<String>> {
    let Ok(date) = parse_date(&date_iso) else {
        return Vec::new();
    };
    with_store(|store| AgendaService::new(store).day_rows(date).unwrap_or_default())
}

/// Day agenda text for download; empty string when the day has no sessions.
#[flutter_rust_bridge::frb(sync)]
pub fn agenda_day_summary(date_iso: String) -> String {
    let Ok(date) = parse_date(&date_iso) else {
        return String::new();
    };
    with_store(|store| {
        AgendaService::new(store)
            .day_summary(date)
            .unwrap_or_default()
    })
}

/// Lines for one weekday/shift; empty for unknown codes.
#[flutter_rust_bridge::frb(sync)]
pub fn transport_lines(weekday: String, shift: String) -> Vec<String> {
    let (Some(weekday), Some(shift)) = (Weekday::parse(&weekday), Shift::parse(&shift)) else {
        return Vec::new();
    };
    with_store(|store| TransportService::new(store).lines_for(weekday, shift))
}

/// Saves newline-separated lines for one weekday/shift.
#[flutter_rust_bridge::frb(sync)]
pub fn transport_save_lines(weekday: String, shift: String, text: String) -> ActionResponse {
    let (weekday, shift) = match parse_slot(&weekday, &shift) {
        Ok(slot) => slot,
        Err(message) => return ActionResponse::failure(message),
    };
    with_store(
        |store| match TransportService::new(store).save_lines(weekday, shift, &text) {
            Ok(lines) => ActionResponse::success(with_persist_note(
                store,
                format!("Saved {} line(s).", lines.len()),
            )),
            Err(err) => ActionResponse::failure(format!("transport_save_lines failed: {err}")),
        },
    )
}

/// Timetable text for download; empty for unknown codes.
#[flutter_rust_bridge::frb(sync)]
pub fn transport_schedule_text(weekday: String, shift: String) -> String {
    let Ok((weekday, shift)) = parse_slot(&weekday, &shift) else {
        return String::new();
    };
    with_store(|store| TransportService::new(store).schedule_text(weekday, shift))
}

/// Favorite weekday codes in week order.
#[flutter_rust_bridge::frb(sync)]
pub fn transport_favorite_days() -> Vec<String> {
    with_store(|store| {
        TransportService::new(store)
            .favorite_days()
            .into_iter()
            .map(|day| day.as_str().to_string())
            .collect()
    })
}

/// Flips the favorite flag; message is `favorite` or `not_favorite`.
#[flutter_rust_bridge::frb(sync)]
pub fn transport_toggle_favorite(weekday: String) -> ActionResponse {
    let Some(day) = Weekday::parse(&weekday) else {
        return ActionResponse::failure(format!("unknown weekday `{weekday}`"));
    };
    with_store(|store| match TransportService::new(store).toggle_favorite(day) {
        Ok(true) => ActionResponse::success("favorite"),
        Ok(false) => ActionResponse::success("not_favorite"),
        Err(err) => ActionResponse::failure(format!("transport_toggle_favorite failed: {err}")),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn account_register(email: String, secret: String) -> AccountResponse {
    with_store(
        |store| match AccountService::new(store).register(email.trim(), &secret) {
            Ok(user) => AccountResponse::signed_in(&user, "Account created."),
            Err(err) => AccountResponse::failure(err.to_string()),
        },
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn account_login(email: String, secret: String) -> AccountResponse {
    with_store(
        |store| match AccountService::new(store).login(email.trim(), &secret) {
            Ok(user) => AccountResponse::signed_in(&user, "Signed in."),
            Err(err) => AccountResponse::failure(err.to_string()),
        },
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn account_logout() -> ActionResponse {
    with_store(|store| match AccountService::new(store).logout() {
        Ok(()) => ActionResponse::success("Signed out."),
        Err(err) => ActionResponse::failure(format!("account_logout failed: {err}")),
    })
}

/// Signed-in user, if any; `ok=false` when nobody is signed in.
#[flutter_rust_bridge::frb(sync)]
pub fn account_current() -> AccountResponse {
    with_store(|store| match AccountService::new(store).current_user() {
        Some(user) => AccountResponse::signed_in(&user, "Signed in."),
        None => AccountResponse::failure("Not signed in."),
    })
}

fn resolve_store_db_path() -> PathBuf {
    DB_PATH.get_or_init(resolve_db_path).clone()
}

fn with_store<T>(f: impl FnOnce(&DomainStore<SqliteMedium<'_>>) -> T) -> T {
    let db_path = resolve_store_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=ffi_store module=ffi status=degraded error_code=db_open_failed error={err}");
            return f(&DomainStore::detached());
        }
    };
    match SqliteMedium::try_new(&conn) {
        Ok(medium) => f(&DomainStore::new(medium)),
        Err(err) => {
            warn!("event=ffi_store module=ffi status=degraded error_code=medium_unusable error={err}");
            f(&DomainStore::detached())
        }
    }
}

fn with_persist_note(store: &DomainStore<SqliteMedium<'_>>, message: impl Into<String>) -> String {
    let mut message = message.into();
    if !store.is_available() {
        message.push_str(NOT_PERSISTED_SUFFIX);
    }
    message
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        warn!("event=ffi_encode module=ffi status=error error={err}");
        "[]".to_string()
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}`; expected YYYY-MM-DD: {err}"))
}

fn parse_slot(weekday: &str, shift: &str) -> Result<(Weekday, Shift), String> {
    let weekday = Weekday::parse(weekday).ok_or_else(|| format!("unknown weekday `{weekday}`"))?;
    let shift = Shift::parse(shift).ok_or_else(|| format!("unknown shift `{shift}`"))?;
    Ok((weekday, shift))
}

fn status_code(status: studydesk_core::Status) -> &'static str {
    match status {
        studydesk_core::Status::InProgress => "in_progress",
        studydesk_core::Status::Passed => "passed",
        studydesk_core::Status::Failed => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        account_current, account_login, account_logout, account_register, agenda_add_session,
        agenda_day_json, agenda_day_rows, agenda_update_session, core_version, grades_evaluate, grades_report, grades_set_score,
        init_logging, store_bootstrap, transport_lines, transport_save_lines,
        transport_toggle_favorite,
    };
    use std::sync::Once;
    use std::time::{SystemTime, UNIX_EPOCH};

    static BOOTSTRAP: Once = Once::new();

    fn bootstrap() {
        BOOTSTRAP.call_once(|| {
            let response = store_bootstrap();
            assert!(response.ok, "{}", response.message);
        });
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn grades_round_trip_through_database() {
        bootstrap();
        for id in ["E1", "E2", "AW1", "AW2"] {
            let response = grades_set_score("softeng".to_string(), id.to_string(), Some(8.0));
            assert!(response.ok, "{}", response.message);
        }

        let evaluation = grades_evaluate("softeng".to_string());
        assert!(evaluation.ok, "{}", evaluation.message);
        assert_eq!(evaluation.average, Some(8.0));
        assert_eq!(evaluation.status, "passed");
        assert!(grades_report().contains("Subject: Software Engineering\n"));
    }

    #[test]
    fn grades_reject_unknown_ids() {
        bootstrap();
        assert!(!grades_set_score("softeng".to_string(), "P9".to_string(), Some(1.0)).ok);
        assert!(!grades_evaluate("missing-subject".to_string()).ok);
    }

    #[test]
    fn transport_save_and_toggle() {
        bootstrap();
        let token = unique_token("line");
        let saved = transport_save_lines(
            "sunday".to_string(),
            "evening".to_string(),
            format!("{token}\n\n"),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(
            transport_lines("sunday".to_string(), "evening".to_string()),
            vec![token]
        );

        let first = transport_toggle_favorite("saturday".to_string());
        let second = transport_toggle_favorite("saturday".to_string());
        assert!(first.ok && second.ok);
        assert_ne!(first.message, second.message);

        assert!(!transport_save_lines("someday".to_string(), "evening".to_string(), String::new()).ok);
    }

    #[test]
    fn agenda_add_then_list_day() {
        bootstrap();
        let name = unique_token("Seminar");
        let added = agenda_add_session(
            "2030-01-15".to_string(),
            name.clone(),
            "13:00".to_string(),
            "14:30".to_string(),
            None,
            Some("Prof. Lima".to_string()),
        );
        assert!(added.ok, "{}", added.message);
        assert!(agenda_day_json("2030-01-15".to_string()).contains(&name));

        let bad = agenda_add_session(
            "15/01/2030".to_string(),
            "x".to_string(),
            "13:00".to_string(),
            "14:30".to_string(),
            None,
            None,
        );
        assert!(!bad.ok);
    }

    #[test]
    fn agenda_update_then_export_rows() {
        bootstrap();
        let date = "2030-02-20";
        let name = unique_token("Workshop");
        let added = agenda_add_session(
            date.to_string(),
            name.clone(),
            "09:00".to_string(),
            "10:00".to_string(),
            None,
            None,
        );
        assert!(added.ok, "{}", added.message);

        let sessions: Vec<serde_json::Value> =
            serde_json::from_str(&agenda_day_json(date.to_string())).expect("day json");
        let session_id = sessions
            .iter()
            .find(|session| session["name"] == name.as_str())
            .and_then(|session| session["id"].as_str())
            .expect("added session listed")
            .to_string();

        let renamed = format!("{name} (moved)");
        let updated = agenda_update_session(
            session_id.clone(),
            date.to_string(),
            renamed.clone(),
            "09:30".to_string(),
            "11:00".to_string(),
            Some("Lab 2".to_string()),
            None,
        );
        assert!(updated.ok, "{}", updated.message);

        let rows = agenda_day_rows(date.to_string());
        assert_eq!(rows[0], vec!["Subject", "Start", "End", "Instructor", "Room"]);
        assert!(rows.contains(&vec![
            renamed,
            "09:30".to_string(),
            "11:00".to_string(),
            "-".to_string(),
            "Lab 2".to_string(),
        ]));

        let bad_window = agenda_update_session(
            session_id,
            date.to_string(),
            name.clone(),
            "12:00".to_string(),
            "11:00".to_string(),
            None,
            None,
        );
        assert!(!bad_window.ok);
        assert!(!agenda_update_session(
            "not-a-uuid".to_string(),
            date.to_string(),
            name,
            "09:00".to_string(),
            "10:00".to_string(),
            None,
            None,
        )
        .ok);
        assert!(agenda_day_rows("2031-13-40".to_string()).is_empty());
    }

    #[test]
    fn account_flow_over_database() {
        bootstrap();
        let email = format!("{}@campus.edu", unique_token("user"));

        let registered = account_register(email.clone(), "pw".to_string());
        assert!(registered.ok, "{}", registered.message);
        assert!(!account_register(email.clone(), "pw".to_string()).ok);

        let logged_in = account_login(email.clone(), "pw".to_string());
        assert!(logged_in.ok, "{}", logged_in.message);
        assert_eq!(logged_in.user_id, registered.user_id);
        assert!(!account_login(email, "nope".to_string()).ok);

        assert!(account_logout().ok);
        assert!(!account_current().ok);
    }
}
