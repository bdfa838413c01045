//! Typed collection accessors over a `KeyValueMedium`.
//!
//! # Responsibility
//! - Persist the five domain collections and the current-user singleton as
//!   JSON values under fixed, distinct keys.
//! - Offer get-all / replace-all only; there is no partial-update primitive.
//!
//! # Invariants
//! - Reads never fail: absent, unreadable or malformed values yield the
//!   caller's fallback and malformed values are logged.
//! - A store without a medium reads every key as absent and treats writes as
//!   successful no-ops.
//! - A failed read of one key never affects reads of other keys.

use crate::medium::{KeyValueMedium, MediumError};
use crate::model::class_session::ClassSession;
use crate::model::subject::Subject;
use crate::model::transport::{TransportSchedule, Weekday};
use crate::model::user::User;
use crate::seed::defaults;
use chrono::Local;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key of the current-user singleton entry.
pub const CURRENT_USER_KEY: &str = "studydesk.current_user";

/// Independently persisted domain collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Subjects,
    ClassSessions,
    TransportSchedules,
    FavoriteDays,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Self::Users,
        Self::Subjects,
        Self::ClassSessions,
        Self::TransportSchedules,
        Self::FavoriteDays,
    ];

    /// Medium key holding this collection.
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => "studydesk.users",
            Self::Subjects => "studydesk.subjects",
            Self::ClassSessions => "studydesk.class_sessions",
            Self::TransportSchedules => "studydesk.transport_schedules",
            Self::FavoriteDays => "studydesk.favorite_days",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Subjects => "subjects",
            Self::ClassSessions => "class_sessions",
            Self::TransportSchedules => "transport_schedules",
            Self::FavoriteDays => "favorite_days",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Write-side failure of a present medium.
#[derive(Debug)]
pub enum StoreError {
    Medium(MediumError),
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Medium(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Medium(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<MediumError> for StoreError {
    fn from(value: MediumError) -> Self {
        Self::Medium(value)
    }
}

/// Domain store over an optional medium.
pub struct DomainStore<M: KeyValueMedium> {
    medium: Option<M>,
}

impl<M: KeyValueMedium> DomainStore<M> {
    pub fn new(medium: M) -> Self {
        Self {
            medium: Some(medium),
        }
    }

    /// Store for contexts without persistent storage.
    pub fn detached() -> Self {
        Self { medium: None }
    }

    pub fn is_available(&self) -> bool {
        self.medium.is_some()
    }

    /// Raw key presence for `collection`, regardless of whether the value parses.
    ///
    /// Returns `Ok(false)` without a medium.
    pub fn key_present(&self, collection: Collection) -> StoreResult<bool> {
        match &self.medium {
            Some(medium) => Ok(medium.contains(collection.key())?),
            None => Ok(false),
        }
    }

    pub fn users_or(&self, fallback: Vec<User>) -> Vec<User> {
        self.read_value(Collection::Users.key(), || fallback)
    }

    pub fn users(&self) -> Vec<User> {
        self.read_value(Collection::Users.key(), Vec::new)
    }

    pub fn replace_users(&self, users: &[User]) -> StoreResult<()> {
        self.write_value(Collection::Users.key(), users)
    }

    pub fn subjects_or(&self, fallback: Vec<Subject>) -> Vec<Subject> {
        self.read_value(Collection::Subjects.key(), || fallback)
    }

    /// Subjects, falling back to the canonical default catalogue.
    pub fn subjects(&self) -> Vec<Subject> {
        self.read_value(Collection::Subjects.key(), defaults::default_subjects)
    }

    pub fn replace_subjects(&self, subjects: &[Subject]) -> StoreResult<()> {
        self.write_value(Collection::Subjects.key(), subjects)
    }

    pub fn class_sessions_or(&self, fallback: Vec<ClassSession>) -> Vec<ClassSession> {
        self.read_value(Collection::ClassSessions.key(), || fallback)
    }

    /// Class sessions, falling back to default sessions around today.
    pub fn class_sessions(&self) -> Vec<ClassSession> {
        self.read_value(Collection::ClassSessions.key(), || {
            defaults::default_class_sessions(Local::now().date_naive())
        })
    }

    pub fn replace_class_sessions(&self, sessions: &[ClassSession]) -> StoreResult<()> {
        self.write_value(Collection::ClassSessions.key(), sessions)
    }

    pub fn transport_schedules_or(&self, fallback: Vec<TransportSchedule>) -> Vec<TransportSchedule> {
        self.read_value(Collection::TransportSchedules.key(), || fallback)
    }

    pub fn transport_schedules(&self) -> Vec<TransportSchedule> {
        self.read_value(
            Collection::TransportSchedules.key(),
            defaults::default_transport_schedules,
        )
    }

    pub fn replace_transport_schedules(&self, schedules: &[TransportSchedule]) -> StoreResult<()> {
        self.write_value(Collection::TransportSchedules.key(), schedules)
    }

    pub fn favorite_days_or(&self, fallback: BTreeSet<Weekday>) -> BTreeSet<Weekday> {
        self.read_value(Collection::FavoriteDays.key(), || fallback)
    }

    pub fn favorite_days(&self) -> BTreeSet<Weekday> {
        self.read_value(
            Collection::FavoriteDays.key(),
            defaults::default_favorite_days,
        )
    }

    pub fn replace_favorite_days(&self, days: &BTreeSet<Weekday>) -> StoreResult<()> {
        self.write_value(Collection::FavoriteDays.key(), days)
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_value(CURRENT_USER_KEY, || None)
    }

    /// Persists the signed-in user; `None` removes the entry.
    pub fn set_current_user(&self, user: Option<&User>) -> StoreResult<()> {
        match user {
            Some(user) => self.write_value(CURRENT_USER_KEY, user),
            None => {
                if let Some(medium) = &self.medium {
                    medium.remove(CURRENT_USER_KEY)?;
                    debug!("event=store_write module=store status=ok key={CURRENT_USER_KEY} op=remove");
                }
                Ok(())
            }
        }
    }

    fn read_value<T: DeserializeOwned>(&self, key: &'static str, fallback: impl FnOnce() -> T) -> T {
        let Some(medium) = &self.medium else {
            return fallback();
        };

        let raw = match medium.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback(),
            Err(err) => {
                error!(
                    "event=store_read module=store status=fallback key={key} error_code=medium_read_failed error={err}"
                );
                return fallback();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=store_read module=store status=fallback key={key} error_code=malformed_value bytes={} error={err}",
                    raw.len()
                );
                fallback()
            }
        }
    }

    fn write_value<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> StoreResult<()> {
        let Some(medium) = &self.medium else {
            debug!("event=store_write module=store status=skipped key={key} reason=medium_absent");
            return Ok(());
        };

        let encoded =
            serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        medium.write(key, &encoded)?;
        debug!(
            "event=store_write module=store status=ok key={key} bytes={}",
            encoded.len()
        );
        Ok(())
    }
}
