//! Durable key/string storage the domain store is built on.
//!
//! # Responsibility
//! - Define the injectable `KeyValueMedium` contract.
//! - Provide an in-process map medium and a SQLite-backed medium.
//!
//! # Invariants
//! - Values are opaque strings; the medium never interprets them.
//! - Every successful `write`/`remove` is durable before returning.
//! - Operations are synchronous and never suspend.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryMedium;
pub use sqlite::SqliteMedium;

pub type MediumResult<T> = Result<T, MediumError>;

/// Failure reported by a present medium.
#[derive(Debug)]
pub enum MediumError {
    Db(DbError),
    /// Medium exists but is not usable (e.g. its table is missing).
    Unusable(String),
}

impl Display for MediumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unusable(message) => write!(f, "storage medium unusable: {message}"),
        }
    }
}

impl Error for MediumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unusable(_) => None,
        }
    }
}

impl From<DbError> for MediumError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for MediumError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key/string store contract.
pub trait KeyValueMedium {
    fn read(&self, key: &str) -> MediumResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> MediumResult<()>;
    fn remove(&self, key: &str) -> MediumResult<()>;

    /// Raw presence check. Does not look at the value.
    fn contains(&self, key: &str) -> MediumResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<M: KeyValueMedium + ?Sized> KeyValueMedium for &M {
    fn read(&self, key: &str) -> MediumResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> MediumResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> MediumResult<()> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> MediumResult<bool> {
        (**self).contains(key)
    }
}
