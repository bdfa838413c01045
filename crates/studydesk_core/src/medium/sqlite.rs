//! SQLite-backed medium over the `kv_entries` table.
//!
//! # Invariants
//! - One row per key; writes upsert and bump `updated_at`.
//! - The borrowed connection must come from `open_db`/`open_db_in_memory`
//!   so migrations are applied.

use super::{KeyValueMedium, MediumError, MediumResult};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteMedium<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedium<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MediumError::Unusable` when the `kv_entries` table does not exist.
    pub fn try_new(conn: &'conn Connection) -> MediumResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(MediumError::Unusable(
                "kv_entries table missing; open the connection through open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl KeyValueMedium for SqliteMedium<'_> {
    fn read(&self, key: &str) -> MediumResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> MediumResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> MediumResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn contains(&self, key: &str) -> MediumResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM kv_entries WHERE key = ?1);",
            [key],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}
