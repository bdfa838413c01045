//! In-process medium backed by an ordered map.
//!
//! Used by tests and by headless callers that want session-only persistence.

use super::{KeyValueMedium, MediumResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Single-threaded in-memory medium.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium pre-populated with raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RefCell::new(entries),
        }
    }

    /// Copies the current raw content.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueMedium for MemoryMedium {
    fn read(&self, key: &str) -> MediumResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> MediumResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> MediumResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> MediumResult<bool> {
        Ok(self.entries.borrow().contains_key(key))
    }
}
