//! Portal account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// Registered portal account.
///
/// Email comparison is exact and case-sensitive. Uniqueness per email is
/// enforced by `AccountService`, not by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account with a generated id and the current timestamp.
    pub fn new(email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            secret: secret.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns whether the given credential pair matches this account exactly.
    pub fn matches(&self, email: &str, secret: &str) -> bool {
        self.email == email && self.secret == secret
    }
}
