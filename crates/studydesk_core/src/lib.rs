//! Core domain logic for StudyDesk.
//! This crate owns persistence of the portal collections and grade evaluation.

pub mod db;
pub mod grading;
pub mod logging;
pub mod medium;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use grading::evaluation::{evaluate, Evaluation, Status, PASSING_AVERAGE};
pub use grading::report::build_report;
pub use logging::{default_log_level, init_logging, logging_status};
pub use medium::{KeyValueMedium, MediumError, MediumResult, MemoryMedium, SqliteMedium};
pub use model::class_session::{ClassSession, ClassSessionId, ClassSessionValidationError};
pub use model::subject::{Assessment, AssessmentId, Subject};
pub use model::transport::{Shift, TransportSchedule, Weekday};
pub use model::user::{User, UserId};
pub use seed::{ensure_seeded, ensure_seeded_on, SeedReport};
pub use service::account_service::{AccountError, AccountService};
pub use service::agenda_service::{AgendaService, NewClassSession};
pub use service::grade_service::GradeService;
pub use service::transport_service::TransportService;
pub use service::{ServiceError, ServiceResult};
pub use store::{Collection, DomainStore, StoreError, StoreResult, CURRENT_USER_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
