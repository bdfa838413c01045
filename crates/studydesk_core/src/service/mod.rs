//! Use-case services over `DomainStore`.
//!
//! # Responsibility
//! - Hold the collaborator logic UI layers run on top of the store: grade
//!   editing, class agenda, transport timetable and favorites, accounts.
//! - Apply every mutation as read-all, modify, replace-all.
//!
//! # Invariants
//! - Services never write a partial collection.
//! - Services borrow the store; they own no persistent state.

use crate::model::class_session::{ClassSessionId, ClassSessionValidationError};
use crate::model::subject::AssessmentId;
use crate::store::StoreError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_service;
pub mod agenda_service;
pub mod grade_service;
pub mod transport_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    SubjectNotFound(String),
    AssessmentNotFound {
        subject_id: String,
        assessment_id: AssessmentId,
    },
    ClassSessionNotFound(ClassSessionId),
    InvalidClassSession(ClassSessionValidationError),
    /// Export requested for a day without sessions.
    EmptyDay(NaiveDate),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubjectNotFound(id) => write!(f, "subject not found: {id}"),
            Self::AssessmentNotFound {
                subject_id,
                assessment_id,
            } => write!(
                f,
                "assessment {} not found in subject {subject_id}",
                assessment_id.code()
            ),
            Self::ClassSessionNotFound(id) => write!(f, "class session not found: {id}"),
            Self::InvalidClassSession(err) => write!(f, "{err}"),
            Self::EmptyDay(date) => write!(f, "no class sessions on {date}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidClassSession(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ClassSessionValidationError> for ServiceError {
    fn from(value: ClassSessionValidationError) -> Self {
        Self::InvalidClassSession(value)
    }
}
