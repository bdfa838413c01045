//! Weighted grade evaluation and report rendering.
//!
//! # Responsibility
//! - Turn a subject's assessments into one rounded average and a status.
//! - Fold evaluations of many subjects into a deterministic text report.
//!
//! # Invariants
//! - Both entry points are pure; they never touch the store.

pub mod evaluation;
pub mod report;
