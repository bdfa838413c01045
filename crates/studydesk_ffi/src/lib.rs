//! Flutter-facing bindings for StudyDesk core.

pub mod api;
