//! Domain model for the academic portal.
//!
//! # Responsibility
//! - Define the entities persisted by `DomainStore`.
//! - Keep the persisted JSON shape stable (camelCase fields, short enum codes).
//!
//! # Invariants
//! - Entities are plain owned values; nothing is shared across the store
//!   boundary by reference.
//! - A missing score is `None`, never a sentinel number.

pub mod class_session;
pub mod subject;
pub mod transport;
pub mod user;
