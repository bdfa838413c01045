//! First-run seeding of the domain collections.
//!
//! # Responsibility
//! - Write each collection's canonical default dataset when its key is absent.
//!
//! # Invariants
//! - Presence is checked on the raw key, not on parse success: a malformed
//!   value is left in place and is never overwritten by seeding.
//! - Seeding is idempotent; once every key exists it writes nothing.
//! - Must complete before callers treat store reads as authoritative.

pub mod defaults;

use crate::medium::KeyValueMedium;
use crate::store::{Collection, DomainStore, StoreResult};
use chrono::{Local, NaiveDate};
use log::info;

/// Collections written by one seeding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<Collection>,
}

impl SeedReport {
    /// `true` when the pass wrote nothing.
    pub fn is_noop(&self) -> bool {
        self.seeded.is_empty()
    }
}

/// Seeds missing collections using today's local date for class sessions.
pub fn ensure_seeded<M: KeyValueMedium>(store: &DomainStore<M>) -> StoreResult<SeedReport> {
    ensure_seeded_on(store, Local::now().date_naive())
}

/// Seeds missing collections, anchoring default class sessions at `today`.
///
/// # Errors
/// - Propagates medium failures from presence checks or writes. A store
///   without a medium returns an empty report.
pub fn ensure_seeded_on<M: KeyValueMedium>(
    store: &DomainStore<M>,
    today: NaiveDate,
) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();
    if !store.is_available() {
        info!("event=seed module=seed status=skipped reason=medium_absent");
        return Ok(report);
    }

    for collection in Collection::ALL {
        if store.key_present(collection)? {
            continue;
        }
        match collection {
            Collection::Users => store.replace_users(&[])?,
            Collection::Subjects => store.replace_subjects(&defaults::default_subjects())?,
            Collection::ClassSessions => {
                store.replace_class_sessions(&defaults::default_class_sessions(today))?
            }
            Collection::TransportSchedules => {
                store.replace_transport_schedules(&defaults::default_transport_schedules())?
            }
            Collection::FavoriteDays => {
                store.replace_favorite_days(&defaults::default_favorite_days())?
            }
        }
        report.seeded.push(collection);
    }

    let seeded = report
        .seeded
        .iter()
        .map(|collection| collection.as_str())
        .collect::<Vec<_>>()
        .join(",");
    info!(
        "event=seed module=seed status=ok seeded_count={} seeded=[{seeded}]",
        report.seeded.len()
    );
    Ok(report)
}
