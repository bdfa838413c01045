//! Transport timetable editing and favorite weekdays.
//!
//! # Invariants
//! - Saving lines for a `(weekday, shift)` pair replaces that entry, or
//!   appends one when the pair has none; other entries are untouched.
//! - Saved lines are trimmed and never blank.

use crate::medium::KeyValueMedium;
use crate::model::transport::{Shift, TransportSchedule, Weekday};
use crate::service::ServiceResult;
use crate::store::DomainStore;
use log::info;
use std::collections::BTreeSet;

const SCHEDULE_TEXT_RULE: &str = "-------------------------------";

pub struct TransportService<'s, M: KeyValueMedium> {
    store: &'s DomainStore<M>,
}

impl<'s, M: KeyValueMedium> TransportService<'s, M> {
    pub fn new(store: &'s DomainStore<M>) -> Self {
        Self { store }
    }

    /// Lines for one pair; empty when the pair has no entry.
    pub fn lines_for(&self, weekday: Weekday, shift: Shift) -> Vec<String> {
        self.store
            .transport_schedules()
            .into_iter()
            .find(|schedule| schedule.is_for(weekday, shift))
            .map(|schedule| schedule.lines)
            .unwrap_or_default()
    }

    /// Parses newline-separated text and persists it as the pair's lines.
    pub fn save_lines(
        &self,
        weekday: Weekday,
        shift: Shift,
        raw_text: &str,
    ) -> ServiceResult<Vec<String>> {
        let lines = parse_lines(raw_text);
        let mut schedules = self.store.transport_schedules();

        let mut matched = false;
        for schedule in schedules.iter_mut().filter(|s| s.is_for(weekday, shift)) {
            schedule.lines = lines.clone();
            matched = true;
        }
        if !matched {
            schedules.push(TransportSchedule::new(weekday, shift, lines.clone()));
        }

        self.store.replace_transport_schedules(&schedules)?;
        info!(
            "event=transport_save module=service status=ok weekday={} shift={} line_count={} appended={}",
            weekday.as_str(),
            shift.as_str(),
            lines.len(),
            !matched
        );
        Ok(lines)
    }

    pub fn favorite_days(&self) -> BTreeSet<Weekday> {
        self.store.favorite_days()
    }

    /// Flips the favorite flag for `weekday`; returns the new flag.
    pub fn toggle_favorite(&self, weekday: Weekday) -> ServiceResult<bool> {
        let mut favorites = self.store.favorite_days();
        let now_favorite = if favorites.remove(&weekday) {
            false
        } else {
            favorites.insert(weekday);
            true
        };
        self.store.replace_favorite_days(&favorites)?;
        Ok(now_favorite)
    }

    /// Plain-text export of one pair's lines.
    pub fn schedule_text(&self, weekday: Weekday, shift: Shift) -> String {
        let mut lines = vec![
            format!(
                "Transport schedule - {} - {}",
                weekday.label(),
                shift.label()
            ),
            SCHEDULE_TEXT_RULE.to_string(),
        ];
        lines.extend(self.lines_for(weekday, shift));
        lines.join("\n")
    }
}

fn parse_lines(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
