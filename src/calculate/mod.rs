//! Statistics calculation engine.
//!
//! Pure, deterministic folds from a snapshot of match records to derived
//! views:
//! - Team season summary and per-opponent records
//! - Monthly trend buckets
//! - Recent form and shot-type trends
//! - Player rankings, career breakdowns and player of the month
//! - Goal-by-goal timeline reconstruction with legacy fallback
//!
//! Nothing here performs I/O or mutates its inputs; calling any function
//! twice over the same snapshot yields identical output. Malformed or
//! missing statistical sub-fields fold in as zero values rather than
//! erroring, so one legacy record cannot poison a whole season.

mod aggregate;
mod form;
mod ranking;
mod timeline;

pub use aggregate::*;
pub use form::*;
pub use ranking::*;
pub use timeline::*;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::Match;

/// Integer percentage, round-half-up. Zero attempts is a defined zero.
pub fn percentage(goals: u32, attempts: u32) -> u32 {
    if attempts == 0 {
        0
    } else {
        ((goals as f64 / attempts as f64) * 100.0).round() as u32
    }
}

/// Round to one decimal place, half-up.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Goals per match to one decimal. Zero matches is a defined zero.
pub fn goals_per_match(goals: u32, matches: u32) -> f64 {
    if matches == 0 {
        0.0
    } else {
        round1(goals as f64 / matches as f64)
    }
}

/// Parse a stored ISO-8601 date leniently.
///
/// Accepts full RFC 3339, a bare datetime, or a bare date (read as midnight
/// UTC). Returns `None` for anything else; callers sort `None` as the oldest
/// possible date and date-windowed aggregates skip such matches entirely.
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Finished matches, most recent first.
///
/// The sort is stable: matches on the same instant (and matches with
/// unparseable dates, which all sort last) keep their original order.
pub fn sorted_recent_first(matches: &[Match]) -> Vec<&Match> {
    let mut finished: Vec<&Match> = matches.iter().filter(|m| m.finished).collect();
    finished.sort_by(|a, b| parse_iso_date(&b.date).cmp(&parse_iso_date(&a.date)));
    finished
}

/// Grouping accumulator that preserves first-seen key order.
///
/// The "stable tie-break = first appearance" contract of the ranking
/// operations requires iteration in insertion order, which a hash map alone
/// does not give.
pub(crate) struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    entries: Vec<V>,
}

impl<V> OrderedGroups<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Mutable access to the group for `key`, inserting `init()` on first
    /// appearance.
    pub fn entry(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push(init());
                let idx = self.entries.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx]
    }

    /// All groups in first-seen order.
    pub fn into_vec(self) -> Vec<V> {
        self.entries
    }
}
