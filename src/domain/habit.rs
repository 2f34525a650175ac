/// HabitRecord entity
///
/// A habit together with its full completion history. The history is a
/// mapping from calendar date to completed flag, which makes "one entry per
/// date" a structural property instead of something every writer must check.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{CompletionEntry, HabitName};

/// A tracked habit and every day recorded for it
///
/// Created empty when the habit is added; entries are only ever inserted or
/// replaced, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitRecord {
    /// Display name, also the key in the record store
    pub name: HabitName,
    entries: BTreeMap<NaiveDate, bool>,
}

impl HabitRecord {
    /// Create a habit with no recorded days
    pub fn new(name: HabitName) -> Self {
        Self {
            name,
            entries: BTreeMap::new(),
        }
    }

    /// Read-only view of the date -> completed mapping
    pub fn entries(&self) -> &BTreeMap<NaiveDate, bool> {
        &self.entries
    }

    /// The recorded value for a day, `None` when nothing was recorded
    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.entries.get(&date).copied()
    }

    /// Two-state view of a day: a missing entry counts as not completed
    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.get(date).unwrap_or(false)
    }

    /// Record a day, replacing whatever was there before
    ///
    /// Returns the previous value for that date, if any.
    pub fn upsert(&mut self, date: NaiveDate, completed: bool) -> Option<bool> {
        self.entries.insert(date, completed)
    }

    /// Entries in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = CompletionEntry> + '_ {
        self.entries
            .iter()
            .map(|(date, completed)| CompletionEntry::new(*date, *completed))
    }

    /// Entries whose date falls inside `dates`, ascending
    pub fn range(&self, dates: RangeInclusive<NaiveDate>) -> impl Iterator<Item = CompletionEntry> + '_ {
        self.entries
            .range(dates)
            .map(|(date, completed)| CompletionEntry::new(*date, *completed))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
