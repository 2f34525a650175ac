/// In-memory record store
///
/// The RecordStore is the single owner of all habit data during a session.
/// It is loaded wholesale from the persistence gateway, mutated through the
/// operations below, and saved wholesale again on request.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DomainError, HabitName, HabitRecord, RejectReason};

/// Mapping from habit name to that habit's record
///
/// Habits iterate in name order. There is no delete or rename operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordStore {
    habits: BTreeMap<HabitName, HabitRecord>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new habit with no recorded days
    ///
    /// Fails with `DuplicateHabit` when the name is empty or already present;
    /// the store is left unchanged in both cases.
    pub fn add_habit(&mut self, name: &str) -> Result<&HabitRecord, DomainError> {
        if name.is_empty() {
            return Err(DomainError::DuplicateHabit {
                name: String::new(),
                reason: RejectReason::Empty,
            });
        }
        if self.habits.contains_key(name) {
            return Err(DomainError::DuplicateHabit {
                name: name.to_string(),
                reason: RejectReason::AlreadyExists,
            });
        }

        let name = HabitName::new(name)?;
        tracing::debug!("Added habit: {}", name);
        let record = self
            .habits
            .entry(name.clone())
            .or_insert_with(|| HabitRecord::new(name));
        Ok(&*record)
    }

    /// Record whether `habit` was done on `date`, replacing any prior entry
    ///
    /// Applying the same (date, completed) twice leaves the same state as
    /// applying it once. Returns the value previously stored for that date.
    pub fn upsert_entry(
        &mut self,
        habit: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<Option<bool>, DomainError> {
        let record = self
            .habits
            .get_mut(habit)
            .ok_or_else(|| DomainError::UnknownHabit(habit.to_string()))?;
        Ok(record.upsert(date, completed))
    }

    /// Full entry mapping for a habit
    pub fn get_entries(&self, habit: &str) -> Result<&BTreeMap<NaiveDate, bool>, DomainError> {
        self.record(habit).map(HabitRecord::entries)
    }

    /// The whole record for a habit
    pub fn record(&self, habit: &str) -> Result<&HabitRecord, DomainError> {
        self.habits
            .get(habit)
            .ok_or_else(|| DomainError::UnknownHabit(habit.to_string()))
    }

    pub fn contains(&self, habit: &str) -> bool {
        self.habits.contains_key(habit)
    }

    /// All records, in name order
    pub fn habits(&self) -> impl Iterator<Item = &HabitRecord> {
        self.habits.values()
    }

    /// All habit names, in name order
    pub fn habit_names(&self) -> impl Iterator<Item = &HabitName> {
        self.habits.keys()
    }

    /// Number of tracked habits
    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Total number of recorded days across every habit
    pub fn entry_count(&self) -> usize {
        self.habits.values().map(HabitRecord::len).sum()
    }

    /// Record a loaded fact, creating the habit on first sight
    ///
    /// Used by the row codec; later rows for the same (habit, date) win.
    pub(crate) fn insert_loaded(&mut self, name: HabitName, date: NaiveDate, completed: bool) {
        self.habits
            .entry(name.clone())
            .or_insert_with(|| HabitRecord::new(name))
            .upsert(date, completed);
    }
}
