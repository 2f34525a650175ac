/// CompletionEntry value type
///
/// A single (date, completed) fact for one habit. Entries are stored inside a
/// HabitRecord as a date-keyed map; this type is the flattened view handed out
/// when callers iterate a record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a habit was done on a given calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    /// Calendar day this fact is about (no time-of-day component)
    pub date: NaiveDate,
    /// True when the habit was marked done for that day
    pub completed: bool,
}

impl CompletionEntry {
    pub fn new(date: NaiveDate, completed: bool) -> Self {
        Self { date, completed }
    }
}

impl From<(NaiveDate, bool)> for CompletionEntry {
    fn from((date, completed): (NaiveDate, bool)) -> Self {
        Self { date, completed }
    }
}
