/// Streak calculation
///
/// A streak is the number of consecutive days, ending at and including
/// "today", that are recorded as completed. "Today" is always passed in by
/// the caller so the calculation stays a pure function of its inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{HabitName, HabitRecord};

/// Current streak of one habit as of a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Which habit this streak is for
    pub habit: HabitName,
    /// Reference date the streak was computed for
    pub as_of: NaiveDate,
    /// Consecutive completed days ending at `as_of`
    pub current_streak: u32,
    /// What was recorded for `as_of` itself (None if nothing yet)
    pub today: Option<bool>,
}

impl Streak {
    /// Compute the streak of `record` as of `today`
    pub fn calculate(record: &HabitRecord, today: NaiveDate) -> Self {
        Self {
            habit: record.name.clone(),
            as_of: today,
            current_streak: current_streak(record, today),
            today: record.get(today),
        }
    }

    /// Feedback tier for the daily check-in
    pub fn tier(&self) -> StreakTier {
        StreakTier::from_check_in(self.today.unwrap_or(false), self.current_streak)
    }

    /// One-line feedback message for the daily check-in
    pub fn message(&self) -> String {
        self.tier().message(self.current_streak)
    }
}

/// Count consecutive completed days walking backward from `today`
///
/// `today` must itself be recorded as completed for the count to start. The
/// walk stops at the first day that is missing or recorded as not completed;
/// entries after `today` are never looked at.
pub fn current_streak(record: &HabitRecord, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut checking_date = Some(today);

    // A streak can never be longer than the number of recorded days.
    while let Some(date) = checking_date {
        if streak as usize >= record.len() || !record.get(date).unwrap_or(false) {
            break;
        }
        streak += 1;
        checking_date = date.pred_opt();
    }

    streak
}

/// How the check-in view should react to a habit's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    /// Done today
    GreatJob,
    /// Not done today but a streak is still standing
    KeepItUp,
    /// Not done today and nothing to keep alive
    NoStreak,
}

impl StreakTier {
    pub fn from_check_in(done_today: bool, streak: u32) -> Self {
        match (done_today, streak) {
            (true, _) => StreakTier::GreatJob,
            (false, 0) => StreakTier::NoStreak,
            (false, _) => StreakTier::KeepItUp,
        }
    }

    pub fn message(&self, streak: u32) -> String {
        match self {
            StreakTier::GreatJob => format!("Great job! 🔥 Streak: {}", streak),
            StreakTier::KeepItUp => format!("Keep it up! 🔥 Streak: {}", streak),
            StreakTier::NoStreak => "No streak yet. ❌".to_string(),
        }
    }
}
