/// Per-session context
///
/// A Session owns the record store for one user session together with the
/// gateway it was loaded from. The presentation layer never touches the store
/// directly: it sends a `Command`, and the session answers with freshly
/// derived view data (streak and month grid) for the affected habit.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, MonthGrid, RecordStore, Streak};
use crate::storage::{LoadReport, PersistenceGateway, StorageError};

/// A single mutation requested by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Start tracking a new habit
    AddHabit { name: String },
    /// Record today's state for a habit
    CheckIn { habit: String, done: bool },
    /// Set an explicit value for any day
    SetDay { habit: String, date: NaiveDate, completed: bool },
    /// Flip a day as shown in the calendar (unrecorded counts as not done)
    ToggleDay { habit: String, date: NaiveDate },
}

/// Derived data for one habit after a command or on request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitView {
    pub streak: Streak,
    pub grid: MonthGrid,
}

/// One user's session: record store, gateway and reference date
pub struct Session {
    store: RecordStore,
    gateway: Box<dyn PersistenceGateway>,
    pinned_today: Option<NaiveDate>,
}

impl Session {
    /// Create a session with an empty store, without loading anything
    pub fn new(gateway: Box<dyn PersistenceGateway>) -> Self {
        Self {
            store: RecordStore::new(),
            gateway,
            pinned_today: None,
        }
    }

    /// Load the store from `gateway` and start a session
    ///
    /// A failed load is not fatal: the session starts with an empty store
    /// and the error is logged.
    pub async fn open(gateway: Box<dyn PersistenceGateway>) -> Self {
        let mut session = Self::new(gateway);
        if let Err(e) = session.reload().await {
            tracing::warn!("Could not load habit data, starting with an empty store: {}", e);
        }
        session
    }

    /// Use a fixed reference date instead of the local calendar date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self
    }

    /// Reference date for streaks and check-ins
    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Apply a command and return the affected habit's new view
    ///
    /// The grid shows the month of the edited day, or the current month for
    /// commands that do not name a day. On error the store is unchanged.
    pub fn apply(&mut self, command: Command) -> Result<HabitView, DomainError> {
        tracing::debug!("Applying command: {:?}", command);
        let today = self.today();

        let (habit, date) = match command {
            Command::AddHabit { name } => {
                self.store.add_habit(&name)?;
                (name, today)
            }
            Command::CheckIn { habit, done } => {
                self.store.upsert_entry(&habit, today, done)?;
                (habit, today)
            }
            Command::SetDay { habit, date, completed } => {
                self.store.upsert_entry(&habit, date, completed)?;
                (habit, date)
            }
            Command::ToggleDay { habit, date } => {
                let current = self.store.record(&habit)?.is_completed(date);
                self.store.upsert_entry(&habit, date, !current)?;
                (habit, date)
            }
        };

        self.view(&habit, date.month(), date.year())
    }

    /// Current streak of one habit
    pub fn streak(&self, habit: &str) -> Result<Streak, DomainError> {
        let record = self.store.record(habit)?;
        Ok(Streak::calculate(record, self.today()))
    }

    /// Streak of every habit, in name order
    pub fn streaks(&self) -> Vec<Streak> {
        let today = self.today();
        self.store
            .habits()
            .map(|record| Streak::calculate(record, today))
            .collect()
    }

    /// Month grid of one habit
    pub fn month_grid(&self, habit: &str, month: u32, year: i32) -> Result<MonthGrid, DomainError> {
        MonthGrid::project(self.store.record(habit)?, month, year)
    }

    /// Streak plus month grid of one habit
    pub fn view(&self, habit: &str, month: u32, year: i32) -> Result<HabitView, DomainError> {
        Ok(HabitView {
            streak: self.streak(habit)?,
            grid: self.month_grid(habit, month, year)?,
        })
    }

    /// Write the whole store through the gateway
    ///
    /// The in-memory store is kept as-is whether or not this succeeds.
    pub async fn save(&self) -> Result<usize, StorageError> {
        match self.gateway.save_all(&self.store).await {
            Ok(rows) => {
                tracing::info!("Saved {} habits ({} rows)", self.store.len(), rows);
                Ok(rows)
            }
            Err(e) => {
                tracing::error!("Save failed, in-memory data kept: {}", e);
                Err(e)
            }
        }
    }

    /// Replace the store with a fresh load from the gateway
    ///
    /// On failure the current store is left untouched.
    pub async fn reload(&mut self) -> Result<LoadReport, StorageError> {
        let report = self.gateway.load_all().await?;
        tracing::info!(
            "Loaded {} habits ({} entries), {} rows skipped",
            report.habits(),
            report.entries(),
            report.skipped.len()
        );
        self.store = report.store.clone();
        Ok(report)
    }
}
