/// Domain module containing the streak/calendar record model
///
/// This module defines the in-memory record store (habits and their per-date
/// completion entries), the streak calculator and the month projector. None of
/// these types touch I/O; persistence lives in the storage layer.

pub mod calendar;
pub mod entry;
pub mod habit;
pub mod store;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use calendar::*;
pub use entry::*;
pub use habit::*;
pub use store::*;
pub use streak::*;
pub use types::*;

use std::fmt;
use thiserror::Error;

/// Why a habit could not be added to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A habit with exactly this name is already tracked
    AlreadyExists,
    /// The name was the empty string
    Empty,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::AlreadyExists => f.write_str("habit already exists"),
            RejectReason::Empty => f.write_str("habit name is empty"),
        }
    }
}

/// Errors that can occur during domain operations
///
/// All of these are recoverable at the session level: the operation that
/// produced them leaves the store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Cannot add habit '{name}': {reason}")]
    DuplicateHabit { name: String, reason: RejectReason },

    #[error("Unknown habit: '{0}'")]
    UnknownHabit(String),

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    /// True for both flavours of add-habit rejection (existing or empty name)
    pub fn is_duplicate_habit(&self) -> bool {
        matches!(self, DomainError::DuplicateHabit { .. })
    }
}
