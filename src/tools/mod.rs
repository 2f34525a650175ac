/// Presentation-layer operations
///
/// Each tool takes a serde parameter struct, drives the session, and returns
/// a response struct with a human-readable message. These are what the MCP
/// server exposes to clients.

pub mod add;
pub mod calendar;
pub mod check_in;
pub mod edit;
pub mod persist;
pub mod status;

// Re-export tool functions for easy access
pub use add::*;
pub use calendar::*;
pub use check_in::*;
pub use edit::*;
pub use persist::*;
pub use status::*;

use chrono::NaiveDate;

use crate::domain::DomainError;

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_iso_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", value)))
}
