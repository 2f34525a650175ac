/// Core identifier types used throughout the domain layer
///
/// Habits are identified by their display name. The name is the key in the
/// record store and the value written to the "Habit" column of the sheet, so
/// there is no separate surrogate ID.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Name of a tracked habit
///
/// Non-empty and case-sensitive: "Read" and "read" are two different habits.
/// Equality is exact, no trimming or normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HabitName(String);

impl HabitName {
    /// Create a habit name, rejecting the empty string
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets maps keyed by HabitName be queried with a plain &str.
impl Borrow<str> for HabitName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HabitName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HabitName> for String {
    fn from(name: HabitName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(HabitName::new(""), Err(DomainError::InvalidHabitName(_))));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let upper = HabitName::new("Read").unwrap();
        let lower = HabitName::new("read").unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper.as_str(), "Read");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let parsed: Result<HabitName, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: HabitName = serde_json::from_str("\"Meditate\"").unwrap();
        assert_eq!(parsed.to_string(), "Meditate");
    }
}
