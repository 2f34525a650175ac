/// Tool for adding new habits
///
/// This module implements the habit_add MCP tool. Rejected names are not an
/// error for the client: they come back as a warning with `success: false`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, RejectReason};
use crate::session::{Command, Session};
use crate::ServerError;

/// Parameters for adding a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddHabitParams {
    /// Name of the habit (case-sensitive, must be unique)
    pub name: String,
}

/// Response from adding a habit
#[derive(Debug, Serialize)]
pub struct AddHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Start tracking a new habit in the session
pub fn add_habit(session: &mut Session, params: AddHabitParams) -> Result<AddHabitResponse, ServerError> {
    match session.apply(Command::AddHabit { name: params.name.clone() }) {
        Ok(_) => Ok(AddHabitResponse {
            success: true,
            message: format!("Added habit: {}", params.name),
        }),
        Err(DomainError::DuplicateHabit { reason, .. }) => {
            tracing::warn!("Rejected habit '{}': {}", params.name, reason);
            let message = match reason {
                RejectReason::AlreadyExists => "Habit already exists!",
                RejectReason::Empty => "Please enter a habit name.",
            };
            Ok(AddHabitResponse {
                success: false,
                message: message.to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}
