/// Tool for today's check-in
///
/// This module implements the habit_check_in MCP tool: mark a habit as done
/// (or not done) for the session's current day and report the streak.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::StreakTier;
use crate::session::{Command, Session};
use crate::ServerError;

/// Parameters for checking in a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckInParams {
    /// Name of the habit
    pub habit: String,
    /// Whether the habit was done today (defaults to true)
    #[serde(default = "default_done")]
    pub done: bool,
}

fn default_done() -> bool {
    true
}

/// Response from a check-in
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub habit: String,
    pub date: String,
    pub current_streak: u32,
    pub tier: StreakTier,
    pub message: String,
}

/// Record today's state for one habit
pub fn check_in(session: &mut Session, params: CheckInParams) -> Result<CheckInResponse, ServerError> {
    let view = session.apply(Command::CheckIn {
        habit: params.habit.clone(),
        done: params.done,
    })?;
    let streak = view.streak;

    Ok(CheckInResponse {
        habit: params.habit,
        date: streak.as_of.to_string(),
        current_streak: streak.current_streak,
        tier: streak.tier(),
        message: streak.message(),
    })
}
