/// Tool for checking habit streaks
///
/// This module implements the habit_status MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Streak, StreakTier};
use crate::session::Session;
use crate::ServerError;

/// Parameters for checking habit status
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// Name of one habit; omit for every habit
    pub habit: Option<String>,
}

/// Streak information for a single habit
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub name: String,
    pub current_streak: u32,
    /// What is recorded for today, if anything
    pub today: Option<bool>,
    pub tier: StreakTier,
}

impl From<Streak> for HabitStatus {
    fn from(streak: Streak) -> Self {
        Self {
            tier: streak.tier(),
            name: streak.habit.to_string(),
            current_streak: streak.current_streak,
            today: streak.today,
        }
    }
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStatus>,
    pub summary: String,
    pub message: String,
}

/// Current streaks for one or all habits
pub fn get_habit_status(session: &Session, params: StatusParams) -> Result<StatusResponse, ServerError> {
    let streaks = match params.habit {
        Some(habit) => vec![session.streak(&habit)?],
        None => session.streaks(),
    };

    let summary = if streaks.is_empty() {
        "No habits added yet.".to_string()
    } else {
        let done_today = streaks.iter().filter(|s| s.today == Some(true)).count();
        format!(
            "📊 {} of {} habits done today ({})",
            done_today,
            streaks.len(),
            session.today()
        )
    };

    let message = streaks
        .iter()
        .map(|streak| format!("🏃 {}: {}", streak.habit, streak.message()))
        .fold(summary.clone(), |acc, line| format!("{}\n{}", acc, line));

    Ok(StatusResponse {
        habits: streaks.into_iter().map(HabitStatus::from).collect(),
        summary,
        message,
    })
}
