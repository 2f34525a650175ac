/// Tool for editing past days
///
/// This module implements the habit_edit_day MCP tool. With an explicit
/// `completed` value the day is set; without one it is toggled, the same as
/// clicking a calendar cell.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::{Command, Session};
use crate::tools::parse_iso_date;
use crate::ServerError;

/// Parameters for editing one day
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditDayParams {
    /// Name of the habit
    pub habit: String,
    /// Day to edit (YYYY-MM-DD)
    pub date: String,
    /// New value; omit to toggle the day
    pub completed: Option<bool>,
}

/// Response from editing a day
#[derive(Debug, Serialize)]
pub struct EditDayResponse {
    pub habit: String,
    pub date: String,
    pub completed: bool,
    pub current_streak: u32,
    pub message: String,
}

/// Set or toggle a single day of a habit
pub fn edit_day(session: &mut Session, params: EditDayParams) -> Result<EditDayResponse, ServerError> {
    let date = parse_iso_date(&params.date)?;
    let command = match params.completed {
        Some(completed) => Command::SetDay { habit: params.habit.clone(), date, completed },
        None => Command::ToggleDay { habit: params.habit.clone(), date },
    };

    let view = session.apply(command)?;
    let completed = session.store().record(&params.habit)?.is_completed(date);

    Ok(EditDayResponse {
        message: format!(
            "{} on {}: {}\n{}",
            params.habit,
            date,
            if completed { "done ✅" } else { "missed ❌" },
            view.grid.progress_label()
        ),
        habit: params.habit,
        date: date.to_string(),
        completed,
        current_streak: view.streak.current_streak,
    })
}
