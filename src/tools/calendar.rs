/// Tool for viewing a habit's month calendar
///
/// This module implements the habit_calendar MCP tool. The grid is returned
/// both as structured data and as a rendered 7-column text calendar.

use chrono::Datelike;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, MonthGrid, WEEKDAY_HEADERS};
use crate::session::Session;
use crate::ServerError;

/// Years the calendar view accepts
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

const DONE_EMOJI: &str = "✅";
const MISS_EMOJI: &str = "❌";

/// Parameters for viewing a month
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CalendarParams {
    /// Name of the habit
    pub habit: String,
    /// Month 1-12 (defaults to the current month)
    pub month: Option<u32>,
    /// Year 2000-2100 (defaults to the current year)
    pub year: Option<i32>,
}

/// Response with the month grid
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub grid: MonthGrid,
    pub message: String,
}

/// Project one habit onto a month and render it
pub fn get_habit_calendar(session: &Session, params: CalendarParams) -> Result<CalendarResponse, ServerError> {
    let today = session.today();
    let month = params.month.unwrap_or_else(|| today.month());
    let year = params.year.unwrap_or_else(|| today.year());

    if !YEAR_RANGE.contains(&year) {
        return Err(DomainError::InvalidDate(format!(
            "Year must be between {} and {}, got {}",
            YEAR_RANGE.start(),
            YEAR_RANGE.end(),
            year
        ))
        .into());
    }

    let grid = session.month_grid(&params.habit, month, year)?;
    let message = render_grid(&grid);

    Ok(CalendarResponse { grid, message })
}

/// Render a month grid as a Monday-first text calendar
pub fn render_grid(grid: &MonthGrid) -> String {
    let mut lines = vec![format!("📅 {} - {}", grid.title(), grid.habit)];

    lines.push(
        WEEKDAY_HEADERS
            .iter()
            .map(|day| format!("{:<6}", day))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(cell) => {
                    let mark = if cell.completed { DONE_EMOJI } else { MISS_EMOJI };
                    format!("{:>2} {}  ", cell.day, mark)
                }
                None => "      ".to_string(),
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.push(grid.progress_label());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitName, HabitRecord};
    use chrono::NaiveDate;

    #[test]
    fn test_render_grid() {
        let mut record = HabitRecord::new(HabitName::new("Read").unwrap());
        record.upsert(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), true);
        let grid = MonthGrid::project(&record, 4, 2024).unwrap();

        let text = render_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "📅 April 2024 - Read");
        assert!(lines[1].starts_with("Mon"));
        // April 2024 starts on a Monday
        assert!(lines[2].starts_with(" 1 ✅"));
        assert!(lines[2].contains(" 2 ❌"));
        assert_eq!(*lines.last().unwrap(), "Progress: 1/30 days completed (3.3%)");
    }
}
