/// Month projection for calendar views
///
/// Projects a habit's history onto one calendar month: one cell per day,
/// missing days defaulting to "not completed". The projection is a read-only
/// view recomputed on demand; edits go back through the record store.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitName, HabitRecord};

/// Columns in the calendar layout, Monday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(month: u32, year: i32) -> Result<u32, DomainError> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return Err(invalid_month(month)),
    };
    Ok(days)
}

/// Blank cells before day 1 in a Monday-first week (0 = month starts on Monday)
pub fn first_weekday_offset(month: u32, year: i32) -> Result<u32, DomainError> {
    Ok(first_of_month(month, year)?.weekday().num_days_from_monday())
}

fn first_of_month(month: u32, year: i32) -> Result<NaiveDate, DomainError> {
    if !(1..=12).contains(&month) {
        return Err(invalid_month(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::InvalidDate(format!("Year {} is out of range", year)))
}

fn invalid_month(month: u32) -> DomainError {
    DomainError::InvalidDate(format!("Month must be 1-12, got {}", month))
}

/// One day of a projected month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// Day of month, starting at 1
    pub day: u32,
    pub date: NaiveDate,
    /// Recorded value, or false when nothing was recorded
    pub completed: bool,
}

/// A habit's completion status for every day of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub habit: HabitName,
    pub year: i32,
    pub month: u32,
    /// Blank leading cells in a Monday-first 7-column layout
    pub first_weekday_offset: u32,
    /// Exactly one cell per day of the month, in day order
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Project `record` onto `month` of `year`
    pub fn project(record: &HabitRecord, month: u32, year: i32) -> Result<Self, DomainError> {
        let first = first_of_month(month, year)?;
        let day_count = days_in_month(month, year)?;

        let days = first
            .iter_days()
            .take(day_count as usize)
            .map(|date| DayCell {
                day: date.day(),
                date,
                completed: record.is_completed(date),
            })
            .collect();

        Ok(Self {
            habit: record.name.clone(),
            year,
            month,
            first_weekday_offset: first.weekday().num_days_from_monday(),
            days,
        })
    }

    pub fn days_in_month(&self) -> u32 {
        self.days.len() as u32
    }

    /// The cell for `day` (1-based), if the month has that day
    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        day.checked_sub(1).and_then(|index| self.days.get(index as usize))
    }

    pub fn completed_days(&self) -> u32 {
        self.days.iter().filter(|cell| cell.completed).count() as u32
    }

    /// Fraction of the month's days marked completed, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.completed_days() as f64 / self.days.len() as f64
    }

    pub fn progress_label(&self) -> String {
        format!(
            "Progress: {}/{} days completed ({:.1}%)",
            self.completed_days(),
            self.days_in_month(),
            self.progress() * 100.0
        )
    }

    /// Heading such as "March 2024"
    pub fn title(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");
        format!("{} {}", name, self.year)
    }

    /// Rows of seven Monday-first columns, blank where no day falls
    pub fn weeks(&self) -> Vec<[Option<DayCell>; 7]> {
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut column = self.first_weekday_offset as usize;

        for cell in &self.days {
            week[column] = Some(*cell);
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }

        weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn read_habit() -> HabitRecord {
        HabitRecord::new(HabitName::new("Read").unwrap())
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2, 2024).unwrap(), 29);
        assert_eq!(days_in_month(2, 2023).unwrap(), 28);
        assert_eq!(days_in_month(2, 2100).unwrap(), 28);
        assert_eq!(days_in_month(4, 2024).unwrap(), 30);
        assert_eq!(days_in_month(12, 2024).unwrap(), 31);
        assert!(matches!(days_in_month(13, 2024), Err(DomainError::InvalidDate(_))));
        assert!(days_in_month(0, 2024).is_err());
    }

    #[test]
    fn test_projection_length_matches_month() {
        let record = read_habit();
        for (month, year, expected) in [(2, 2024, 29), (2, 2023, 28), (1, 2024, 31), (11, 2024, 30)] {
            let grid = MonthGrid::project(&record, month, year).unwrap();
            assert_eq!(grid.days.len(), expected);
            assert_eq!(grid.days_in_month(), expected as u32);
            assert_eq!(grid.days.last().unwrap().day, expected as u32);
        }
    }

    #[test]
    fn test_missing_days_default_to_not_completed() {
        let mut record = read_habit();
        record.upsert(date(2024, 3, 1), true);
        record.upsert(date(2024, 3, 2), false);
        record.upsert(date(2024, 4, 1), true);

        let grid = MonthGrid::project(&record, 3, 2024).unwrap();
        assert!(grid.cell(1).unwrap().completed);
        assert!(!grid.cell(2).unwrap().completed);
        assert!(!grid.cell(3).unwrap().completed);
        assert_eq!(grid.completed_days(), 1);
        assert!(grid.cell(0).is_none());
        assert!(grid.cell(32).is_none());
    }

    #[test]
    fn test_first_weekday_offset() {
        // 2024-03-01 was a Friday, 2024-04-01 a Monday
        assert_eq!(first_weekday_offset(3, 2024).unwrap(), 4);
        assert_eq!(first_weekday_offset(4, 2024).unwrap(), 0);
        // 2023-10-01 was a Sunday
        assert_eq!(first_weekday_offset(10, 2023).unwrap(), 6);
    }

    #[test]
    fn test_weeks_layout() {
        let grid = MonthGrid::project(&read_habit(), 3, 2024).unwrap();
        let weeks = grid.weeks();

        // 4 blanks + 31 days = 35 cells
        assert_eq!(weeks.len(), 5);
        assert!(weeks[0][..4].iter().all(Option::is_none));
        assert_eq!(weeks[0][4].unwrap().day, 1);
        assert_eq!(weeks[4][6].unwrap().day, 31);

        // February 2021 starts on Monday and fills exactly four rows
        let grid = MonthGrid::project(&read_habit(), 2, 2021).unwrap();
        assert_eq!(grid.weeks().len(), 4);
    }

    #[test]
    fn test_progress_and_title() {
        let mut record = read_habit();
        for day in 1..=10 {
            record.upsert(date(2024, 4, day), true);
        }
        let grid = MonthGrid::project(&record, 4, 2024).unwrap();

        assert_eq!(grid.title(), "April 2024");
        assert_eq!(grid.completed_days(), 10);
        assert!((grid.progress() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(grid.progress_label(), "Progress: 10/30 days completed (33.3%)");
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(MonthGrid::project(&read_habit(), 13, 2024).is_err());
        assert!(first_weekday_offset(0, 2024).is_err());
    }
}
