/// Row codec for the sheet format
///
/// Each stored row is three text cells: the date as `DD/MM/YYYY`, the habit
/// name, and the literal `True` or `False`. These exact strings keep the
/// store readable by data written before this crate existed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{HabitName, RecordStore};
use crate::storage::StorageError;

/// Date format of the "Date" column
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Header row of the sheet
pub const SHEET_HEADER: [&str; 3] = ["Date", "Habit", "Completed"];

const TRUE_CELL: &str = "True";
const FALSE_CELL: &str = "False";

/// One raw sheet row; any cell may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub date: Option<String>,
    pub habit: Option<String>,
    pub completed: Option<String>,
}

impl SheetRow {
    pub fn new(date: &str, habit: &str, completed: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            habit: Some(habit.to_string()),
            completed: Some(completed.to_string()),
        }
    }

    fn cell(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("")
    }

    pub(crate) fn is_blank(&self) -> bool {
        [&self.date, &self.habit, &self.completed]
            .iter()
            .all(|cell| Self::cell(cell).trim().is_empty())
    }

    pub(crate) fn is_header(&self) -> bool {
        [Self::cell(&self.date), Self::cell(&self.habit), Self::cell(&self.completed)] == SHEET_HEADER
    }
}

/// Why a single row could not be decoded
///
/// Never fatal on its own: the row is skipped and loading continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRowError {
    #[error("row {row}: missing habit name")]
    MissingHabit { row: usize },

    #[error("row {row}: missing date")]
    MissingDate { row: usize },

    #[error("row {row}: bad date '{value}', expected DD/MM/YYYY")]
    BadDate { row: usize, value: String },
}

/// Outcome of decoding a full sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub store: RecordStore,
    /// Data rows read, header and blank rows excluded
    pub rows: usize,
    /// Rows that were skipped, with the reason
    pub skipped: Vec<MalformedRowError>,
}

impl LoadReport {
    pub fn habits(&self) -> usize {
        self.store.len()
    }

    pub fn entries(&self) -> usize {
        self.store.entry_count()
    }
}

/// Format a date for the "Date" column
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a "Date" cell
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Format a completed flag as the sheet's literal boolean
pub fn format_completed(completed: bool) -> &'static str {
    if completed { TRUE_CELL } else { FALSE_CELL }
}

/// Only the exact string "True" counts as completed; a missing cell is "False"
pub fn parse_completed(value: Option<&str>) -> bool {
    value.unwrap_or(FALSE_CELL) == TRUE_CELL
}

/// Decode one row into (habit, date, completed)
///
/// `index` is the 1-based data row number used in error messages.
pub fn decode_row(index: usize, row: &SheetRow) -> Result<(HabitName, NaiveDate, bool), MalformedRowError> {
    let habit = row
        .habit
        .as_deref()
        .and_then(|name| HabitName::new(name).ok())
        .ok_or(MalformedRowError::MissingHabit { row: index })?;

    let date_cell = row
        .date
        .as_deref()
        .filter(|cell| !cell.trim().is_empty())
        .ok_or(MalformedRowError::MissingDate { row: index })?;
    let date = parse_date(date_cell).ok_or_else(|| MalformedRowError::BadDate {
        row: index,
        value: date_cell.to_string(),
    })?;

    Ok((habit, date, parse_completed(row.completed.as_deref())))
}

/// Rebuild a record store from sheet rows
///
/// Blank rows and header rows are ignored. Malformed rows are skipped and
/// reported; the load only fails when there was at least one data row and
/// every data row was malformed.
pub fn store_from_rows<'a, I>(rows: I) -> Result<LoadReport, StorageError>
where
    I: IntoIterator<Item = &'a SheetRow>,
{
    let mut report = LoadReport::default();
    let mut data_rows = 0;

    for row in rows.into_iter().filter(|row| !row.is_blank() && !row.is_header()) {
        data_rows += 1;
        match decode_row(data_rows, row) {
            Ok((habit, date, completed)) => report.store.insert_loaded(habit, date, completed),
            Err(e) => {
                tracing::warn!("Skipping malformed sheet row: {}", e);
                report.skipped.push(e);
            }
        }
    }

    if data_rows > 0 && report.skipped.len() == data_rows {
        return Err(StorageError::AllRowsMalformed { rows: data_rows });
    }

    report.rows = data_rows;
    Ok(report)
}

/// Encode a record store as sheet data rows (no header)
///
/// Habits in name order, each habit's days in ascending date order. Habits
/// with no recorded days produce no rows.
pub fn store_to_rows(store: &RecordStore) -> Vec<SheetRow> {
    store
        .habits()
        .flat_map(|record| {
            record.iter().map(move |entry| {
                SheetRow::new(
                    &format_date(entry.date),
                    record.name.as_str(),
                    format_completed(entry.completed),
                )
            })
        })
        .collect()
}
