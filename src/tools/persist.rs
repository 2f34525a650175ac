/// Tools for explicit load and save
///
/// This module implements the habits_save and habits_load MCP tools. Both
/// operate on the whole store; nothing is persisted implicitly.

use serde::Serialize;

use crate::session::Session;
use crate::ServerError;

/// Response from a save or load
#[derive(Debug, Serialize)]
pub struct PersistResponse {
    pub habits: usize,
    /// Rows written by a save, or data rows read by a load
    pub rows: usize,
    /// Malformed rows skipped during a load (always 0 for saves)
    pub skipped_rows: usize,
    pub message: String,
}

/// Write every habit to the sheet
///
/// On failure the session keeps its data, so the client can simply retry.
pub async fn save_habits(session: &Session) -> Result<PersistResponse, ServerError> {
    let rows = session.save().await?;
    let habits = session.store().len();

    Ok(PersistResponse {
        habits,
        rows,
        skipped_rows: 0,
        message: format!("💾 All data saved: {} habits, {} rows.", habits, rows),
    })
}

/// Discard in-memory changes and reload the sheet
pub async fn load_habits(session: &mut Session) -> Result<PersistResponse, ServerError> {
    let report = session.reload().await?;
    let skipped_rows = report.skipped.len();

    let mut message = format!(
        "Loaded {} habits ({} entries) from {} rows.",
        report.habits(),
        report.entries(),
        report.rows
    );
    if skipped_rows > 0 {
        message.push_str(&format!(" Skipped {} malformed rows.", skipped_rows));
    }

    Ok(PersistResponse {
        habits: report.habits(),
        rows: report.rows,
        skipped_rows,
        message,
    })
}
