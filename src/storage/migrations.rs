/// Database migration management
///
/// This module creates and updates the SQLite schema of the sheet database.
/// The sheet is a single table of text cells mirroring the spreadsheet
/// columns, so rows keep exactly the format they had in the original sheet.

use rusqlite::Connection;
use crate::storage::StorageError;

/// Current database schema version
///
/// Increment this when you add new migrations
const CURRENT_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This creates all required tables if they don't exist and records the
/// schema version for future migrations.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version = get_current_version(conn)?;

    if current_version < CURRENT_VERSION {
        run_migrations(conn, current_version)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Get the current database schema version (0 for a fresh database)
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get::<_, i32>(0)
        })
        .unwrap_or(0);

    Ok(version)
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

fn run_migrations(conn: &Connection, from_version: i32) -> Result<(), StorageError> {
    if from_version < 1 {
        migration_v1(conn)?;
    }

    Ok(())
}

/// Migration to version 1: the sheet table
///
/// Cells are nullable TEXT on purpose: rows imported from a spreadsheet can
/// have empty or garbage cells, and those are dealt with at load time.
fn migration_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sheet_rows (
            row_number INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT,
            habit TEXT,
            completed TEXT
        )",
        [],
    )
    .map_err(|e| StorageError::Migration(format!("Failed to create sheet_rows: {}", e)))?;

    tracing::info!("Applied migration v1: Created sheet schema");
    Ok(())
}
