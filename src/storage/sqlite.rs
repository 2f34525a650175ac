/// SQLite-backed sheet
///
/// Stores the sheet rows in a local SQLite file. Saving clears the table and
/// rewrites every row inside one transaction, so a failed save leaves the
/// previous contents in place.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::domain::RecordStore;
use crate::storage::{migrations, store_from_rows, store_to_rows, LoadReport, PersistenceGateway, SheetRow, StorageError};

/// Sheet persisted in a SQLite database file
pub struct SqliteSheet {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteSheet {
    /// Open (or create) the sheet database at `db_path`
    ///
    /// Runs any pending migrations before returning.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite sheet initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path.to_path_buf()),
        })
    }

    /// Sheet that lives only as long as this value (for testing)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("Sheet connection lock poisoned".to_string()))
    }

    /// All stored rows in insertion order, cells exactly as stored
    pub fn read_rows(&self) -> Result<Vec<SheetRow>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT date, habit, completed FROM sheet_rows ORDER BY row_number"
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SheetRow {
                    date: row.get(0)?,
                    habit: row.get(1)?,
                    completed: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Replace the table contents with `rows`
    pub fn write_rows(&self, rows: &[SheetRow]) -> Result<(), StorageError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM sheet_rows", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sheet_rows (date, habit, completed) VALUES (?1, ?2, ?3)"
            )?;
            for row in rows {
                stmt.execute(params![row.date, row.habit, row.completed])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for SqliteSheet {
    async fn load_all(&self) -> Result<LoadReport, StorageError> {
        let rows = self.read_rows()?;
        let report = store_from_rows(&rows)?;

        tracing::debug!(
            "Loaded {} habits ({} entries) from {} rows, {} skipped",
            report.habits(),
            report.entries(),
            rows.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    async fn save_all(&self, store: &RecordStore) -> Result<usize, StorageError> {
        let rows = store_to_rows(store);
        self.write_rows(&rows)?;

        tracing::debug!("Saved {} rows for {} habits", rows.len(), store.len());
        Ok(rows.len())
    }
}
