/// In-memory sheet
///
/// Keeps rows in a vector instead of a database. Useful for running a session
/// without touching disk and for seeding tests with hand-written rows.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::RecordStore;
use crate::storage::{store_from_rows, store_to_rows, LoadReport, PersistenceGateway, SheetRow, StorageError};

#[derive(Debug, Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<SheetRow>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet pre-filled with `rows`
    pub fn with_rows(rows: Vec<SheetRow>) -> Self {
        Self { rows: Mutex::new(rows) }
    }

    /// Snapshot of the current rows
    pub fn rows(&self) -> Vec<SheetRow> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl PersistenceGateway for MemorySheet {
    async fn load_all(&self) -> Result<LoadReport, StorageError> {
        let rows = self.rows();
        store_from_rows(&rows)
    }

    async fn save_all(&self, store: &RecordStore) -> Result<usize, StorageError> {
        let rows = store_to_rows(store);
        let written = rows.len();
        *self.rows.lock().unwrap_or_else(PoisonError::into_inner) = rows;
        Ok(written)
    }
}
