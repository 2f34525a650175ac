/// Storage layer for persisting habit data
///
/// The record store is persisted as spreadsheet-style rows of
/// `(Date, Habit, Completed)` text cells. This module defines the gateway
/// interface, the row codec and the concrete sheet backends.

pub mod memory;
pub mod migrations;
pub mod rows;
pub mod sqlite;

// Re-export the main storage types
pub use memory::*;
pub use rows::*;
pub use sqlite::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::RecordStore;

/// Errors that can occur during load/save through a gateway
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Every one of the {rows} stored rows was malformed")]
    AllRowsMalformed { rows: usize },
}

/// Loads and saves the whole record store at once
///
/// Implementations return either a complete snapshot or an error; there is
/// no partial load. Retry policy, if any, belongs to the implementation.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Read every stored row and rebuild the record store
    async fn load_all(&self) -> Result<LoadReport, StorageError>;

    /// Replace everything stored with the contents of `store`
    ///
    /// Returns the number of data rows written.
    async fn save_all(&self, store: &RecordStore) -> Result<usize, StorageError>;
}
