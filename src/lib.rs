/// Public library interface for the Habit Streak Tracker
///
/// This module exports the record model (habits, entries, streaks, month
/// grids), the sheet persistence layer and the session/server types that
/// drive them.

use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

// Internal modules
mod domain;
mod mcp;
mod session;
mod storage;
pub mod tools;

// Re-export public modules and types
pub use domain::*;
pub use session::{Command, HabitView, Session};
pub use storage::{
    LoadReport, MalformedRowError, MemorySheet, PersistenceGateway, SheetRow, SqliteSheet, StorageError,
    store_from_rows, store_to_rows,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker server that exposes a session over the MCP protocol
///
/// Owns exactly one session; the sheet is loaded when the server is created
/// and only written back on an explicit save.
pub struct HabitTrackerServer {
    session: Session,
}

impl HabitTrackerServer {
    /// Create a server backed by the sheet database at `db_path`
    ///
    /// Opening the database file is required; loading its rows is not. If
    /// the rows cannot be loaded the session starts empty.
    pub async fn new(db_path: &Path, today: Option<NaiveDate>) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Streak Tracker with sheet database: {:?}", db_path);

        let sheet = SqliteSheet::open(db_path)?;
        let session = Session::open(Box::new(sheet)).await;

        Ok(Self::with_session(match today {
            Some(day) => session.with_today(day),
            None => session,
        }))
    }

    /// Wrap an already prepared session
    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Starting MCP server with {} habits loaded",
            self.session.store().len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
