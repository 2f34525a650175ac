/// Main entry point for the Habit Streak Tracker MCP server
///
/// This file sets up logging, parses command line arguments, and starts the
/// server. Requests arrive as JSON-RPC over stdin/stdout following the MCP
/// protocol, so all logging goes to stderr.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use habit_streak_tracker::HabitTrackerServer;

/// Get the default sheet database path with a fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".habit_streaks")),
        dirs::data_dir().map(|p| p.join("habit_streaks")),
        dirs::config_dir().map(|p| p.join("habit_streaks")),
        std::env::current_dir().ok().map(|p| p.join(".habit_streaks")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Make sure the directory is actually writable
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("sheet.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_path = std::env::temp_dir().join("habit_streaks");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for sheet database: {}", temp_path.display());
    Ok(temp_path.join("sheet.db"))
}

/// Command line arguments for the Habit Streak Tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite sheet database
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Pin "today" to a fixed date (YYYY-MM-DD) instead of the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("habit_streak_tracker={}", log_level)))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting Habit Streak Tracker");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using sheet database at: {}", db_path.display());

    let server = HabitTrackerServer::new(&db_path, args.today).await?;
    server.run().await?;

    info!("Habit Streak Tracker shutdown complete");
    Ok(())
}
