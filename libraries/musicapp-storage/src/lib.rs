//! MusicApp Storage
//!
//! `SQLite` database layer for the MusicApp catalog server.
//!
//! This crate provides persistent storage for artists, albums, songs,
//! users and roles.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries and logic
//! - **One fetch per read**: nested views (artist → albums → songs) are one
//!   joined query folded into composed types, never per-child queries
//! - **Referential checks before writes**: creates and updates verify their
//!   parent exists and report a field error otherwise
//!
//! # Example
//!
//! ```rust,no_run
//! use musicapp_storage::{LocalStorageContext, create_pool, run_migrations};
//! use musicapp_core::{ArtistFilter, PageRequest, StorageContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://musicapp.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//!
//! // First page of artists
//! let page = storage
//!     .list_artists(&ArtistFilter::default(), PageRequest::new(None, None, 10, 100))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod query;
mod rows;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod chansons;
pub mod roles;
pub mod tokens;
pub mod users;

pub use context::LocalStorageContext;
pub use error::StorageError;

pub type Database = LocalStorageContext;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date. Migrations also seed the
/// `user`, `manager` and `admin` roles.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://musicapp.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true) // cascades depend on it
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
