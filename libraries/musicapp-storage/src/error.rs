/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A startup invariant does not hold
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Catalog error raised while checking invariants
    #[error(transparent)]
    Catalog(#[from] musicapp_core::CatalogError),
}

impl From<StorageError> for musicapp_core::CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Catalog(inner) => inner,
            other => musicapp_core::CatalogError::storage(other.to_string()),
        }
    }
}
