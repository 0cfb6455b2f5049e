//! Error types for the notes backend

use thiserror::Error;

/// Failure talking to the note store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("connection unavailable: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}

/// Missing or malformed startup configuration. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing PORT environment variable. Set it in the .env file.")]
    MissingPort,
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
    #[error("DATABASE_URL uses unsupported scheme {0:?}; expected a SQLite path, sqlite:// URL or :memory:")]
    UnsupportedDatabaseUrl(String),
}
