use std::path::PathBuf;

use ironchef_core::FormatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("Integrity violation: {0}")]
    Integrity(String),
    #[error("Database file not found: {}", .0.display())]
    MissingDatabase(PathBuf),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Stored JSON is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Output directory does not exist: {}", .0.display())]
    MissingOutputDir(PathBuf),
    #[error("Theme must not be empty")]
    EmptyTheme,
    #[error("No episodes found for theme: {0}")]
    NoEpisodesForTheme(String),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
}
