//! Application-wide error types.

use covidash_charts::ChartError;
use covidash_common::DashError;
use covidash_config::ConfigError;
use std::path::PathBuf;

/// Fatal pipeline errors. Invalid widget values are not errors; they are
/// reported as [`crate::ValidationIssue`]s.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset could not be read or parsed.
    #[error("Dataset error: {0}")]
    Data(#[from] DashError),

    /// Chart handling failed outside of rendering.
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// Output file or directory could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Output {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Chart spec serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Wraps an I/O error on an output path.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

/// Result type for the dashboard application.
pub type AppResult<T> = Result<T, AppError>;
