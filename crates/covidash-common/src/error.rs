//! Error types shared across the workspace.

use thiserror::Error;

/// Result type alias for covidash operations.
pub type Result<T> = std::result::Result<T, DashError>;

/// Main error type for covidash operations.
///
/// The aggregation engine never produces these; they cover the I/O and
/// parsing around it.
#[derive(Error, Debug)]
pub enum DashError {
    /// A metric name outside `cases`, `deaths`, `recovered`.
    #[error("Unknown metric: {0} (expected cases, deaths or recovered)")]
    UnknownMetric(String),

    /// The dataset could not be read or parsed.
    #[error("Dataset error: {message}")]
    Dataset {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashError {
    /// Create a new dataset error.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new dataset error with source.
    pub fn dataset_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Dataset {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}
