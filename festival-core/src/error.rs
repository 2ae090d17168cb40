//! Error types for the festival API.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures produced while reading and validating the dataset source.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Backing file is missing or unreadable
    #[error("Dataset source not found: {}: {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON
    #[error("Malformed dataset source: {0}")]
    MalformedSource(#[source] serde_json::Error),

    /// Valid JSON, but required keys are missing or have the wrong shape
    #[error("Dataset schema mismatch: {0}")]
    SchemaMismatch(#[source] serde_json::Error),
}

impl LoadError {
    /// Classify a JSON decoding failure as a syntax or a shape problem.
    pub fn from_json(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => LoadError::SchemaMismatch(err),
            _ => LoadError::MalformedSource(err),
        }
    }
}

/// Errors that can occur while serving festival queries.
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Bad request parameter
    #[error("{0}")]
    InvalidArgument(String),

    /// Lookup miss
    #[error("{0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidArgument(_) => 400,
            Error::NotFound(_) => 404,
            _ => 500,
        }
    }
}
