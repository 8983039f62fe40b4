//! Error types for urbesense operations.
//!
//! The scoring core is total over individual values: out-of-range or
//! malformed readings are clamped or defaulted and never produce an error.
//! The only failure the core surfaces is a structurally invalid table,
//! reported as [`Error::MissingColumns`] before any row is touched.
//!
//! The remaining variants belong to collaborator glue (configuration files,
//! CSV and JSON encoding) and wrap their underlying errors transparently.
//!
//! # Example
//!
//! ```rust
//! use urbesense::errors::Error;
//!
//! let err = Error::missing_columns(&["temperature"], &["co2", "noise", "temperature", "safety"]);
//! assert!(err.to_string().contains("temperature"));
//! ```

use thiserror::Error;

/// Main error type for urbesense operations
#[derive(Debug, Error)]
pub enum Error {
    /// A table is missing one or more required columns
    #[error("missing required columns: {missing:?}; expected columns: {expected:?}")]
    MissingColumns {
        missing: Vec<String>,
        expected: Vec<String>,
    },

    /// A column was added whose length does not match the table
    #[error("column '{column}' has {found} values but the table has {expected} rows")]
    ShapeMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing-columns error from the missing and expected column names.
    pub fn missing_columns<S: AsRef<str>>(missing: &[S], expected: &[S]) -> Self {
        Self::MissingColumns {
            missing: missing.iter().map(|c| c.as_ref().to_string()).collect(),
            expected: expected.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias for urbesense operations
pub type Result<T> = std::result::Result<T, Error>;
