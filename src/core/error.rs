//! Error handling and error types for the nominal partition search.
//!
//! Every fallible operation in the crate returns [`Result`]. A search that
//! finds no admissible partition is not an error; it is reported through a
//! `NaN` quality on the returned split.

use std::io;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Attribute has more nominal values than a bit mask can encode
    #[error("Size limit exceeded: {length} nominal values, at most {max} supported")]
    SizeLimit { length: usize, max: usize },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// A clustered item has no entry in the reference clustering
    #[error("Item {item} has no reference cluster")]
    MissingReference { item: String },

    /// Bookkeeping invariant violated inside an algorithm
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Type alias for Results using SplitError
pub type Result<T> = std::result::Result<T, SplitError>;

impl SplitError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SplitError::Config {
            message: message.into(),
        }
    }

    /// Create a size limit error
    pub fn size_limit(length: usize, max: usize) -> Self {
        SplitError::SizeLimit { length, max }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        SplitError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        SplitError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a missing reference error
    pub fn missing_reference<S: Into<String>>(item: S) -> Self {
        SplitError::MissingReference { item: item.into() }
    }

    /// Create an internal error (should be used sparingly)
    pub fn internal<S: Into<String>>(message: S) -> Self {
        SplitError::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SplitError::Config { .. } => false,
            // The caller can drop or re-bin the attribute and search the rest.
            SplitError::SizeLimit { .. } => true,
            SplitError::InvalidParameter { .. } => false,
            SplitError::DimensionMismatch { .. } => false,
            SplitError::MissingReference { .. } => false,
            SplitError::Internal { .. } => false,
            SplitError::IO { .. } => false,
            SplitError::Json { .. } => false,
            SplitError::Toml { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SplitError::Config { .. } => "config",
            SplitError::SizeLimit { .. } => "size_limit",
            SplitError::InvalidParameter { .. } => "invalid_parameter",
            SplitError::DimensionMismatch { .. } => "dimension_mismatch",
            SplitError::MissingReference { .. } => "missing_reference",
            SplitError::Internal { .. } => "internal",
            SplitError::IO { .. } => "io",
            SplitError::Json { .. } => "json",
            SplitError::Toml { .. } => "toml",
        }
    }
}

/// Convenience macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::SplitError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::SplitError::config(format!($fmt, $($arg)*))
    };
}

/// Returns early with the given error if the condition does not hold
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
