//! Error types and exit codes for tagwise
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, failed lookup)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for TagwiseError {
    fn from(err: rusqlite::Error) -> Self {
        TagwiseError::lookup("sqlite", err)
    }
}

/// Errors that can occur during tagwise operations
#[derive(Error, Debug)]
pub enum TagwiseError {
    // Vector math
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("weights sum to zero")]
    ZeroWeight,

    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("{store} lookup failed: {reason}")]
    LookupFailure { store: String, reason: String },

    #[error("store not found at {path:?} (run `tagwise init` first)")]
    StoreNotFound { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl TagwiseError {
    /// Create an error for a collaborator store that failed or returned bad data
    pub fn lookup(store: &str, error: impl std::fmt::Display) -> Self {
        TagwiseError::LookupFailure {
            store: store.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TagwiseError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TagwiseError::UsageError(_)
            | TagwiseError::InvalidValue { .. } => ExitCode::Usage,

            TagwiseError::LookupFailure { .. }
            | TagwiseError::StoreNotFound { .. } => ExitCode::Data,

            TagwiseError::DimensionMismatch { .. }
            | TagwiseError::ZeroWeight
            | TagwiseError::Io(_)
            | TagwiseError::Json(_)
            | TagwiseError::Toml(_)
            | TagwiseError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            TagwiseError::DimensionMismatch { .. } => "dimension_mismatch",
            TagwiseError::ZeroWeight => "zero_weight",
            TagwiseError::UsageError(_) => "usage_error",
            TagwiseError::InvalidValue { .. } => "invalid_value",
            TagwiseError::LookupFailure { .. } => "lookup_failure",
            TagwiseError::StoreNotFound { .. } => "store_not_found",
            TagwiseError::Io(_) => "io_error",
            TagwiseError::Json(_) => "json_error",
            TagwiseError::Toml(_) => "toml_error",
            TagwiseError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for tagwise operations
pub type Result<T> = std::result::Result<T, TagwiseError>;
