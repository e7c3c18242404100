//! Unified error hierarchy for HealthRS
//!
//! The scoring and recommendation functions are total and never fail. Errors
//! only come from the boundary: validating input, importing history files,
//! editing goals and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all HealthRS operations
#[derive(Debug, Error)]
pub enum HealthRsError {
    /// Metric sample rejected at the boundary
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// History import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Goal editing errors
    #[error("Goal error: {0}")]
    Goal(#[from] GoalError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid metric input, raised before a sample reaches the scoring path
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Duration or count below zero
    #[error("{field} cannot be negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    /// NaN or infinite value
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Value outside the accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Date not in YYYY-MM-DD form
    #[error("Malformed date '{input}', expected YYYY-MM-DD")]
    MalformedDate { input: String },
}

/// History import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// No importer handles the file extension
    #[error("Unsupported format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// File could not be parsed
    #[error("Parse error in {format}: {reason}")]
    ParseError { format: String, reason: String },

    /// A row parsed but failed validation
    #[error("Invalid sample at row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValidationError,
    },

    /// A required column is absent from the header
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },
}

/// Goal editing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoalError {
    #[error("Goal not found: {id}")]
    NotFound { id: String },

    #[error("Invalid target for {id}: {target}")]
    InvalidTarget { id: String, target: f64 },
}

/// Result type alias for HealthRS operations
pub type Result<T> = std::result::Result<T, HealthRsError>;

impl HealthRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HealthRsError::Validation(_) => ErrorSeverity::Warning,
            HealthRsError::Goal(_) => ErrorSeverity::Warning,
            HealthRsError::Import(ImportError::InvalidRow { .. }) => ErrorSeverity::Warning,
            HealthRsError::Import(_) => ErrorSeverity::Error,
            HealthRsError::Configuration(_) => ErrorSeverity::Error,
            HealthRsError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            HealthRsError::Validation(ValidationError::OutOfRange { field, min, max, .. }) => {
                format!("Please enter a {} between {} and {}.", field, min, max)
            }
            HealthRsError::Validation(ValidationError::MalformedDate { input }) => {
                format!("'{}' is not a valid date. Use the YYYY-MM-DD format.", input)
            }
            HealthRsError::Validation(_) => {
                "Please fill in all the required fields with valid values.".to_string()
            }
            HealthRsError::Import(ImportError::UnsupportedFormat { path }) => {
                format!(
                    "Cannot read {}: only CSV and JSON history files are supported.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Rejected input; the session can continue
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
