//! Bulk User Import Library
//!
//! A Rust library for turning CSV exports of user accounts into validated
//! records ready for a bulk import into an identity platform.
//!
//! This library provides tools for:
//! - Tokenizing CSV lines with quoted fields and escaped quotes
//! - Resolving header synonyms to canonical user fields
//! - Parsing rows into typed user records with boolean coercion and defaults
//! - Validating records and collecting per-row errors and warnings
//! - Summarising each import run and exporting the valid records as JSON

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_import;
        pub mod session;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CanonicalField, RowErrorKind, UserRecord, ValidationOutcome};
pub use app::services::csv_import::{CsvImporter, HeaderSet, IngestionResult, IngestionSummary};
pub use app::services::session::ImportSession;
pub use config::ImportConfig;

/// Result type alias for the import pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CSV import operations
///
/// Whole-run errors abort an ingestion; row-scoped errors are caught by the
/// importer and reported per row (see [`Error::is_row_scoped`]).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input exceeds the configured size cap
    #[error("File too large: {size_bytes} bytes exceeds limit of {limit_bytes} bytes")]
    FileTooLarge { size_bytes: u64, limit_bytes: u64 },

    /// No data rows after the header
    #[error("CSV file must contain a header row and at least one data row")]
    EmptyInput,

    /// The header line lacks a mandatory column
    #[error("Missing required column(s): {}", missing.join(", "))]
    MissingRequiredHeaders { missing: Vec<String> },

    /// A data line has a different number of fields than the header
    #[error("Row {row}: expected {expected} columns but found {found}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The enabled column holds an unrecognised literal
    #[error("Row {row}: invalid value '{literal}' for enabled (expected true, false, 1 or 0)")]
    InvalidBooleanLiteral { row: usize, literal: String },

    /// A quoted field is still open at end of line (strict mode only)
    #[error("Row {row}: unterminated quoted field")]
    UnterminatedQuote { row: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file too large error
    pub fn file_too_large(size_bytes: u64, limit_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            limit_bytes,
        }
    }

    /// Create a missing required headers error
    pub fn missing_required_headers<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingRequiredHeaders {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a column count mismatch error
    pub fn column_count_mismatch(row: usize, expected: usize, found: usize) -> Self {
        Self::ColumnCountMismatch {
            row,
            expected,
            found,
        }
    }

    /// Create an invalid boolean literal error
    pub fn invalid_boolean_literal(row: usize, literal: impl Into<String>) -> Self {
        Self::InvalidBooleanLiteral {
            row,
            literal: literal.into(),
        }
    }

    /// Create an unterminated quote error
    pub fn unterminated_quote(row: usize) -> Self {
        Self::UnterminatedQuote { row }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors confined to one data row; the importer records these
    /// and moves on to the next line.
    pub fn is_row_scoped(&self) -> bool {
        RowErrorKind::from_error(self).is_some()
    }

    /// The 1-based line number a row-scoped error refers to
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::ColumnCountMismatch { row, .. }
            | Self::InvalidBooleanLiteral { row, .. }
            | Self::UnterminatedQuote { row } => Some(*row),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        let message = format!("Directory traversal failed: {}", error);
        match error.into_io_error() {
            Some(source) => Self::Io { message, source },
            None => Self::Configuration { message },
        }
    }
}
