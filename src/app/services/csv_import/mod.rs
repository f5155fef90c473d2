//! CSV import pipeline for bulk user files
//!
//! This module turns the raw text of a user CSV export into validated user
//! records plus a run summary. Row-level problems never abort a run; they are
//! collected and reported with the line number they came from.
//!
//! ## Architecture
//!
//! The pipeline is organized into logical components:
//! - [`tokenizer`] - Quote-aware splitting of a single CSV line
//! - [`column_mapping`] - Header synonym table lookups
//! - [`header`] - Header line resolution and required-column gate
//! - [`field_parsers`] - Per-field coercion helpers (`enabled` booleans)
//! - [`record_parser`] - Building a [`UserRecord`](crate::UserRecord) from one data row
//! - [`validator`] - Required-field and format rules per record
//! - [`parser`] - Run orchestration, file reading and the size cap
//! - [`stats`] - Result, summary and per-row report structures
//!
//! ## Usage
//!
//! ```rust
//! use bulk_user_import::{CsvImporter, ImportConfig};
//!
//! # fn example() -> bulk_user_import::Result<()> {
//! let importer = CsvImporter::new(ImportConfig::default());
//! let result = importer.ingest("username,email\nalice,alice@example.com\n")?;
//!
//! println!("Parsed {} users from {} rows",
//!          result.summary.valid_users,
//!          result.summary.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod tokenizer;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{Column, resolve_header};
pub use header::HeaderSet;
pub use parser::CsvImporter;
pub use record_parser::parse_row;
pub use stats::{IngestionResult, IngestionSummary, RowError, RowWarning};
pub use tokenizer::{TokenizedLine, tokenize, tokenize_line};
pub use validator::validate_record;
