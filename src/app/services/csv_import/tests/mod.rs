//! Test utilities for the CSV import pipeline
//!
//! This module provides sample CSV content and helpers shared by the
//! component test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use super::header::HeaderSet;

mod parser_tests;
mod record_parser_tests;

/// Header line covering every canonical field plus one pass-through column
pub const FULL_HEADER: &str = "username,firstName,lastName,email,populationId,enabled,department";

/// Helper to create a complete user CSV with a mix of good and bad rows
///
/// Line 3 has too few columns, line 5 has a bad boolean, line 6 fails
/// validation and line 7 is imported with warnings.
pub fn create_test_user_csv() -> String {
    r#"username,firstName,lastName,email,populationId,enabled,department
alice,Alice,Anderson,alice@example.com,pop-1,true,Sales
bob,Bob,Brown

carol,Carol,Clark,carol@example.com,pop-1,maybe,Support
dave,Dave,Davis,not-an-email,pop-2,1,Support
erin,,,,pop-2,0,
"#
    .to_string()
}

/// Helper to create the smallest importable CSV
pub fn create_minimal_user_csv() -> String {
    "username\nalice\n".to_string()
}

/// Helper to resolve a header line that is known to be valid
pub fn headers(line: &str) -> HeaderSet {
    HeaderSet::resolve(line).unwrap()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
