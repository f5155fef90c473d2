//! Individual CSV row parsing for user imports
//!
//! This module builds a [`UserRecord`] from one data line, assigning each field
//! positionally through the resolved header columns.

use tracing::trace;

use super::column_mapping::Column;
use super::field_parsers::parse_enabled;
use super::header::HeaderSet;
use super::tokenizer::tokenize_line;
use crate::app::models::{CanonicalField, UserRecord};
use crate::constants::CSV_DELIMITER;
use crate::{Error, Result};

/// Parse a single data line into a user record
///
/// `row_number` is the 1-based line number in the source file and is cited by
/// every error. With `strict_quotes` a line ending inside a quoted field is
/// rejected instead of being accepted as-is.
pub fn parse_row(
    line: &str,
    headers: &HeaderSet,
    row_number: usize,
    strict_quotes: bool,
) -> Result<UserRecord> {
    let tokenized = tokenize_line(line, CSV_DELIMITER);

    if strict_quotes && tokenized.unterminated_quote {
        return Err(Error::unterminated_quote(row_number));
    }

    if tokenized.fields.len() != headers.len() {
        return Err(Error::column_count_mismatch(
            row_number,
            headers.len(),
            tokenized.fields.len(),
        ));
    }

    let mut record = UserRecord::default();

    for (column, value) in headers.columns.iter().zip(tokenized.fields) {
        match column {
            Column::Canonical(CanonicalField::Enabled) => {
                record.enabled = Some(parse_enabled(&value, row_number)?);
            }
            Column::Canonical(field) => record.set_text(*field, value),
            Column::Extra(name) => {
                record.extra_fields.insert(name.clone(), value);
            }
        }
    }

    apply_username_default(&mut record);

    trace!("Parsed row {}: {:?}", row_number, record.username);
    Ok(record)
}

/// Fall back to the email address when the username is blank
pub fn apply_username_default(record: &mut UserRecord) {
    if record.is_blank(CanonicalField::Username) {
        if let Some(email) = record.non_blank(CanonicalField::Email).map(str::to_string) {
            record.username = Some(email);
        }
    }
}
