//! Header line resolution
//!
//! This module resolves the first line of a user CSV into canonical columns and
//! enforces the required-column gate before any data row is parsed.

use std::collections::BTreeSet;
use tracing::{debug, warn};

use super::column_mapping::{Column, resolve_header};
use super::tokenizer::tokenize_line;
use crate::app::models::CanonicalField;
use crate::constants::{CSV_DELIMITER, RECOMMENDED_FIELDS, REQUIRED_FIELDS};
use crate::{Error, Result};

/// Resolved header row of one import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    /// Resolved columns in file order
    pub columns: Vec<Column>,

    /// Header strings as they appeared in the file (trimmed, unquoted)
    pub raw_headers: Vec<String>,

    /// Required canonical fields with no matching column
    pub missing_required: BTreeSet<String>,

    /// Recommended canonical fields with no matching column
    pub missing_recommended: BTreeSet<String>,

    /// Whether the header line ended inside a quoted field
    pub unterminated_quote: bool,
}

impl HeaderSet {
    /// Resolve a header line without applying the required-column gate
    pub fn analyze(header_line: &str) -> Self {
        let tokenized = tokenize_line(header_line, CSV_DELIMITER);
        let columns: Vec<Column> = tokenized.fields.iter().map(|h| resolve_header(h)).collect();

        let mut header_set = HeaderSet {
            columns,
            raw_headers: tokenized.fields,
            missing_required: BTreeSet::new(),
            missing_recommended: BTreeSet::new(),
            unterminated_quote: tokenized.unterminated_quote,
        };
        header_set.missing_required = header_set.missing_of(REQUIRED_FIELDS);
        header_set.missing_recommended = header_set.missing_of(RECOMMENDED_FIELDS);
        header_set
    }

    /// Resolve a header line, failing when a required column is absent
    pub fn resolve(header_line: &str) -> Result<Self> {
        let header_set = Self::analyze(header_line);

        if !header_set.missing_required.is_empty() {
            return Err(Error::missing_required_headers(
                header_set.missing_required.iter().cloned(),
            ));
        }

        if !header_set.missing_recommended.is_empty() {
            warn!(
                "CSV is missing recommended column(s): {}",
                header_set
                    .missing_recommended
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        debug!(
            "Resolved {:?} to {:?} ({} pass-through)",
            header_set.raw_headers,
            header_set.available_headers(),
            header_set.extra_column_count()
        );

        Ok(header_set)
    }

    /// Number of columns every data row must have
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names after resolution, in file order
    pub fn available_headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Check whether any column feeds the given canonical field
    pub fn has_field(&self, field: CanonicalField) -> bool {
        self.columns.iter().any(|c| c.canonical() == Some(field))
    }

    /// Canonical names from `names` that no column feeds
    fn missing_of(&self, names: &[&str]) -> BTreeSet<String> {
        names
            .iter()
            .filter(|name| !CanonicalField::from_name(name).is_some_and(|f| self.has_field(f)))
            .map(|name| name.to_string())
            .collect()
    }

    /// Count of pass-through columns
    pub fn extra_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c, Column::Extra(_)))
            .count()
    }
}
