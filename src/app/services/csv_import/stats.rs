//! Import result and summary structures
//!
//! This module provides the types handed back to callers after a run: the
//! valid records, per-row errors and warnings, and the aggregate summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use super::header::HeaderSet;
use crate::app::models::{RowErrorKind, UserRecord};

/// A data row excluded from the valid record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based line number in the source file
    pub row: usize,

    pub kind: RowErrorKind,

    /// Every error message for the row
    pub messages: Vec<String>,

    /// Advisory warnings the row also produced (validation failures only)
    pub warnings: Vec<String>,
}

/// An advisory warning on a row that was still imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    pub row: usize,
    pub message: String,
}

/// Aggregate statistics for one import run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSummary {
    /// Non-blank data lines seen after the header
    pub total_rows: usize,

    /// Rows that became valid records
    pub valid_users: usize,

    /// Rows reported in the error list
    pub invalid_rows: usize,

    /// Warnings attached to imported rows
    pub warnings_count: usize,

    pub missing_required_headers: BTreeSet<String>,

    pub missing_recommended_headers: BTreeSet<String>,

    /// Resolved column names in file order
    pub available_headers: Vec<String>,
}

impl IngestionSummary {
    /// Fold the outcome of a run into a summary
    pub fn compute(
        headers: &HeaderSet,
        total_rows: usize,
        records: &[UserRecord],
        errors: &[RowError],
        warnings: &[RowWarning],
    ) -> Self {
        Self {
            total_rows,
            valid_users: records.len(),
            invalid_rows: errors.len(),
            warnings_count: warnings.len(),
            missing_required_headers: headers.missing_required.clone(),
            missing_recommended_headers: headers.missing_recommended.clone(),
            available_headers: headers.available_headers(),
        }
    }

    /// Calculate the share of rows imported as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.valid_users as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check whether every row was imported
    pub fn is_successful(&self) -> bool {
        self.total_rows > 0 && self.invalid_rows == 0
    }
}

/// Everything produced by one successful import run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionResult {
    /// Valid records, in file order
    pub records: Vec<UserRecord>,

    pub summary: IngestionSummary,

    pub errors: Vec<RowError>,

    pub warnings: Vec<RowWarning>,

    /// File the text came from, when ingested from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(rename = "parsedAt")]
    pub parsed_at: DateTime<Utc>,
}

impl IngestionResult {
    /// Check whether any row needs attention
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Serialize the valid records as the upload payload
    pub fn records_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| crate::Error::serialization("Failed to encode user records", e))
    }
}
