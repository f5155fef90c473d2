//! Data models for bulk user imports
//!
//! This module contains the core data structures shared by the parsing,
//! validation and export stages: the canonical user fields, the typed user
//! record built from each CSV row, and the per-row validation outcome.

use crate::Error;
use crate::constants::{
    FIELD_EMAIL, FIELD_ENABLED, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_POPULATION_ID,
    FIELD_USERNAME,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Canonical Fields
// =============================================================================

/// User attributes the importer understands natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Username,
    FirstName,
    LastName,
    Email,
    PopulationId,
    Enabled,
}

impl CanonicalField {
    /// All canonical fields in their conventional column order
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Username,
        CanonicalField::FirstName,
        CanonicalField::LastName,
        CanonicalField::Email,
        CanonicalField::PopulationId,
        CanonicalField::Enabled,
    ];

    /// Canonical (camelCase) name used in summaries and exported JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Username => FIELD_USERNAME,
            CanonicalField::FirstName => FIELD_FIRST_NAME,
            CanonicalField::LastName => FIELD_LAST_NAME,
            CanonicalField::Email => FIELD_EMAIL,
            CanonicalField::PopulationId => FIELD_POPULATION_ID,
            CanonicalField::Enabled => FIELD_ENABLED,
        }
    }

    /// Look up a field by its exact canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// User Record
// =============================================================================

/// One user parsed from a CSV data row
///
/// Known columns land in typed fields; any other column is kept verbatim in
/// `extra_fields` under its lower-cased header name. Serializes to the flat
/// JSON object the upload endpoint expects, with absent fields omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Pass-through columns keyed by lower-cased header
    #[serde(flatten)]
    pub extra_fields: BTreeMap<String, String>,
}

impl UserRecord {
    /// Get the text value of a canonical field (`None` for `Enabled`)
    pub fn text(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Username => self.username.as_deref(),
            CanonicalField::FirstName => self.first_name.as_deref(),
            CanonicalField::LastName => self.last_name.as_deref(),
            CanonicalField::Email => self.email.as_deref(),
            CanonicalField::PopulationId => self.population_id.as_deref(),
            CanonicalField::Enabled => None,
        }
    }

    /// Set the text value of a canonical field; ignored for `Enabled`
    pub fn set_text(&mut self, field: CanonicalField, value: String) {
        let slot = match field {
            CanonicalField::Username => &mut self.username,
            CanonicalField::FirstName => &mut self.first_name,
            CanonicalField::LastName => &mut self.last_name,
            CanonicalField::Email => &mut self.email,
            CanonicalField::PopulationId => &mut self.population_id,
            CanonicalField::Enabled => return,
        };
        *slot = Some(value);
    }

    /// Get a canonical field value only when it holds non-whitespace text
    pub fn non_blank(&self, field: CanonicalField) -> Option<&str> {
        self.text(field).filter(|value| !value.trim().is_empty())
    }

    /// Check whether a canonical text field is absent or whitespace-only
    pub fn is_blank(&self, field: CanonicalField) -> bool {
        self.non_blank(field).is_none()
    }

    /// Get a pass-through column by header name (case-insensitive)
    pub fn extra(&self, header: &str) -> Option<&str> {
        self.extra_fields
            .get(&header.to_lowercase())
            .map(String::as_str)
    }
}

// =============================================================================
// Validation Outcome
// =============================================================================

/// Result of validating a single record
///
/// `is_valid` is derived from `errors` at construction and cannot drift from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Split into owned error and warning lists
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.warnings)
    }
}

// =============================================================================
// Row Error Classification
// =============================================================================

/// Why a data row was excluded from the valid record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowErrorKind {
    ColumnCountMismatch,
    InvalidBooleanLiteral,
    UnterminatedQuote,
    FieldValidationFailed,
}

impl RowErrorKind {
    /// Classify a row-scoped parse error; `None` for whole-run errors
    pub fn from_error(error: &Error) -> Option<Self> {
        match error {
            Error::ColumnCountMismatch { .. } => Some(Self::ColumnCountMismatch),
            Error::InvalidBooleanLiteral { .. } => Some(Self::InvalidBooleanLiteral),
            Error::UnterminatedQuote { .. } => Some(Self::UnterminatedQuote),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColumnCountMismatch => "ColumnCountMismatch",
            Self::InvalidBooleanLiteral => "InvalidBooleanLiteral",
            Self::UnterminatedQuote => "UnterminatedQuote",
            Self::FieldValidationFailed => "FieldValidationFailed",
        }
    }
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
