//! Header synonym resolution
//!
//! Maps raw header spellings onto canonical user fields. Header resolution and
//! per-row assignment both use [`resolve_header`], so the two can never
//! disagree about which column feeds which field.

use crate::app::models::CanonicalField;
use crate::constants::HEADER_SYNONYMS;
use std::fmt;

/// A resolved CSV column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// Column feeding a known user field
    Canonical(CanonicalField),
    /// Unknown column, kept under its lower-cased header name
    Extra(String),
}

impl Column {
    /// Name reported in summaries (canonical name or lower-cased header)
    pub fn name(&self) -> &str {
        match self {
            Column::Canonical(field) => field.as_str(),
            Column::Extra(name) => name,
        }
    }

    pub fn canonical(&self) -> Option<CanonicalField> {
        match self {
            Column::Canonical(field) => Some(*field),
            Column::Extra(_) => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a raw header to a column, case-insensitively
pub fn resolve_header(raw: &str) -> Column {
    let lowered = raw.trim().to_lowercase();

    match lookup_synonym(&lowered) {
        Some(field) => Column::Canonical(field),
        None => Column::Extra(lowered),
    }
}

/// Look up a lower-cased header in the synonym table
pub fn lookup_synonym(lowered: &str) -> Option<CanonicalField> {
    HEADER_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&lowered))
        .and_then(|(canonical, _)| CanonicalField::from_name(canonical))
}
