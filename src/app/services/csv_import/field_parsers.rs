//! Field coercion utilities for user CSV rows
//!
//! This module provides helpers for converting raw field text into typed
//! values with row-numbered errors.

use crate::constants::{DEFAULT_ENABLED, FALSE_LITERALS, TRUE_LITERALS};
use crate::{Error, Result};

/// Parse the `enabled` column
///
/// Empty means enabled; otherwise only the accepted true/false literals are
/// allowed (case-insensitive).
pub fn parse_enabled(value: &str, row_number: usize) -> Result<bool> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_ENABLED);
    }

    let lowered = trimmed.to_lowercase();
    if TRUE_LITERALS.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(Error::invalid_boolean_literal(row_number, trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_literals() {
        assert!(parse_enabled("true", 2).unwrap());
        assert!(parse_enabled("1", 2).unwrap());
        assert!(parse_enabled("TRUE", 2).unwrap());
        assert!(!parse_enabled("false", 2).unwrap());
        assert!(!parse_enabled("0", 2).unwrap());
        assert!(!parse_enabled(" False ", 2).unwrap());
    }

    #[test]
    fn test_empty_defaults_to_enabled() {
        assert!(parse_enabled("", 2).unwrap());
        assert!(parse_enabled("   ", 2).unwrap());
    }

    #[test]
    fn test_unknown_literal_cites_row_and_value() {
        match parse_enabled("maybe", 7) {
            Err(Error::InvalidBooleanLiteral { row, literal }) => {
                assert_eq!(row, 7);
                assert_eq!(literal, "maybe");
            }
            other => panic!("Expected InvalidBooleanLiteral, got {:?}", other),
        }

        assert!(parse_enabled("yes", 3).is_err());
    }
}
