//! Tests for single-row parsing

use super::super::record_parser::parse_row;
use super::{FULL_HEADER, headers};
use crate::Error;

#[test]
fn test_full_row_populates_typed_fields() {
    let header = headers(FULL_HEADER);
    let record = parse_row(
        "alice,Alice,Anderson,alice@example.com,pop-1,false,Sales",
        &header,
        2,
        false,
    )
    .unwrap();

    assert_eq!(record.username.as_deref(), Some("alice"));
    assert_eq!(record.first_name.as_deref(), Some("Alice"));
    assert_eq!(record.last_name.as_deref(), Some("Anderson"));
    assert_eq!(record.email.as_deref(), Some("alice@example.com"));
    assert_eq!(record.population_id.as_deref(), Some("pop-1"));
    assert_eq!(record.enabled, Some(false));
    assert_eq!(record.extra("department"), Some("Sales"));
}

#[test]
fn test_empty_enabled_defaults_to_true() {
    let header = headers("username,enabled");
    let record = parse_row("alice,", &header, 2, false).unwrap();
    assert_eq!(record.enabled, Some(true));
}

#[test]
fn test_absent_enabled_column_leaves_field_unset() {
    let header = headers("username");
    let record = parse_row("alice", &header, 2, false).unwrap();
    assert_eq!(record.enabled, None);
}

#[test]
fn test_invalid_boolean_cites_row_and_literal() {
    let header = headers("username,enabled");

    match parse_row("alice,maybe", &header, 5, false) {
        Err(Error::InvalidBooleanLiteral { row, literal }) => {
            assert_eq!(row, 5);
            assert_eq!(literal, "maybe");
        }
        other => panic!("Expected InvalidBooleanLiteral, got {:?}", other),
    }
}

#[test]
fn test_column_count_mismatch() {
    let header = headers("username,email,firstName");

    match parse_row("alice,alice@example.com", &header, 3, false) {
        Err(Error::ColumnCountMismatch {
            row,
            expected,
            found,
        }) => {
            assert_eq!(row, 3);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("Expected ColumnCountMismatch, got {:?}", other),
    }

    assert!(parse_row("a,b,c,d", &header, 4, false).is_err());
}

#[test]
fn test_username_defaults_to_email() {
    let header = headers("username,email");
    let record = parse_row(",bob@example.com", &header, 3, false).unwrap();

    assert_eq!(record.username.as_deref(), Some("bob@example.com"));
    assert_eq!(record.username, record.email);
}

#[test]
fn test_username_left_blank_without_email() {
    let header = headers("username,email");
    let record = parse_row(",", &header, 3, false).unwrap();

    assert_eq!(record.username.as_deref(), Some(""));
    assert_eq!(record.email.as_deref(), Some(""));
}

#[test]
fn test_quoted_values_with_commas() {
    let header = headers("username,lastName,title");
    let record = parse_row(r#"alice,"O""Brien","Manager, Sales""#, &header, 2, false).unwrap();

    assert_eq!(record.last_name.as_deref(), Some("O\"Brien"));
    assert_eq!(record.extra("title"), Some("Manager, Sales"));
}

#[test]
fn test_unterminated_quote_lenient_and_strict() {
    let header = headers("username,title");
    let line = r#"alice,"Manager"#;

    let lenient = parse_row(line, &header, 2, false).unwrap();
    assert_eq!(lenient.extra("title"), Some("Manager"));

    assert!(matches!(
        parse_row(line, &header, 2, true),
        Err(Error::UnterminatedQuote { row: 2 })
    ));
}

#[test]
fn test_later_duplicate_column_wins() {
    let header = headers("username,login");
    let record = parse_row("first,second", &header, 2, false).unwrap();
    assert_eq!(record.username.as_deref(), Some("second"));
}
