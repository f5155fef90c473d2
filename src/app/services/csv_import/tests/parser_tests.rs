//! Tests for the import orchestration

use super::*;
use crate::app::models::RowErrorKind;
use crate::app::services::csv_import::CsvImporter;
use crate::config::ImportConfig;
use crate::{Error, Result};

fn ingest(text: &str) -> Result<super::super::IngestionResult> {
    CsvImporter::default().ingest(text)
}

#[test]
fn test_email_fills_blank_username() {
    let result = ingest("username,email\nalice,alice@x.com\n,bob@x.com\n").unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[1].username.as_deref(), Some("bob@x.com"));
    assert_eq!(result.records[1].username, result.records[1].email);
    assert!(result.errors.is_empty());
}

#[test]
fn test_header_only_is_empty_input() {
    assert!(matches!(ingest("username\n"), Err(Error::EmptyInput)));
    assert!(matches!(ingest("Login,Mail\n"), Err(Error::EmptyInput)));
    assert!(matches!(ingest("username\n\n   \n"), Err(Error::EmptyInput)));
    assert!(matches!(ingest(""), Err(Error::EmptyInput)));
    assert!(matches!(ingest("\n  \n\n"), Err(Error::EmptyInput)));
}

#[test]
fn test_header_without_username_fails_even_without_rows() {
    match ingest("email\n") {
        Err(Error::MissingRequiredHeaders { missing }) => {
            assert_eq!(missing, vec!["username".to_string()]);
        }
        other => panic!("Expected MissingRequiredHeaders, got {:?}", other),
    }

    assert!(matches!(
        ingest("firstName,lastName\n\n  \n"),
        Err(Error::MissingRequiredHeaders { .. })
    ));
}

#[test]
fn test_missing_username_column_aborts_run() {
    match ingest("email\nalice@x.com\n") {
        Err(Error::MissingRequiredHeaders { missing }) => {
            assert_eq!(missing, vec!["username".to_string()]);
        }
        other => panic!("Expected MissingRequiredHeaders, got {:?}", other),
    }

    let many_rows = format!("email,firstName\n{}", "a@b.co,A\n".repeat(50));
    assert!(matches!(
        ingest(&many_rows),
        Err(Error::MissingRequiredHeaders { .. })
    ));
}

#[test]
fn test_bad_boolean_row_is_reported() {
    let result = ingest("username,enabled\nalice,maybe\n").unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.errors.len(), 1);

    let error = &result.errors[0];
    assert_eq!(error.row, 2);
    assert_eq!(error.kind, RowErrorKind::InvalidBooleanLiteral);
    assert!(error.messages[0].contains("maybe"));
}

#[test]
fn test_blank_recommended_fields_warn_but_import() {
    let result = ingest("username,firstName,lastName,email\nalice,,,\n").unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.warnings.len(), 3);
    assert!(result.warnings.iter().all(|w| w.row == 2));
    assert_eq!(result.summary.warnings_count, 3);
    assert!(result.errors.is_empty());
}

#[test]
fn test_mixed_file_partial_failure() {
    let result = ingest(&create_test_user_csv()).unwrap();

    let usernames: Vec<_> = result
        .records
        .iter()
        .map(|r| r.username.as_deref().unwrap())
        .collect();
    assert_eq!(usernames, vec!["alice", "erin"]);

    let rows: Vec<(usize, RowErrorKind)> = result.errors.iter().map(|e| (e.row, e.kind)).collect();
    assert_eq!(
        rows,
        vec![
            (3, RowErrorKind::ColumnCountMismatch),
            (5, RowErrorKind::InvalidBooleanLiteral),
            (6, RowErrorKind::FieldValidationFailed),
        ]
    );

    assert_eq!(result.summary.total_rows, 5);
    assert_eq!(result.summary.valid_users, 2);
    assert_eq!(result.summary.invalid_rows, 3);
    assert_eq!(result.summary.warnings_count, 3);
    assert!(result.warnings.iter().all(|w| w.row == 7));
}

#[test]
fn test_validation_failures_keep_their_warnings() {
    let result = ingest("username,firstName,email\nbad user,,not-an-email\n").unwrap();

    let error = &result.errors[0];
    assert_eq!(error.kind, RowErrorKind::FieldValidationFailed);
    assert_eq!(error.messages.len(), 2);
    assert_eq!(error.warnings.len(), 2);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_partial_failure_counts() {
    let mut text = String::from("username,enabled\n");
    let mut malformed = 0;
    for i in 0..40 {
        if i % 5 == 0 {
            text.push_str(&format!("user{},perhaps\n", i));
            malformed += 1;
        } else if i % 7 == 0 {
            text.push_str(&format!("user{},true,extra\n", i));
            malformed += 1;
        } else {
            text.push_str(&format!("user{},1\n", i));
        }
    }

    let result = ingest(&text).unwrap();
    assert_eq!(result.records.len(), 40 - malformed);
    assert_eq!(result.errors.len(), malformed);
    assert_eq!(result.summary.total_rows, 40);
}

#[test]
fn test_row_numbers_follow_original_lines() {
    let result = ingest("\nusername,enabled\n\nalice,1\n\n\nbob,nope\r\ncarol,0\r\n").unwrap();

    assert_eq!(result.errors[0].row, 7);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[1].enabled, Some(false));
    assert_eq!(result.summary.total_rows, 3);
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let result = ingest("\u{feff}username,email\nalice,alice@example.com\n").unwrap();

    assert!(result.summary.missing_required_headers.is_empty());
    assert_eq!(result.records[0].username.as_deref(), Some("alice"));
}

#[test]
fn test_summary_reports_headers() {
    let result = ingest("Login,Mail,Department\nalice,alice@example.com,Sales\n").unwrap();

    assert_eq!(
        result.summary.available_headers,
        vec!["username", "email", "department"]
    );
    let missing: Vec<&str> = result
        .summary
        .missing_recommended_headers
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(missing, vec!["firstName", "lastName"]);
    assert_eq!(result.records[0].extra("department"), Some("Sales"));
}

#[test]
fn test_default_population_fills_blanks_only() {
    let importer =
        CsvImporter::new(ImportConfig::default().with_default_population("pop-default"));
    let result = importer
        .ingest("username,populationId\nalice,\nbob,pop-own\n")
        .unwrap();

    assert_eq!(result.records[0].population_id.as_deref(), Some("pop-default"));
    assert_eq!(result.records[1].population_id.as_deref(), Some("pop-own"));

    let no_column = importer.ingest("username\ncarol\n").unwrap();
    assert_eq!(
        no_column.records[0].population_id.as_deref(),
        Some("pop-default")
    );
}

#[test]
fn test_strict_quotes() {
    let text = "username,title\nalice,\"Boss\nbob,Clerk\n";

    let lenient = ingest(text).unwrap();
    assert_eq!(lenient.records.len(), 2);

    let strict = CsvImporter::new(ImportConfig::default().with_strict_quotes())
        .ingest(text)
        .unwrap();
    assert_eq!(strict.records.len(), 1);
    assert_eq!(strict.errors[0].kind, RowErrorKind::UnterminatedQuote);
    assert_eq!(strict.errors[0].row, 2);

    let bad_header = CsvImporter::new(ImportConfig::default().with_strict_quotes())
        .ingest("username,\"title\nalice,x\n");
    assert!(matches!(bad_header, Err(Error::UnterminatedQuote { row: 1 })));
}

#[test]
fn test_size_cap_applies_to_text() {
    let importer = CsvImporter::new(ImportConfig::default().with_max_file_bytes(16));

    match importer.ingest("username\nalice\nbob\ncarol\n") {
        Err(Error::FileTooLarge {
            size_bytes,
            limit_bytes,
        }) => {
            assert_eq!(size_bytes, 25);
            assert_eq!(limit_bytes, 16);
        }
        other => panic!("Expected FileTooLarge, got {:?}", other),
    }

    assert!(importer.ingest("username\nalice\n").is_ok());
}

#[tokio::test]
async fn test_ingest_file_records_source() {
    let temp_file = create_temp_file(&create_test_user_csv());

    let result = CsvImporter::default()
        .ingest_file(temp_file.path())
        .await
        .unwrap();

    assert_eq!(result.summary.valid_users, 2);
    assert_eq!(
        result.source.as_deref(),
        Some(temp_file.path().display().to_string().as_str())
    );
}

#[tokio::test]
async fn test_ingest_file_over_limit() {
    let temp_file = create_temp_file(&create_test_user_csv());
    let importer = CsvImporter::new(ImportConfig::default().with_max_file_bytes(32));

    assert!(matches!(
        importer.ingest_file(temp_file.path()).await,
        Err(Error::FileTooLarge { limit_bytes: 32, .. })
    ));
}

#[tokio::test]
async fn test_ingest_missing_file_is_io_error() {
    let result = CsvImporter::default()
        .ingest_file(std::path::Path::new("/nonexistent/users.csv"))
        .await;
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[tokio::test]
async fn test_ingest_reader_rejects_invalid_utf8() {
    let bytes: &[u8] = b"username\n\xff\xfe\n";
    let result = CsvImporter::default().ingest_reader(bytes).await;
    assert!(matches!(result, Err(Error::Io { .. })));

    let content = create_minimal_user_csv();
    let result = CsvImporter::default()
        .ingest_reader(content.as_bytes())
        .await
        .unwrap();
    assert_eq!(result.records.len(), 1);
}
