//! Core CSV import orchestration
//!
//! This module drives one import run: reading the input under the size cap,
//! splitting lines, resolving the header and parsing, validating and
//! classifying every data row.

use std::path::Path;

use chrono::Utc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

use super::header::HeaderSet;
use super::record_parser::parse_row;
use super::stats::{IngestionResult, IngestionSummary, RowError, RowWarning};
use super::validator::validate_record;
use crate::app::models::{CanonicalField, RowErrorKind, UserRecord};
use crate::config::ImportConfig;
use crate::constants::UTF8_BOM;
use crate::{Error, Result};

/// CSV importer for bulk user files
///
/// The importer holds configuration only; each call is an independent run
/// and nothing carries over between calls. Keep the last result with
/// [`ImportSession`](crate::ImportSession) if a later step needs it.
#[derive(Debug, Clone, Default)]
pub struct CsvImporter {
    config: ImportConfig,
}

impl CsvImporter {
    /// Create a new importer with the given configuration
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Read a CSV file to completion and import it
    pub async fn ingest_file(&self, file_path: &Path) -> Result<IngestionResult> {
        info!("Importing user CSV file: {}", file_path.display());

        let metadata = tokio::fs::metadata(file_path).await.map_err(|e| {
            Error::io(format!("Failed to stat file {}", file_path.display()), e)
        })?;
        self.check_size(metadata.len())?;

        let file = tokio::fs::File::open(file_path).await.map_err(|e| {
            Error::io(format!("Failed to open file {}", file_path.display()), e)
        })?;

        let mut result = self.ingest_reader(file).await?;
        result.source = Some(file_path.display().to_string());
        Ok(result)
    }

    /// Read any async source to completion and import it
    ///
    /// At most one byte past the size cap is read before giving up.
    pub async fn ingest_reader<R>(&self, reader: R) -> Result<IngestionResult>
    where
        R: AsyncRead + Unpin,
    {
        let limit = self.config.max_file_bytes;
        let mut bytes = Vec::new();
        reader
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| Error::io("Failed to read CSV input", e))?;
        self.check_size(bytes.len() as u64)?;

        let text = String::from_utf8(bytes).map_err(|e| {
            Error::io(
                "CSV input is not valid UTF-8",
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

        self.ingest(&text)
    }

    /// Import CSV text already held in memory
    pub fn ingest(&self, raw_text: &str) -> Result<IngestionResult> {
        self.check_size(raw_text.len() as u64)?;

        let text = raw_text.strip_prefix(UTF8_BOM).unwrap_or(raw_text);
        let lines = non_blank_lines(text);

        let Some(((header_row, header_line), data_lines)) = lines.split_first() else {
            return Err(Error::EmptyInput);
        };

        // Header gate first: a file without a username column fails the same
        // way whether or not any data rows follow
        let headers = HeaderSet::resolve(header_line)?;
        if self.config.strict_quotes && headers.unterminated_quote {
            return Err(Error::unterminated_quote(*header_row));
        }

        if data_lines.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for &(row, line) in data_lines {
            let mut record = match parse_row(line, &headers, row, self.config.strict_quotes) {
                Ok(record) => record,
                Err(e) => match RowErrorKind::from_error(&e) {
                    Some(kind) => {
                        debug!("Skipped row {}: {}", row, e);
                        errors.push(RowError {
                            row,
                            kind,
                            messages: vec![e.to_string()],
                            warnings: Vec::new(),
                        });
                        continue;
                    }
                    None => return Err(e),
                },
            };

            self.apply_default_population(&mut record);

            let outcome = validate_record(&record, row);
            let is_valid = outcome.is_valid();
            let (row_errors, row_warnings) = outcome.into_parts();

            if is_valid {
                warnings.extend(row_warnings.into_iter().map(|message| RowWarning { row, message }));
                records.push(record);
            } else {
                debug!("Row {} failed validation: {:?}", row, row_errors);
                errors.push(RowError {
                    row,
                    kind: RowErrorKind::FieldValidationFailed,
                    messages: row_errors,
                    warnings: row_warnings,
                });
            }
        }

        let summary =
            IngestionSummary::compute(&headers, data_lines.len(), &records, &errors, &warnings);

        if summary.invalid_rows > 0 {
            warn!(
                "{} of {} rows could not be imported",
                summary.invalid_rows, summary.total_rows
            );
        }
        info!(
            "Parsed {} users from {} rows ({} warnings)",
            summary.valid_users, summary.total_rows, summary.warnings_count
        );

        Ok(IngestionResult {
            records,
            summary,
            errors,
            warnings,
            source: None,
            parsed_at: Utc::now(),
        })
    }

    fn check_size(&self, size_bytes: u64) -> Result<()> {
        if size_bytes > self.config.max_file_bytes {
            return Err(Error::file_too_large(
                size_bytes,
                self.config.max_file_bytes,
            ));
        }
        Ok(())
    }

    fn apply_default_population(&self, record: &mut UserRecord) {
        if let Some(population_id) = &self.config.default_population_id {
            if record.is_blank(CanonicalField::PopulationId) {
                record.population_id = Some(population_id.clone());
            }
        }
    }
}

/// Non-blank lines paired with their 1-based line numbers
fn non_blank_lines(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line))
        .collect()
}
