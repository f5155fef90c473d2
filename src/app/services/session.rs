//! Caller-owned holder for the most recent import result
//!
//! An upload step usually runs some time after the file was parsed. The
//! session keeps the last successful [`IngestionResult`] until it is taken or
//! the caller resets it (for example when leaving the import screen).

use std::path::Path;

use tracing::debug;

use super::csv_import::{CsvImporter, IngestionResult};
use crate::Result;

/// Import state for one caller
#[derive(Debug, Default)]
pub struct ImportSession {
    importer: CsvImporter,
    last: Option<IngestionResult>,
}

impl ImportSession {
    pub fn new(importer: CsvImporter) -> Self {
        Self {
            importer,
            last: None,
        }
    }

    /// Import text and remember the result; a failed run keeps the previous one
    pub fn ingest(&mut self, raw_text: &str) -> Result<&IngestionResult> {
        let result = self.importer.ingest(raw_text)?;
        Ok(self.store(result))
    }

    /// Import a file and remember the result; a failed run keeps the previous one
    pub async fn ingest_file(&mut self, path: &Path) -> Result<&IngestionResult> {
        let result = self.importer.ingest_file(path).await?;
        Ok(self.store(result))
    }

    /// The last successful result, if any
    pub fn last(&self) -> Option<&IngestionResult> {
        self.last.as_ref()
    }

    /// Hand the last result to the next step, leaving the session empty
    pub fn take(&mut self) -> Option<IngestionResult> {
        self.last.take()
    }

    /// Forget the last result
    pub fn reset(&mut self) {
        if self.last.take().is_some() {
            debug!("Cleared stored import result");
        }
    }

    fn store(&mut self, result: IngestionResult) -> &IngestionResult {
        debug!(
            "Storing import result with {} valid users",
            result.summary.valid_users
        );
        self.last.insert(result)
    }
}
