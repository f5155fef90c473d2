//! Export command implementation
//!
//! Ingests a single CSV file and writes its valid users as the JSON array
//! accepted by the bulk import endpoint. Rejected rows are logged and left
//! out of the payload.

use super::shared::{ImportStats, load_configuration, setup_logging};
use crate::cli::args::ExportArgs;
use crate::{CsvImporter, Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Export command runner
pub async fn run_export(args: ExportArgs) -> Result<ImportStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Export arguments: {:?}", args);

    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if let Some(population_id) = &args.population_id {
        config = config.with_default_population(population_id.trim());
    }

    let importer = CsvImporter::new(config);
    let result = importer.ingest_file(&args.input).await?;

    for error in &result.errors {
        for message in &error.messages {
            warn!("Skipping row {} [{}]: {}", error.row, error.kind, message);
        }
    }

    let payload = result.records_json()?;
    tokio::fs::write(&args.output, payload.as_bytes())
        .await
        .map_err(|e| {
            Error::io(
                format!("Failed to write export file {}", args.output.display()),
                e,
            )
        })?;

    info!(
        "Exported {} user(s) to {}",
        result.records.len(),
        args.output.display()
    );

    let mut stats = ImportStats::default();
    stats.record(&result);
    stats.processing_time = start_time.elapsed();

    if !args.common.quiet {
        println!(
            "{} Exported {} of {} user(s) to {}",
            "✓".green().bold(),
            stats.valid_users,
            stats.total_rows,
            args.output.display()
        );
        if stats.invalid_rows > 0 {
            println!(
                "  {}",
                format!("{} row(s) skipped, run `validate` for details", stats.invalid_rows)
                    .yellow()
            );
        }
    }

    Ok(stats)
}
