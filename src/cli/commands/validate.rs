//! Validate command implementation
//!
//! Ingests each input file and reports, per file, which rows would be
//! imported, which were rejected and why, and which carry warnings.

use super::shared::{
    ImportStats, collect_input_files, create_progress_bar, load_configuration, setup_logging,
};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::{CsvImporter, Error, IngestionResult, Result};
use colored::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of ingesting one file for the report
enum FileReport {
    Ingested(IngestionResult),
    Rejected { path: PathBuf, error: Error },
}

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<ImportStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Validation arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args.common)?;
    let importer = CsvImporter::new(config);

    let files = collect_input_files(&args.paths)?;
    info!("Validating {} CSV file(s)", files.len());

    let progress_bar = (args.common.show_progress()
        && args.output_format == OutputFormat::Human
        && files.len() > 1)
        .then(|| create_progress_bar(files.len() as u64, "Validating files"));

    let mut stats = ImportStats::default();
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        if let Some(pb) = &progress_bar {
            pb.set_message(file_label(&path));
        }

        match importer.ingest_file(&path).await {
            Ok(result) => {
                stats.record(&result);
                reports.push(FileReport::Ingested(result));
            }
            // Whole-file rejections are reported; anything else stops the run
            Err(error) if is_file_rejection(&error) => {
                warn!("Rejected {}: {}", path.display(), error);
                stats.record_failure();
                reports.push(FileReport::Rejected { path, error });
            }
            Err(error) => return Err(error),
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    stats.processing_time = start_time.elapsed();

    match args.output_format {
        OutputFormat::Human => print_human_report(&reports, &stats, args.max_issues),
        OutputFormat::Json => print_json_report(&reports)?,
    }

    Ok(stats)
}

/// Errors that reject a single file without aborting a multi-file run
fn is_file_rejection(error: &Error) -> bool {
    matches!(
        error,
        Error::EmptyInput
            | Error::MissingRequiredHeaders { .. }
            | Error::FileTooLarge { .. }
            | Error::UnterminatedQuote { .. }
            | Error::Io { .. }
    )
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_human_report(reports: &[FileReport], stats: &ImportStats, max_issues: usize) {
    for report in reports {
        match report {
            FileReport::Ingested(result) => print_file_report(result, max_issues),
            FileReport::Rejected { path, error } => {
                println!("{} {}", "✗".red().bold(), path.display().to_string().bold());
                println!("  {}", error.to_string().red());
                println!();
            }
        }
    }

    println!("{}", "Summary".bold());
    println!("  Files:        {}", stats.files_processed + stats.files_failed);
    if stats.files_failed > 0 {
        println!(
            "  Rejected:     {}",
            stats.files_failed.to_string().red()
        );
    }
    println!("  Rows:         {}", stats.total_rows);
    println!(
        "  Valid users:  {} ({:.1}%)",
        stats.valid_users.to_string().green(),
        stats.success_rate()
    );
    if stats.invalid_rows > 0 {
        println!("  Invalid rows: {}", stats.invalid_rows.to_string().red());
    }
    if stats.warnings > 0 {
        println!("  Warnings:     {}", stats.warnings.to_string().yellow());
    }
    println!("  Time:         {:.2?}", stats.processing_time);
}

fn print_file_report(result: &IngestionResult, max_issues: usize) {
    let summary = &result.summary;
    let source = result.source.as_deref().unwrap_or("<input>");

    let marker = if summary.is_successful() {
        "✓".green().bold()
    } else {
        "!".yellow().bold()
    };
    println!("{} {}", marker, source.bold());
    println!(
        "  {} of {} rows valid, {} invalid, {} warnings",
        summary.valid_users, summary.total_rows, summary.invalid_rows, summary.warnings_count
    );

    if !summary.missing_recommended_headers.is_empty() {
        let missing: Vec<&str> = summary
            .missing_recommended_headers
            .iter()
            .map(String::as_str)
            .collect();
        println!(
            "  {}",
            format!("Missing recommended column(s): {}", missing.join(", ")).yellow()
        );
    }

    if !result.has_issues() {
        println!("  {}", "No row errors or warnings".green());
        println!();
        return;
    }

    let issue_count = result.errors.len() + result.warnings.len();
    for error in result.errors.iter().take(max_issues) {
        for message in &error.messages {
            println!(
                "  {} row {} [{}]: {}",
                "error".red(),
                error.row,
                error.kind,
                message
            );
        }
    }
    let remaining = max_issues.saturating_sub(result.errors.len());
    for warning in result.warnings.iter().take(remaining) {
        println!(
            "  {} row {}: {}",
            "warning".yellow(),
            warning.row,
            warning.message
        );
    }
    if issue_count > max_issues {
        println!(
            "  ... {} more issue(s) not shown",
            issue_count - max_issues
        );
    }

    println!();
}

fn print_json_report(reports: &[FileReport]) -> Result<()> {
    let entries = reports
        .iter()
        .map(|report| match report {
            FileReport::Ingested(result) => serde_json::to_value(result)
                .map_err(|e| Error::serialization("Failed to encode import result", e)),
            FileReport::Rejected { path, error } => Ok(json!({
                "source": path.display().to_string(),
                "error": error.to_string(),
            })),
        })
        .collect::<Result<Vec<Value>>>()?;

    let text = serde_json::to_string_pretty(&entries)
        .map_err(|e| Error::serialization("Failed to encode validation report", e))?;
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_rejections() {
        assert!(is_file_rejection(&Error::EmptyInput));
        assert!(is_file_rejection(&Error::missing_required_headers(["username"])));
        assert!(is_file_rejection(&Error::file_too_large(20, 10)));
        assert!(!is_file_rejection(&Error::configuration("bad")));
        assert!(!is_file_rejection(&Error::processing_interrupted("stop")));
    }

    #[test]
    fn test_file_label() {
        assert_eq!(file_label(Path::new("/tmp/data/users.csv")), "users.csv");
    }
}
