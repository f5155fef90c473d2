//! Shared components for CLI commands
//!
//! Common types, utilities, and functions used across the command
//! implementations.

use crate::cli::args::CommonArgs;
use crate::config::ImportConfig;
use crate::constants::CSV_EXTENSION;
use crate::{Error, IngestionResult, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Import statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    /// Number of CSV files ingested successfully
    pub files_processed: usize,
    /// Number of files rejected as a whole (missing headers, too large, ...)
    pub files_failed: usize,
    /// Data rows seen across all files
    pub total_rows: usize,
    /// Users that passed validation
    pub valid_users: usize,
    /// Rows rejected by the parser or the validator
    pub invalid_rows: usize,
    /// Row warnings across all files
    pub warnings: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl ImportStats {
    /// Fold one file's result into the running totals
    pub fn record(&mut self, result: &IngestionResult) {
        self.files_processed += 1;
        self.total_rows += result.summary.total_rows;
        self.valid_users += result.summary.valid_users;
        self.invalid_rows += result.summary.invalid_rows;
        self.warnings += result.summary.warnings_count;
    }

    /// Fold a whole-file failure into the running totals
    pub fn record_failure(&mut self) {
        self.files_failed += 1;
    }

    /// Percentage of data rows that produced a valid user
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.valid_users as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// True when every file was accepted and every row was valid
    pub fn is_clean(&self) -> bool {
        self.files_failed == 0 && self.invalid_rows == 0
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bulk_user_import={}", log_level)));

    let layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    // A second subscriber (tests, embedding) is not an error
    let initialized = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_timer(fmt::time::uptime()))
            .try_init()
    };

    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<ImportConfig> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        ImportConfig::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = ImportConfig::load_layered(config_file)?;

    apply_cli_overrides(&mut config, args);

    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut ImportConfig, args: &CommonArgs) {
    if let Some(max_file_bytes) = args.max_file_bytes() {
        config.max_file_bytes = max_file_bytes;
    }

    // The flag can only switch strict mode on; config and env may already have
    if args.strict_quotes {
        config.strict_quotes = true;
    }
}

/// Expand files and directories into the list of CSV files to ingest
///
/// Files named explicitly are kept whatever their extension. Directories are
/// walked recursively for `.csv` files, sorted for a stable report order.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() && has_csv_extension(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();

        debug!("Discovered {} CSV files in {}", found.len(), path.display());
        files.extend(found);
    }

    if files.is_empty() {
        return Err(Error::configuration(
            "No CSV files found in the given paths".to_string(),
        ));
    }

    Ok(files)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
