//! Command-line argument definitions for the bulk user importer
//!
//! This module defines the CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the bulk user importer
///
/// Checks CSV exports of user accounts before a bulk import and turns the
/// valid rows into the JSON payload the import endpoint expects.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bulk-user-import",
    version,
    about = "Validate user CSV files and prepare them for bulk import",
    long_about = "Parses CSV exports of user accounts, resolves header synonyms to canonical \
                  user fields, validates every row and reports which users can be imported. \
                  Valid users can be exported as a JSON payload for the bulk import endpoint."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate one or more user CSV files and report problems per row
    Validate(ValidateArgs),
    /// Write the valid users of a CSV file as a JSON import payload
    Export(ExportArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/bulk-user-import/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Reject rows whose quoted fields are not closed
    #[arg(long = "strict-quotes", help = "Reject rows with unterminated quoted fields")]
    pub strict_quotes: bool,

    /// Maximum input file size in MiB
    #[arg(
        long = "max-file-mb",
        value_name = "MIB",
        help = "Maximum input file size in MiB (default 10)"
    )]
    pub max_file_mb: Option<u64>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// CSV files or directories to validate
    ///
    /// Directories are searched recursively for files with a .csv extension.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Maximum number of row errors and warnings listed per file
    #[arg(
        long = "max-issues",
        value_name = "COUNT",
        default_value_t = 20,
        help = "Maximum row errors and warnings listed per file in human output"
    )]
    pub max_issues: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// CSV file to export
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output path for the JSON payload
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output path for the JSON payload"
    )]
    pub output: PathBuf,

    /// Population assigned to users whose row names none
    #[arg(
        short = 'p',
        long = "population-id",
        value_name = "ID",
        help = "Population assigned to users without a populationId"
    )]
    pub population_id: Option<String>,

    /// Force overwrite of an existing output file
    #[arg(long = "force", help = "Overwrite the output file if it exists")]
    pub force_overwrite: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl CommonArgs {
    /// Validate shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if self.max_file_mb == Some(0) {
            return Err(Error::configuration(
                "Maximum file size must be greater than 0 MiB".to_string(),
            ));
        }

        Ok(())
    }

    /// Maximum file size in bytes, if overridden on the command line
    pub fn max_file_bytes(&self) -> Option<u64> {
        self.max_file_mb.map(|mb| mb.saturating_mul(1024 * 1024))
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        for path in &self.paths {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

impl ExportArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }

        if self.output.exists() && !self.force_overwrite {
            return Err(Error::configuration(format!(
                "Output file already exists: {} (use --force to overwrite)",
                self.output.display()
            )));
        }

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        if let Some(population_id) = &self.population_id {
            if population_id.trim().is_empty() {
                return Err(Error::configuration(
                    "Population ID cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}
