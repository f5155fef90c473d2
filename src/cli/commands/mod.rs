//! Command implementations for the bulk user import CLI
//!
//! Each command lives in its own module:
//! - `validate`: row-by-row report for one or more CSV files
//! - `export`: JSON payload of the valid users in a CSV file

pub mod export;
pub mod shared;
pub mod validate;

pub use shared::ImportStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub async fn run(args: Args) -> Result<ImportStats> {
    match args.command {
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        Some(Commands::Export(export_args)) => export::run_export(export_args).await,
        None => Err(Error::configuration("No command given")),
    }
}
