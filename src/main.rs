use anyhow::Context;
use bulk_user_import::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match run_main(args) {
        Ok(stats) if stats.files_failed > 0 => process::exit(2),
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run the selected command on a fresh runtime, stopping early on CTRL+C
fn run_main(args: Args) -> anyhow::Result<commands::ImportStats> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let stats = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                let reason = match signal {
                    Ok(()) => "Processing interrupted by user".to_string(),
                    Err(e) => format!("Failed to listen for CTRL+C: {}", e),
                };
                Err(bulk_user_import::Error::processing_interrupted(reason))
            }
        }
    })?;

    Ok(stats)
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Bulk User Import - CSV validation for user account imports");
    println!("==========================================================");
    println!();
    println!("Check CSV exports of user accounts before a bulk import: header");
    println!("synonyms are resolved, every row is validated and problems are");
    println!("reported by line number.");
    println!();
    println!("USAGE:");
    println!("    bulk-user-import <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    validate    Validate CSV files and report errors and warnings per row");
    println!("    export      Write the valid users of a CSV file as a JSON payload");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Validate a single file:");
    println!("    bulk-user-import validate users.csv");
    println!();
    println!("    # Validate every CSV under a directory, as JSON:");
    println!("    bulk-user-import validate exports/ --format json");
    println!();
    println!("    # Export valid users, assigning a default population:");
    println!("    bulk-user-import export users.csv -o users.json --population-id pop-1");
    println!();
    println!("For detailed help on any command, use:");
    println!("    bulk-user-import <COMMAND> --help");
}
