use anyhow::Context;
use clap::Parser;
use metadata_curator::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match run(args) {
        Ok(stats) if stats.has_failures() => process::exit(2),
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

/// Run the command on an async runtime, stopping on CTRL+C
fn run(args: Args) -> anyhow::Result<commands::CommandStats> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let stats = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available: never resolve
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(metadata_curator::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    })?;

    Ok(stats)
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Metadata Curator - Repository Metadata from Research Spreadsheets");
    println!("=================================================================");
    println!();
    println!("Assemble spreadsheet rows into repository metadata records, validate and");
    println!("score them, and apply bulk edits to records already published.");
    println!();
    println!("USAGE:");
    println!("    metadata-curator <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    assemble    Assemble a CSV spreadsheet into a JSON record snapshot");
    println!("    validate    Validate records from a spreadsheet or snapshot");
    println!("    quality     Score a batch of records and print a quality report");
    println!("    modify      Apply a CSV action file to a record snapshot");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Assemble a spreadsheet into a snapshot:");
    println!("    metadata-curator assemble --input rows.csv --output records.json");
    println!();
    println!("    # Validate with mixed multilingual cells treated as errors:");
    println!("    metadata-curator validate --input records.json --strict-multilingual");
    println!();
    println!("    # Quality report as JSON:");
    println!("    metadata-curator quality --input rows.csv --output-format json");
    println!();
    println!("    # Apply edits without saving:");
    println!("    metadata-curator modify --records records.json --actions edits.csv --dry-run");
    println!();
    println!("For detailed help on any command, use:");
    println!("    metadata-curator <COMMAND> --help");
}
