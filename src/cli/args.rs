//! Command-line argument definitions for the metadata curator
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::MAX_PARALLEL_WORKERS;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the metadata curator
///
/// Turns research spreadsheets into repository metadata records, validates
/// and scores them, and applies batch edits to published records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metadata-curator",
    version,
    about = "Assemble, validate, score and bulk-edit repository metadata records",
    long_about = "Converts spreadsheet rows into repository metadata entry lists using a \
                  configurable column mapping, validates them against the publication rules, \
                  scores batches for quality, and applies CSV action files to existing records."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Assemble metadata entry lists from a CSV spreadsheet
    Assemble(AssembleArgs),
    /// Validate records from a spreadsheet or a record snapshot
    Validate(ValidateArgs),
    /// Score a batch of records and produce a quality report
    Quality(QualityArgs),
    /// Apply an action file to a record snapshot
    Modify(ModifyArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file (TOML format)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,
}

impl CommonArgs {
    /// Get log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && matches!(self.output_format, OutputFormat::Human)
    }

    fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            require_file(config_file, "Config file")?;
        }
        Ok(())
    }
}

/// Arguments for the assemble command
#[derive(Debug, Clone, Parser)]
pub struct AssembleArgs {
    /// Input spreadsheet (UTF-8 CSV with a header row)
    #[arg(short = 'i', long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Write the record snapshot here instead of stdout
    ///
    /// The snapshot is a JSON object keyed by record id (the `id` column, or
    /// `row-<n>` when absent) and can be fed to `validate`, `quality` and
    /// `modify`.
    #[arg(short = 'o', long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Records to validate: a CSV spreadsheet or a JSON record snapshot
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Report mixed multilingual cells as errors
    #[arg(long = "strict-multilingual")]
    pub strict_multilingual: bool,

    /// Number of parallel workers (overrides the config file; defaults to the CPU count)
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Only list records that have issues
    #[arg(long = "issues-only")]
    pub issues_only: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the quality command
#[derive(Debug, Clone, Parser)]
pub struct QualityArgs {
    /// Records to score: a CSV spreadsheet or a JSON record snapshot
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Write the JSON quality report here as well
    #[arg(short = 'o', long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Number of parallel workers (overrides the config file; defaults to the CPU count)
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the modify command
#[derive(Debug, Clone, Parser)]
pub struct ModifyArgs {
    /// JSON record snapshot to edit
    #[arg(short = 'r', long = "records", value_name = "JSON")]
    pub records: PathBuf,

    /// Action file (CSV: id, action, property, value, lang)
    #[arg(short = 'a', long = "actions", value_name = "CSV")]
    pub actions: PathBuf,

    /// Write the edited snapshot here instead of back to --records
    #[arg(short = 'o', long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Apply actions without saving the snapshot
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "{} does not exist: {}",
            what,
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "{} is not a file: {}",
            what,
            path.display()
        )));
    }
    Ok(())
}

fn validate_workers(workers: Option<usize>) -> Result<()> {
    match workers {
        Some(0) => Err(Error::configuration(
            "Number of workers must be greater than 0",
        )),
        Some(count) if count > MAX_PARALLEL_WORKERS => Err(Error::configuration(format!(
            "Number of workers cannot exceed {}",
            MAX_PARALLEL_WORKERS
        ))),
        _ => Ok(()),
    }
}

impl AssembleArgs {
    /// Validate the assemble command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        require_file(&self.input, "Input spreadsheet")?;
        self.common.validate()
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        require_file(&self.input, "Input file")?;
        validate_workers(self.workers)?;

        self.common.validate()
    }
}

impl QualityArgs {
    /// Validate the quality command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        require_file(&self.input, "Input file")?;
        validate_workers(self.workers)?;
        self.common.validate()
    }
}

impl ModifyArgs {
    /// Validate the modify command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        require_file(&self.records, "Record snapshot")?;
        require_file(&self.actions, "Action file")?;
        self.common.validate()
    }

    /// Where the edited snapshot is written
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_validate_command() {
        let args = Args::try_parse_from([
            "metadata-curator",
            "validate",
            "--input",
            "records.json",
            "--strict-multilingual",
            "-j",
            "2",
            "-vv",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Validate(validate)) => {
                assert_eq!(validate.input, PathBuf::from("records.json"));
                assert!(validate.strict_multilingual);
                assert_eq!(validate.workers, Some(2));
                assert_eq!(validate.common.get_log_level(), "debug");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_modify_command() {
        let args = Args::try_parse_from([
            "metadata-curator",
            "modify",
            "-r",
            "records.json",
            "-a",
            "actions.csv",
            "--output-format",
            "json",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Modify(modify)) => {
                assert_eq!(modify.output_path(), Path::new("records.json"));
                assert_eq!(modify.common.output_format, OutputFormat::Json);
                assert!(!modify.common.show_progress());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["metadata-curator", "quality", "-i", "x.csv", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["metadata-curator"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let args = Args::try_parse_from([
            "metadata-curator",
            "assemble",
            "--input",
            "/nonexistent/rows.csv",
        ])
        .unwrap();

        let Some(Commands::Assemble(assemble)) = args.command else {
            panic!("expected assemble");
        };
        assert!(assemble.validate().is_err());
    }

    #[test]
    fn test_worker_bounds() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from(["metadata-curator", "validate", "-i", path, "-j", "0"]).unwrap();
        let Some(Commands::Validate(validate)) = args.command else {
            panic!("expected validate");
        };
        assert!(validate.validate().is_err());

        let args = Args::try_parse_from(["metadata-curator", "quality", "-i", path, "-j", "101"]).unwrap();
        let Some(Commands::Quality(quality)) = args.command else {
            panic!("expected quality");
        };
        assert!(quality.validate().is_err());
    }

    #[test]
    fn test_workers_default_to_config() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let args = Args::try_parse_from(["metadata-curator", "quality", "-i", path]).unwrap();
        let Some(Commands::Quality(quality)) = args.command else {
            panic!("expected quality");
        };
        assert_eq!(quality.workers, None);
        assert!(quality.validate().is_ok());
    }
}
