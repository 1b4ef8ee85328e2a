//! Command implementations for the metadata curator CLI
//!
//! Each command lives in its own module; shared loading, logging and
//! progress helpers are in [`shared`].

pub mod assemble;
pub mod modify;
pub mod quality;
pub mod shared;
pub mod validate;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `assemble`: spreadsheet to record snapshot
/// - `validate`: per-record validation report
/// - `quality`: batch quality report
/// - `modify`: action file applied to a snapshot
pub async fn run(args: Args) -> Result<CommandStats> {
    match args.command {
        Some(Commands::Assemble(assemble_args)) => assemble::run_assemble(assemble_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        Some(Commands::Quality(quality_args)) => quality::run_quality(quality_args).await,
        Some(Commands::Modify(modify_args)) => modify::run_modify(modify_args).await,
        None => Err(Error::configuration("No command given")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_without_command() {
        let result = run(Args { command: None }).await;
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
