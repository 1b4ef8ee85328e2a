//! Modify command implementation
//!
//! Applies an action file to a JSON record snapshot and reports the status of
//! every row.

use super::shared::{CommandStats, load_configuration, setup_logging, to_pretty_json};
use crate::app::services::batch_modifier::{
    ActionState, BatchModifier, BatchOutcome, InMemoryRecordStore, read_action_file,
};
use crate::cli::args::{ModifyArgs, OutputFormat};
use crate::Result;
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Modify command runner
pub async fn run_modify(args: ModifyArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Modify arguments: {:?}", args);
    args.validate()?;

    // Only checked for validity; edits take no tunables
    load_configuration(&args.common)?;

    let mut store = InMemoryRecordStore::load(&args.records)?;
    let rows = read_action_file(&args.actions)?;

    info!(
        "Applying {} action rows to {} records",
        rows.len(),
        store.len()
    );

    let outcome = BatchModifier::new(&mut store).run(&rows);

    if args.dry_run {
        info!("Dry run: snapshot not saved");
    } else {
        store.save(args.output_path())?;
        info!("Saved snapshot to {}", args.output_path().display());
    }

    match args.common.output_format {
        OutputFormat::Json => println!("{}", to_pretty_json(&outcome, "row statuses")?),
        OutputFormat::Human if args.common.quiet => {}
        OutputFormat::Human => print_human_outcome(&outcome, args.dry_run),
    }

    let stats = CommandStats {
        records_processed: outcome.stats.total_rows,
        records_failed: outcome.stats.rejected(),
        issues_reported: 0,
        processing_time: start_time.elapsed(),
    };

    info!(
        "Modification completed in {:.2}s: {}",
        stats.processing_time.as_secs_f64(),
        outcome.stats.summary()
    );

    Ok(stats)
}

fn print_human_outcome(outcome: &BatchOutcome, dry_run: bool) {
    println!("\n✏️  {}", "Modification Results".bright_green().bold());

    for row in &outcome.rows {
        let target = row.target_record_id.as_deref().unwrap_or("?");
        let action = row
            .kind
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "-".to_string());

        match row.state {
            ActionState::Committed => println!(
                "   {} row {}: {} on {}{}",
                "✓".green(),
                row.row_number,
                action,
                target,
                if row.removed > 0 {
                    format!(" ({} removed)", row.removed)
                } else {
                    String::new()
                }
            ),
            ActionState::Rejected(reason) => println!(
                "   {} row {}: {} on {} [{}] {}",
                "✗".red(),
                row.row_number,
                action,
                target,
                reason.to_string().yellow(),
                row.message.as_deref().unwrap_or_default()
            ),
            state => println!("   ? row {}: {:?}", row.row_number, state),
        }
    }

    let stats = &outcome.stats;
    println!(
        "\n📊 {} committed, {} rejected{}",
        stats.committed.to_string().green(),
        stats.rejected().to_string().red(),
        if dry_run { " (dry run, nothing saved)" } else { "" }
    );
}
