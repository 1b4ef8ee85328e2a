//! Assemble command implementation
//!
//! Reads a spreadsheet, assembles every row into an entry list and writes the
//! resulting record snapshot. A record id may appear only once: later rows
//! reusing it are reported as failures and left out of the snapshot.

use super::shared::{
    CommandStats, create_progress_bar, load_configuration, report_failures, setup_logging,
    to_pretty_json, write_output,
};
use crate::app::services::batch_modifier::InMemoryRecordStore;
use crate::app::services::metadata_assembler::{
    AssemblyStats, MetadataAssembler, SpreadsheetAssembly,
};
use crate::cli::args::{AssembleArgs, OutputFormat};
use crate::Result;
use colored::*;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Assemble command runner
pub async fn run_assemble(args: AssembleArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Assemble arguments: {:?}", args);
    args.validate()?;

    let config = load_configuration(&args.common)?;
    let mapping = config.field_mapping();

    info!(
        "Assembling {} with mapping version {} ({} rules)",
        args.input.display(),
        mapping.version,
        mapping.len()
    );

    let spreadsheet = MetadataAssembler::default().assemble_file(&args.input, &mapping)?;

    let progress_bar = args
        .common
        .show_progress()
        .then(|| create_progress_bar(spreadsheet.rows.len() as u64, "Collecting records"));

    let (store, duplicates) = collect_records(&spreadsheet, progress_bar.as_ref());

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    report_failures(&spreadsheet.stats.errors);
    report_failures(&duplicates);

    // stdout carries the snapshot when no output file is given
    match &args.output {
        Some(path) => {
            write_output(Some(path), &store.to_json()?).await?;
            print_summary(&args, &spreadsheet.stats, &duplicates)?;
        }
        None => write_output(None, &store.to_json()?).await?,
    }

    let stats = CommandStats {
        records_processed: store.len(),
        records_failed: spreadsheet.stats.rows_failed + duplicates.len(),
        issues_reported: spreadsheet.stats.notices_raised,
        processing_time: start_time.elapsed(),
    };

    info!(
        "Assembly completed in {:.2}s: {}",
        stats.processing_time.as_secs_f64(),
        spreadsheet.stats.summary()
    );

    Ok(stats)
}

/// Collect assembled rows into a store keyed by record id
///
/// The first row with a given id wins. Every later row reusing it is left out
/// and returned as a failure message.
fn collect_records(
    spreadsheet: &SpreadsheetAssembly,
    progress: Option<&ProgressBar>,
) -> (InMemoryRecordStore, Vec<String>) {
    let mut store = InMemoryRecordStore::new();
    let mut first_rows: HashMap<String, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (row, assembly) in spreadsheet.assembled() {
        if let Some(pb) = progress {
            pb.inc(1);
        }

        let key = row.record_key();
        if let Some(first_row) = first_rows.get(&key) {
            duplicates.push(format!(
                "Row {}: duplicate record id '{}' (first used in row {}), row skipped",
                row.row_number, key, first_row
            ));
            continue;
        }

        for notice in &assembly.notices {
            debug!("{}: {}", key, notice);
        }
        first_rows.insert(key.clone(), row.row_number);
        store.insert(key, assembly.entries.clone());
    }

    if !duplicates.is_empty() {
        warn!("{} rows skipped for duplicate record ids", duplicates.len());
    }

    (store, duplicates)
}

fn print_summary(args: &AssembleArgs, stats: &AssemblyStats, duplicates: &[String]) -> Result<()> {
    match args.common.output_format {
        OutputFormat::Json => println!("{}", to_pretty_json(stats, "assembly statistics")?),
        OutputFormat::Human if args.common.quiet => {}
        OutputFormat::Human => {
            println!("\n📋 {}", "Assembly Results".bright_green().bold());
            println!(
                "   • Rows: {} assembled, {} failed ({:.1}% success)",
                stats.rows_assembled.to_string().green(),
                stats.rows_failed.to_string().red(),
                stats.success_rate()
            );
            println!("   • Entries emitted: {}", stats.entries_emitted);
            println!("   • Notices raised: {}", stats.notices_raised);
            if !stats.unmapped_columns.is_empty() {
                println!(
                    "   • Unmapped columns: {}",
                    stats.unmapped_columns.join(", ").yellow()
                );
            }
            if !duplicates.is_empty() {
                println!(
                    "   • Duplicate ids skipped: {}",
                    duplicates.len().to_string().red()
                );
            }
            for error in stats.errors.iter().chain(duplicates) {
                println!("   {} {}", "✗".red(), error);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Property;
    use crate::app::services::metadata_assembler::FieldMapping;

    const SPREADSHEET: &str = "id,title,type,creator,created,license\n\
        R1,fr:Premier|en:First,http://purl.org/coar/resource_type/c_ddb1,\"Dupont,Marie\",2024,CC-BY-4.0\n\
        R2,fr:Fouilles|en:Excavations,http://purl.org/coar/resource_type/c_c513,\"Martin,Paul\",2023,CC0-1.0\n\
        R1,fr:Second|en:Second,http://purl.org/coar/resource_type/c_ddb1,\"Dupont,Marie\",2025,CC-BY-4.0\n";

    fn assemble(csv: &str) -> SpreadsheetAssembly {
        MetadataAssembler::default()
            .assemble_reader(csv.as_bytes(), &FieldMapping::standard())
            .unwrap()
    }

    #[test]
    fn test_duplicate_id_keeps_first_row() {
        let spreadsheet = assemble(SPREADSHEET);

        let (store, duplicates) = collect_records(&spreadsheet, None);

        assert_eq!(store.len(), 2);
        let title = store
            .get("R1")
            .unwrap()
            .iter()
            .find(|e| e.property == Property::Title)
            .and_then(|e| e.text())
            .unwrap();
        assert_eq!(title, "Premier");

        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].starts_with("Row 3"));
        assert!(duplicates[0].contains("'R1'"));
        assert!(duplicates[0].contains("row 1"));
    }

    #[test]
    fn test_rows_without_id_never_collide() {
        let spreadsheet = assemble(
            "title,type\n\
             fr:Un|en:One,http://purl.org/coar/resource_type/c_ddb1\n\
             fr:Deux|en:Two,http://purl.org/coar/resource_type/c_ddb1\n",
        );

        let (store, duplicates) = collect_records(&spreadsheet, None);

        assert_eq!(store.len(), 2);
        assert!(store.get("row-1").is_some());
        assert!(store.get("row-2").is_some());
        assert!(duplicates.is_empty());
    }
}
