//! Validate command implementation
//!
//! Validates every record of a spreadsheet or snapshot and reports the issues
//! per record.

use super::shared::{
    CommandStats, LoadedRecord, create_progress_bar, load_configuration, load_records,
    report_failures, setup_logging, to_pretty_json, validate_records,
};
use crate::app::models::{Severity, ValidationResult};
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::Result;
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Validation outcome of one record, as reported
#[derive(Debug, Serialize)]
struct RecordReport<'a> {
    id: &'a str,
    publishable: bool,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Validation arguments: {:?}", args);
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if args.strict_multilingual {
        config = config.with_strict_multilingual();
    }
    let strict = config.validation.strict_multilingual;

    let batch = load_records(&args.input, &config)?;
    report_failures(&batch.failures);

    info!(
        "Validating {} records from {}{}",
        batch.records.len(),
        args.input.display(),
        if strict { " (strict multilingual)" } else { "" }
    );

    let progress_bar = args
        .common
        .show_progress()
        .then(|| create_progress_bar(batch.records.len() as u64, "Validating records"));

    let results = validate_records(&batch.records, &config, progress_bar.as_ref()).await?;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    generate_validation_report(&args, &batch.records, &results, &batch.failures)?;

    let blocked = results.iter().filter(|r| !r.is_publishable()).count();
    let stats = CommandStats {
        records_processed: results.len(),
        records_failed: blocked + batch.failures.len(),
        issues_reported: results.iter().map(ValidationResult::issue_count).sum(),
        processing_time: start_time.elapsed(),
    };

    info!(
        "Validation completed in {:.2}s: {} records, {} not publishable, {} issues",
        stats.processing_time.as_secs_f64(),
        stats.records_processed,
        blocked,
        stats.issues_reported
    );

    Ok(stats)
}

/// Generate validation report based on output format
fn generate_validation_report(
    args: &ValidateArgs,
    records: &[LoadedRecord],
    results: &[ValidationResult],
    failures: &[String],
) -> Result<()> {
    match args.common.output_format {
        OutputFormat::Human => {
            if !args.common.quiet {
                generate_human_validation_report(records, results, failures, args.issues_only);
            }
            Ok(())
        }
        OutputFormat::Json => generate_json_validation_report(records, results, args.issues_only),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow(),
        Severity::Suggestion => "suggestion".cyan(),
    }
}

/// Generate human-readable validation report
fn generate_human_validation_report(
    records: &[LoadedRecord],
    results: &[ValidationResult],
    failures: &[String],
    issues_only: bool,
) {
    println!("\n🧪 {}", "Validation Results".bright_green().bold());

    for (record, result) in records.iter().zip(results) {
        if issues_only && result.issue_count() == 0 {
            continue;
        }

        let status = if result.is_publishable() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("\n{} {} ({})", status, record.id.bold(), result.summary());

        for issue in result.issues() {
            println!("   • {}: {}", severity_label(issue.severity), issue.message);
        }
        if result.organization_creators > 0 {
            println!(
                "   • {} organization creator(s)",
                result.organization_creators
            );
        }
    }

    for failure in failures {
        println!("\n{} {}", "✗".red(), failure);
    }

    let publishable = results.iter().filter(|r| r.is_publishable()).count();
    println!(
        "\n📊 {} of {} records publishable",
        publishable.to_string().bold(),
        results.len() + failures.len()
    );
}

/// Generate JSON validation report
fn generate_json_validation_report(
    records: &[LoadedRecord],
    results: &[ValidationResult],
    issues_only: bool,
) -> Result<()> {
    let reports: Vec<RecordReport<'_>> = records
        .iter()
        .zip(results)
        .filter(|(_, result)| !issues_only || result.issue_count() > 0)
        .map(|(record, result)| RecordReport {
            id: &record.id,
            publishable: result.is_publishable(),
            result,
        })
        .collect();

    println!("{}", to_pretty_json(&reports, "validation results")?);
    Ok(())
}
