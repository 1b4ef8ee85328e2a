//! Quality command implementation
//!
//! Validates and scores a batch of records, then prints the quality report.

use super::shared::{
    CommandStats, create_progress_bar, load_configuration, load_records, report_failures,
    setup_logging, to_pretty_json, validate_records, write_output,
};
use crate::app::models::QualityReport;
use crate::app::services::quality_scorer::{QualityScorer, Recommendation};
use crate::app::services::vocabulary::Vocabulary;
use crate::cli::args::{OutputFormat, QualityArgs};
use crate::Result;
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Quality command runner
pub async fn run_quality(args: QualityArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Quality arguments: {:?}", args);
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    let batch = load_records(&args.input, &config)?;
    report_failures(&batch.failures);

    let progress_bar = args
        .common
        .show_progress()
        .then(|| create_progress_bar(batch.records.len() as u64, "Validating records"));

    let validations = validate_records(&batch.records, &config, progress_bar.as_ref()).await?;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    let scorer = QualityScorer::new(Vocabulary::standard(), config.quality.clone());
    let entry_lists = batch.entry_lists();
    let (report, ranked) = scorer.report_detailed(&entry_lists, &validations);

    if let Some(path) = &args.output {
        write_output(Some(path), &to_pretty_json(&report, "quality report")?).await?;
    }

    match args.common.output_format {
        OutputFormat::Json => println!("{}", to_pretty_json(&report, "quality report")?),
        OutputFormat::Human if args.common.quiet => {}
        OutputFormat::Human => print_human_report(&report, &ranked),
    }

    let stats = CommandStats {
        records_processed: report.summary.resources,
        records_failed: batch.failures.len(),
        issues_reported: report.summary.errors + report.summary.warnings + report.summary.suggestions,
        processing_time: start_time.elapsed(),
    };

    info!(
        "Quality scoring completed in {:.2}s: overall {:.1}",
        stats.processing_time.as_secs_f64(),
        report.summary.overall_score
    );

    Ok(stats)
}

fn score_label(score: f64) -> ColoredString {
    let text = format!("{:5.1}", score);
    if score >= 80.0 {
        text.green()
    } else if score >= 50.0 {
        text.yellow()
    } else {
        text.red()
    }
}

fn print_human_report(report: &QualityReport, ranked: &[Recommendation]) {
    let summary = &report.summary;

    println!("\n📈 {}", "Quality Report".bright_green().bold());
    println!(
        "   • Resources: {} ({} publishable)",
        summary.resources, summary.publishable
    );
    println!(
        "   • Issues: {} errors, {} warnings, {} suggestions",
        summary.errors.to_string().red(),
        summary.warnings.to_string().yellow(),
        summary.suggestions
    );

    println!("\n📊 Metrics:");
    println!("   • Completeness:    {}", score_label(report.metrics.completeness));
    println!("   • Richness:        {}", score_label(report.metrics.richness));
    println!("   • Consistency:     {}", score_label(report.metrics.consistency));
    println!("   • Standardization: {}", score_label(report.metrics.standardization));
    println!("   • Overall:         {}", score_label(summary.overall_score).bold());

    if ranked.is_empty() {
        println!("\n✅ No recommendations");
        return;
    }

    println!("\n💡 Recommendations:");
    for recommendation in ranked {
        println!(
            "   • [{}] {}",
            recommendation.metric.to_string().cyan(),
            recommendation.message
        );
    }
}
