//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::models::{MetadataEntry, ValidationResult};
use crate::app::services::batch_modifier::InMemoryRecordStore;
use crate::app::services::metadata_assembler::{Assembly, MetadataAssembler};
use crate::app::services::vocabulary::Vocabulary;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info, warn};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Records read or assembled
    pub records_processed: usize,
    /// Records or rows that failed (format errors, rejections, blocking issues)
    pub records_failed: usize,
    /// Validation issues of any severity
    pub issues_reported: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl CommandStats {
    /// Whether the command should exit with a failure status
    pub fn has_failures(&self) -> bool {
        self.records_failed > 0
    }
}

/// One record ready for validation or scoring
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    /// Record id, or `row-<n>` for spreadsheet rows without one
    pub id: String,
    /// Entries plus any assembly notices
    pub assembly: Assembly,
}

/// Records read from a spreadsheet or a snapshot
#[derive(Debug, Clone, Default)]
pub struct LoadedBatch {
    pub records: Vec<LoadedRecord>,
    /// Rows that could not be assembled
    pub failures: Vec<String>,
}

impl LoadedBatch {
    /// Entry lists in record order
    pub fn entry_lists(&self) -> Vec<Vec<MetadataEntry>> {
        self.records
            .iter()
            .map(|record| record.assembly.entries.clone())
            .collect()
    }
}

/// Set up structured logging for all commands
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metadata_curator={}", log_level)));

    // A second initialisation in the same process keeps the first subscriber
    let initialised = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if initialised.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Load configuration from the `--config` file, or defaults
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            Config::from_file(path)?
        }
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Whether a path names a JSON record snapshot rather than a spreadsheet
pub fn is_snapshot(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read records from a CSV spreadsheet or a JSON snapshot
///
/// Spreadsheet rows are assembled with the configured mapping and keep their
/// notices; snapshot records carry none.
pub fn load_records(path: &Path, config: &Config) -> Result<LoadedBatch> {
    if is_snapshot(path) {
        let store = InMemoryRecordStore::load(path)?;
        let records = store
            .records()
            .map(|(id, entries)| LoadedRecord {
                id: id.to_string(),
                assembly: Assembly {
                    entries: entries.to_vec(),
                    notices: Vec::new(),
                },
            })
            .collect();

        return Ok(LoadedBatch {
            records,
            failures: Vec::new(),
        });
    }

    let mapping = config.field_mapping();
    let spreadsheet = MetadataAssembler::default().assemble_file(path, &mapping)?;

    let mut batch = LoadedBatch::default();
    for row in spreadsheet.rows {
        let id = row.record_key();
        match row.outcome {
            Ok(assembly) => batch.records.push(LoadedRecord { id, assembly }),
            Err(message) => batch.failures.push(format!("{}: {}", id, message)),
        }
    }

    debug!(
        "Loaded {} records ({} rows failed) from {}",
        batch.records.len(),
        batch.failures.len(),
        path.display()
    );
    Ok(batch)
}

/// Validate records across `config.workers` blocking tasks, preserving input order
pub async fn validate_records(
    records: &[LoadedRecord],
    config: &Config,
    progress: Option<&ProgressBar>,
) -> Result<Vec<ValidationResult>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = records.len().div_ceil(config.workers.max(1));
    let mut handles = Vec::new();

    for chunk in records.chunks(chunk_size) {
        let assemblies: Vec<Assembly> = chunk.iter().map(|r| r.assembly.clone()).collect();
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let validator = config.validator(Vocabulary::standard());
            assemblies
                .iter()
                .map(|assembly| validator.validate_assembly(assembly))
                .collect::<Vec<_>>()
        }));
    }

    debug!(
        "Validating {} records on {} workers",
        records.len(),
        handles.len()
    );

    let mut results = Vec::with_capacity(records.len());
    for handle in handles {
        let chunk_results = handle
            .await
            .map_err(|e| Error::processing_interrupted(format!("Validation worker failed: {}", e)))?;
        if let Some(pb) = progress {
            pb.inc(chunk_results.len() as u64);
        }
        results.extend(chunk_results);
    }

    Ok(results)
}

/// Write text to a file, or stdout when no path is given
pub async fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, contents)
                .await
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}

/// Serialize a value as pretty JSON for output
pub fn to_pretty_json<T: serde::Serialize>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization(format!("Failed to serialize {}", what), e))
}

/// Log row failures once, without flooding the terminal
pub fn report_failures(failures: &[String]) {
    for failure in failures.iter().take(10) {
        warn!("{}", failure);
    }
    if failures.len() > 10 {
        warn!("... and {} more failed rows", failures.len() - 10);
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{IssueCode, Property};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SPREADSHEET: &str = "id,title,type,creator,created,license\n\
        R1,fr:Titre|en:Title,http://purl.org/coar/resource_type/c_ddb1,\"Dupont,Marie\",2024,CC-BY-4.0\n\
        R2,Untitled,,,,\n";

    fn spreadsheet_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SPREADSHEET.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_command_stats_failures() {
        let mut stats = CommandStats::default();
        assert!(!stats.has_failures());
        stats.records_failed = 1;
        assert!(stats.has_failures());
    }

    #[test]
    fn test_is_snapshot() {
        assert!(is_snapshot(Path::new("records.json")));
        assert!(is_snapshot(Path::new("RECORDS.JSON")));
        assert!(!is_snapshot(Path::new("rows.csv")));
        assert!(!is_snapshot(Path::new("rows")));
    }

    #[test]
    fn test_load_records_from_spreadsheet() {
        let file = spreadsheet_file();
        let batch = load_records(file.path(), &Config::default()).unwrap();

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].id, "R1");
        assert!(
            batch.records[0]
                .assembly
                .entries
                .iter()
                .any(|e| e.property == Property::Creator)
        );
        assert!(batch.failures.is_empty());
    }

    #[test]
    fn test_load_records_from_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");

        let mut store = InMemoryRecordStore::new();
        store.insert("B", vec![MetadataEntry::literal(Property::Title, "Second")]);
        store.insert("A", vec![MetadataEntry::literal(Property::Title, "First")]);
        store.save(&path).unwrap();

        let batch = load_records(&path, &Config::default()).unwrap();
        let ids: Vec<_> = batch.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert!(batch.records[0].assembly.notices.is_empty());
        assert_eq!(batch.entry_lists()[1][0].text(), Some("Second"));
    }

    #[tokio::test]
    async fn test_validate_records_preserves_order() {
        let file = spreadsheet_file();
        let batch = load_records(file.path(), &Config::default()).unwrap();

        let config = Config::default().with_workers(4);
        let results = validate_records(&batch.records, &config, None).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_publishable());
        assert!(!results[1].is_publishable());
    }

    #[tokio::test]
    async fn test_validate_records_empty() {
        let results = validate_records(&[], &Config::default(), None).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_validate_records_follows_config() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(
            "id,title,type,creator,created,license\n\
             R1,fr:Titre|Title,http://purl.org/coar/resource_type/c_ddb1,\"Dupont,Marie\",2024,CC-BY-4.0\n"
                .as_bytes(),
        )
        .unwrap();
        let batch = load_records(file.path(), &Config::default()).unwrap();

        let lenient = Config::default().with_workers(1);
        let results = validate_records(&batch.records, &lenient, None).await.unwrap();
        assert!(results[0].is_publishable());

        let strict = lenient.with_strict_multilingual();
        let results = validate_records(&batch.records, &strict, None).await.unwrap();
        assert!(!results[0].is_publishable());
        assert!(results[0].has_issue(IssueCode::MixedMultilingualCell, &Property::Title));
    }

    #[tokio::test]
    async fn test_write_output_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        write_output(Some(&path), "{}").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(10, "Validating");
        assert_eq!(pb.length(), Some(10));
    }
}
