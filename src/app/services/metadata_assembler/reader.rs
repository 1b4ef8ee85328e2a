//! Spreadsheet reading: CSV header and rows through the assembler

use super::assembler::MetadataAssembler;
use super::mapping::FieldMapping;
use super::stats::{AssemblyStats, RowAssembly, SpreadsheetAssembly};
use crate::app::models::Row;
use crate::{Error, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column holding the record identifier when the spreadsheet carries one
pub const ID_COLUMN: &str = "id";

impl MetadataAssembler<'_> {
    /// Assemble every row of a UTF-8 CSV file
    pub fn assemble_file(&self, path: &Path, mapping: &FieldMapping) -> Result<SpreadsheetAssembly> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;

        self.assemble_reader(file, mapping).map_err(|e| match e {
            Error::CsvParsing {
                message, source, ..
            } => Error::csv_parsing(path.display().to_string(), message, source),
            other => other,
        })
    }

    /// Assemble every row read from a CSV source
    pub fn assemble_reader<R: Read>(
        &self,
        reader: R,
        mapping: &FieldMapping,
    ) -> Result<SpreadsheetAssembly> {
        mapping.validate()?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing("input", "Failed to read CSV headers", Some(e)))?
            .clone();

        let mut stats = AssemblyStats::new();
        stats.unmapped_columns = mapping
            .unmapped_columns(headers.iter())
            .into_iter()
            .filter(|column| column != ID_COLUMN)
            .collect();

        if !stats.unmapped_columns.is_empty() {
            debug!(
                "Ignoring unmapped columns: {}",
                stats.unmapped_columns.join(", ")
            );
        }

        let mut rows = Vec::new();

        for (index, result) in csv_reader.records().enumerate() {
            let row_number = index + 1;
            stats.total_rows += 1;

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let message = format!("CSV parse error at row {}: {}", row_number, e);
                    warn!("{}", message);
                    stats.rows_failed += 1;
                    stats.errors.push(message.clone());
                    rows.push(RowAssembly {
                        row_number,
                        record_id: None,
                        outcome: Err(message),
                    });
                    continue;
                }
            };

            let row = Row::from_record(&headers, &record);
            let record_id = row.get(ID_COLUMN).map(str::to_string);

            let outcome = match self.assemble(&row, mapping) {
                Ok(assembly) => {
                    stats.rows_assembled += 1;
                    stats.entries_emitted += assembly.entries.len();
                    stats.notices_raised += assembly.notices.len();
                    Ok(assembly)
                }
                Err(e) => {
                    let message = format!("Row {}: {}", row_number, e);
                    debug!("Skipped {}", message);
                    stats.rows_failed += 1;
                    stats.errors.push(message);
                    Err(e.to_string())
                }
            };

            rows.push(RowAssembly {
                row_number,
                record_id,
                outcome,
            });
        }

        info!("{}", stats.summary());

        Ok(SpreadsheetAssembly { rows, stats })
    }
}
