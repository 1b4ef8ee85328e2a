//! Assembly statistics and result structures for spreadsheet processing
//!
//! Failures are row-scoped: a malformed row is recorded with its reason and
//! the remaining rows are still assembled.

use super::assembler::Assembly;
use serde::{Deserialize, Serialize};

/// Outcome of assembling one spreadsheet row
#[derive(Debug, Clone)]
pub struct RowAssembly {
    /// 1-based data row number (header excluded)
    pub row_number: usize,

    /// Record identifier taken from the id column, if present
    pub record_id: Option<String>,

    /// Entries and notices, or the format error that rejected the row
    pub outcome: std::result::Result<Assembly, String>,
}

impl RowAssembly {
    /// Key used for this row's record: its id, or `row-<n>`
    pub fn record_key(&self) -> String {
        self.record_id
            .clone()
            .unwrap_or_else(|| format!("row-{}", self.row_number))
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Assembly statistics for one spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Rows assembled into entry lists
    pub rows_assembled: usize,

    /// Rows rejected with a format error
    pub rows_failed: usize,

    /// Entries emitted across all assembled rows
    pub entries_emitted: usize,

    /// Notices raised across all assembled rows
    pub notices_raised: usize,

    /// Header columns with no mapping rule
    pub unmapped_columns: Vec<String>,

    /// Row-scoped error messages
    pub errors: Vec<String>,
}

impl AssemblyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            100.0
        } else {
            (self.rows_assembled as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Assembly Summary: {} rows -> {} assembled, {} failed ({:.1}% success) | \
             {} entries | {} notices | {} unmapped columns",
            self.total_rows,
            self.rows_assembled,
            self.rows_failed,
            self.success_rate(),
            self.entries_emitted,
            self.notices_raised,
            self.unmapped_columns.len()
        )
    }
}

/// All row outcomes of a spreadsheet plus statistics
#[derive(Debug, Clone)]
pub struct SpreadsheetAssembly {
    pub rows: Vec<RowAssembly>,
    pub stats: AssemblyStats,
}

impl SpreadsheetAssembly {
    /// Successfully assembled rows
    pub fn assembled(&self) -> impl Iterator<Item = (&RowAssembly, &Assembly)> {
        self.rows
            .iter()
            .filter_map(|row| row.outcome.as_ref().ok().map(|assembly| (row, assembly)))
    }
}
