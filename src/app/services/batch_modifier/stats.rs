//! Batch modification statistics and result structures

use super::interpreter::{RejectionReason, RowOutcome};
use serde::{Deserialize, Serialize};

/// Counts of row outcomes for one action file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModificationStats {
    /// Rows processed
    pub total_rows: usize,

    /// Rows applied and committed
    pub committed: usize,

    /// Rows whose target id was unknown
    pub target_not_found: usize,

    /// Malformed rows or values
    pub format_errors: usize,

    /// Rows rejected for tagging a system-controlled property
    pub property_locked: usize,

    /// Rows the record store refused to write
    pub commit_failed: usize,
}

impl ModificationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished row
    pub fn record(&mut self, outcome: &RowOutcome) {
        self.total_rows += 1;
        match outcome.rejection() {
            None if outcome.is_committed() => self.committed += 1,
            None => {}
            Some(RejectionReason::TargetNotFound) => self.target_not_found += 1,
            Some(RejectionReason::FormatError) => self.format_errors += 1,
            Some(RejectionReason::PropertyLocked) => self.property_locked += 1,
            Some(RejectionReason::CommitFailed) => self.commit_failed += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.target_not_found + self.format_errors + self.property_locked + self.commit_failed
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Modification Summary: {} rows -> {} committed, {} rejected \
             ({} not found, {} malformed, {} locked, {} commit failures)",
            self.total_rows,
            self.committed,
            self.rejected(),
            self.target_not_found,
            self.format_errors,
            self.property_locked,
            self.commit_failed
        )
    }
}

/// Per-row statuses of one action file plus statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub rows: Vec<RowOutcome>,
    pub stats: ModificationStats,
}

impl BatchOutcome {
    /// Rows that were not applied
    pub fn rejected(&self) -> impl Iterator<Item = &RowOutcome> {
        self.rows.iter().filter(|row| row.rejection().is_some())
    }

    /// Whether every row was committed
    pub fn all_committed(&self) -> bool {
        self.rows.iter().all(RowOutcome::is_committed)
    }
}
