//! Applying actions to entry lists and driving rows through a record store

use super::action_file::ActionRow;
use super::stats::{BatchOutcome, ModificationStats};
use super::store::RecordStore;
use crate::app::models::{ActionKind, MetadataEntry, ModificationAction};
use crate::app::services::field_parser::parse_field;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Why a row was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The record store does not know the target id
    TargetNotFound,
    /// The row or its value is malformed
    FormatError,
    /// A language tag was aimed at a system-controlled property
    PropertyLocked,
    /// The record store refused the write
    CommitFailed,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RejectionReason::TargetNotFound => "TargetNotFound",
            RejectionReason::FormatError => "FormatError",
            RejectionReason::PropertyLocked => "PropertyLocked",
            RejectionReason::CommitFailed => "CommitFailed",
        };
        write!(f, "{}", code)
    }
}

/// Lifecycle of one action row
///
/// `Pending -> Resolving -> Applying -> Committed`, or `Rejected` from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ActionState {
    Pending,
    Resolving,
    Applying,
    Committed,
    Rejected(RejectionReason),
}

impl ActionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionState::Committed | ActionState::Rejected(_))
    }
}

/// Final status of one action row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row_number: usize,
    pub target_record_id: Option<String>,
    pub kind: Option<ActionKind>,
    pub state: ActionState,
    /// Entries removed by a replace or delete
    pub removed: usize,
    /// Human-readable rejection detail
    pub message: Option<String>,
}

impl RowOutcome {
    fn pending(row: &ActionRow) -> Self {
        Self {
            row_number: row.row_number,
            target_record_id: row.target_record_id.clone(),
            kind: row.action.as_ref().ok().map(|action| action.kind),
            state: ActionState::Pending,
            removed: 0,
            message: None,
        }
    }

    fn advance(&mut self, state: ActionState) {
        trace!("Row {}: {:?} -> {:?}", self.row_number, self.state, state);
        self.state = state;
    }

    fn reject(mut self, reason: RejectionReason, message: impl Into<String>) -> Self {
        let message = message.into();
        debug!("Row {} rejected ({}): {}", self.row_number, reason, message);
        self.advance(ActionState::Rejected(reason));
        self.message = Some(message);
        self
    }

    pub fn is_committed(&self) -> bool {
        self.state == ActionState::Committed
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self.state {
            ActionState::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

// =============================================================================
// Entry list edits
// =============================================================================

/// Build the entries an add or replace action inserts
///
/// The value is parsed with the property's default field kind, so a keyword
/// value `a;b` yields two entries and a title value `fr:Titre|en:Title` one
/// entry per language. The action's language goes to fragments without a
/// prefix of their own and must agree with those that have one.
pub fn build_entries(action: &ModificationAction) -> Result<Vec<MetadataEntry>> {
    let parsed = parse_field(&action.new_value, action.property.default_field_kind())?;
    if parsed.is_empty() {
        return Err(Error::format(
            "value",
            format!("nothing to {} in '{}'", action.kind, action.new_value),
        ));
    }

    for notice in &parsed.notices {
        debug!("Value for {} on {}: {}", action.property, action.target_record_id, notice);
    }

    parsed
        .fragments
        .into_iter()
        .map(|fragment| {
            let mut entry = fragment.into_entry(action.property.clone());
            if let (Some(own), Some(scope)) = (&entry.language, &action.language) {
                if own != scope {
                    return Err(Error::format(
                        "value",
                        format!(
                            "value language '{}' conflicts with action language '{}'",
                            own, scope
                        ),
                    ));
                }
            }
            if entry.language.is_none() {
                entry.language = action.language.clone();
            }
            Ok(entry)
        })
        .collect()
}

/// Apply one action to an entry list in place
///
/// Returns the number of entries removed. `entries` is untouched on error.
pub fn apply_action(entries: &mut Vec<MetadataEntry>, action: &ModificationAction) -> Result<usize> {
    if action.kind != ActionKind::Delete
        && action.language.is_some()
        && action.property.is_system_controlled()
    {
        return Err(Error::property_locked(action.property.to_string()));
    }

    let matches = |entry: &MetadataEntry| {
        entry.property == action.property && entry.in_language_scope(action.language.as_deref())
    };

    match action.kind {
        ActionKind::Add => {
            entries.extend(build_entries(action)?);
            Ok(0)
        }
        ActionKind::Replace => {
            let built = build_entries(action)?;
            let position = entries.iter().position(|e| matches(e));
            let before = entries.len();
            entries.retain(|e| !matches(e));
            let removed = before - entries.len();

            match position {
                Some(index) => {
                    entries.splice(index..index, built);
                }
                None => entries.extend(built),
            }
            Ok(removed)
        }
        ActionKind::Delete => {
            if !action.new_value.is_empty() {
                warn!(
                    "Ignoring value '{}' on delete of {} for {}",
                    action.new_value, action.property, action.target_record_id
                );
            }
            let before = entries.len();
            entries.retain(|e| !matches(e));
            Ok(before - entries.len())
        }
    }
}

// =============================================================================
// Row processing
// =============================================================================

/// Applies action rows to records held by a store
pub struct BatchModifier<'s, S: RecordStore> {
    store: &'s mut S,
}

impl<'s, S: RecordStore> BatchModifier<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Process rows in file order; one row's failure never stops the others
    pub fn run(&mut self, rows: &[ActionRow]) -> BatchOutcome {
        let mut stats = ModificationStats::new();
        let mut outcomes = Vec::with_capacity(rows.len());

        for row in rows {
            let outcome = self.process_row(row);
            stats.record(&outcome);
            outcomes.push(outcome);
        }

        info!("{}", stats.summary());
        BatchOutcome {
            rows: outcomes,
            stats,
        }
    }

    /// Drive one row through its lifecycle
    pub fn process_row(&mut self, row: &ActionRow) -> RowOutcome {
        let mut outcome = RowOutcome::pending(row);

        let action = match &row.action {
            Ok(action) => action,
            Err(reason) => return outcome.reject(RejectionReason::FormatError, reason.clone()),
        };

        outcome.advance(ActionState::Resolving);
        let mut entries = match self.store.fetch(&action.target_record_id) {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                let message = Error::target_not_found(&action.target_record_id).to_string();
                return outcome.reject(RejectionReason::TargetNotFound, message);
            }
            Err(e) => return outcome.reject(RejectionReason::TargetNotFound, e.to_string()),
        };

        outcome.advance(ActionState::Applying);
        match apply_action(&mut entries, action) {
            Ok(removed) => outcome.removed = removed,
            Err(e @ Error::PropertyLocked { .. }) => {
                return outcome.reject(RejectionReason::PropertyLocked, e.to_string());
            }
            Err(e) => return outcome.reject(RejectionReason::FormatError, e.to_string()),
        }

        if let Err(e) = self.store.commit(&action.target_record_id, entries) {
            return outcome.reject(RejectionReason::CommitFailed, e.to_string());
        }

        debug!(
            "Row {}: {} {} on {} committed",
            row.row_number, action.kind, action.property, action.target_record_id
        );
        outcome.advance(ActionState::Committed);
        outcome
    }
}
