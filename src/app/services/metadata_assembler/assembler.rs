//! Row assembly into ordered metadata entry lists

use super::mapping::{ColumnRule, FieldMapping};
use crate::app::models::{MetadataEntry, Property, Row};
use crate::app::services::field_parser::{Fragment, ParseNotice, parse_field};
use crate::app::services::vocabulary::Vocabulary;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Side-channel finding attached to an assembled entry list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyNotice {
    pub column: String,
    pub property: Property,
    pub kind: AssemblyNoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssemblyNoticeKind {
    /// Recoverable cell oddity reported by the field parser
    Parse(ParseNotice),
    /// Value emitted although it is not in the controlled vocabulary
    UnverifiedVocabulary { value: String },
}

impl fmt::Display for AssemblyNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AssemblyNoticeKind::Parse(notice) => {
                write!(f, "column '{}': {}", self.column, notice)
            }
            AssemblyNoticeKind::UnverifiedVocabulary { value } => write!(
                f,
                "column '{}': '{}' is not a known {} value",
                self.column, value, self.property
            ),
        }
    }
}

/// Ordered entry list for one row plus its side-channel notices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub entries: Vec<MetadataEntry>,
    pub notices: Vec<AssemblyNotice>,
}

impl Assembly {
    pub fn into_entries(self) -> Vec<MetadataEntry> {
        self.entries
    }

    /// Whether any value was flagged as outside the controlled vocabulary
    pub fn has_unverified_values(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n.kind, AssemblyNoticeKind::UnverifiedVocabulary { .. }))
    }
}

/// Builds repository entry lists from spreadsheet rows
#[derive(Debug, Clone, Copy)]
pub struct MetadataAssembler<'v> {
    vocabulary: &'v Vocabulary,
}

impl Default for MetadataAssembler<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl<'v> MetadataAssembler<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Assemble one row in mapping order
    ///
    /// Absent or blank cells are skipped and unknown columns ignored. Fails only
    /// for structurally malformed cells, naming the offending column.
    pub fn assemble(&self, row: &Row, mapping: &FieldMapping) -> Result<Assembly> {
        let mut assembly = Assembly::default();

        for rule in &mapping.rules {
            let Some(raw) = row.get(&rule.column) else {
                continue;
            };

            let parsed = parse_field(raw, rule.field_kind()).map_err(|e| match e {
                Error::Format { message, .. } => Error::format(&rule.column, message),
                other => other,
            })?;

            trace!(
                "Column '{}' -> {} fragment(s) for {}",
                rule.column,
                parsed.fragments.len(),
                rule.property
            );

            for notice in parsed.notices {
                assembly.notices.push(AssemblyNotice {
                    column: rule.column.clone(),
                    property: rule.property.clone(),
                    kind: AssemblyNoticeKind::Parse(notice),
                });
            }

            for fragment in parsed.fragments {
                self.flag_unverified(rule, &fragment, &mut assembly.notices);
                assembly
                    .entries
                    .push(fragment.into_entry(rule.property.clone()));
            }
        }

        debug!(
            "Assembled {} entries ({} notices) with mapping v{}",
            assembly.entries.len(),
            assembly.notices.len(),
            mapping.version
        );

        Ok(assembly)
    }

    /// Record vocabulary-governed values that the vocabulary does not know
    fn flag_unverified(
        &self,
        rule: &ColumnRule,
        fragment: &Fragment,
        notices: &mut Vec<AssemblyNotice>,
    ) {
        let mut unverified = Vec::new();

        if let Some(text) = fragment.text() {
            let known = match rule.property {
                Property::Type => self.vocabulary.is_known_resource_type(text),
                Property::License => self.vocabulary.is_known_license(text),
                Property::Language => self.vocabulary.is_known_language(text),
                _ => true,
            };
            if !known {
                unverified.push(text.to_string());
            }
        }

        if let Some(language) = &fragment.language {
            if !self.vocabulary.is_known_language(language) {
                unverified.push(language.clone());
            }
        }

        for value in unverified {
            debug!(
                "Unverified {} value '{}' in column '{}'",
                rule.property, value, rule.column
            );
            notices.push(AssemblyNotice {
                column: rule.column.clone(),
                property: rule.property.clone(),
                kind: AssemblyNoticeKind::UnverifiedVocabulary { value },
            });
        }
    }
}

/// Assemble a row with the standard vocabulary
pub fn assemble(row: &Row, mapping: &FieldMapping) -> Result<Assembly> {
    MetadataAssembler::default().assemble(row, mapping)
}
