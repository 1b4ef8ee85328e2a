//! Column to property mapping
//!
//! The mapping is an explicit, versioned table of column rules passed in as
//! configuration. Rule order defines output order, so assembly does not depend
//! on the column order of the input spreadsheet.

use crate::app::models::{FieldKind, Property};
use crate::constants::DEFAULT_MAPPING_VERSION;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One column rule: column name → property → field kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Spreadsheet column header
    pub column: String,

    /// Target property
    pub property: Property,

    /// Cell grammar; the property's default kind when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
}

impl ColumnRule {
    pub fn new(column: impl Into<String>, property: Property) -> Self {
        Self {
            column: column.into(),
            property,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Effective field kind for this column
    pub fn field_kind(&self) -> FieldKind {
        self.kind
            .unwrap_or_else(|| self.property.default_field_kind())
    }
}

/// Versioned column mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub version: u32,

    #[serde(default)]
    pub rules: Vec<ColumnRule>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::standard()
    }
}

impl FieldMapping {
    /// Empty mapping with the given version
    pub fn new(version: u32) -> Self {
        Self {
            version,
            rules: Vec::new(),
        }
    }

    /// Standard mapping: one column per property, named after its short name
    pub fn standard() -> Self {
        let properties = [
            Property::Title,
            Property::Type,
            Property::Creator,
            Property::Created,
            Property::License,
            Property::Description,
            Property::Abstract,
            Property::Alternative,
            Property::Subject,
            Property::Language,
            Property::Spatial,
            Property::Temporal,
            Property::Contributor,
            Property::Publisher,
            Property::Rights,
            Property::Relation,
            Property::Source,
            Property::Date,
            Property::Available,
            Property::Format,
        ];

        Self {
            version: DEFAULT_MAPPING_VERSION,
            rules: properties
                .into_iter()
                .map(|property| ColumnRule::new(property.short_name().to_string(), property))
                .collect(),
        }
    }

    /// Add or replace the rule for a column
    pub fn with_rule(mut self, rule: ColumnRule) -> Self {
        self.set_rule(rule);
        self
    }

    /// Add or replace the rule for a column, keeping its position when replacing
    pub fn set_rule(&mut self, rule: ColumnRule) {
        match self.rules.iter_mut().find(|r| r.column == rule.column) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Layer an extension mapping on top of this one
    ///
    /// Extension rules override same-named columns and append new ones; the
    /// resulting version is the higher of the two.
    pub fn extend(&mut self, extension: FieldMapping) {
        self.version = self.version.max(extension.version);
        for rule in extension.rules {
            self.set_rule(rule);
        }
    }

    /// Rule for a column, if mapped
    pub fn rule_for(&self, column: &str) -> Option<&ColumnRule> {
        self.rules.iter().find(|rule| rule.column == column)
    }

    /// Mapped column names in output order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.column.as_str())
    }

    /// Columns from `headers` that no rule maps (ignored during assembly)
    pub fn unmapped_columns<'a>(&self, headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        headers
            .into_iter()
            .map(str::trim)
            .filter(|header| self.rule_for(header).is_none())
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reject mappings with blank or duplicate column names
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.column.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Mapping v{} contains a rule with an empty column name for property '{}'",
                    self.version, rule.property
                )));
            }
            if !seen.insert(rule.column.as_str()) {
                return Err(Error::configuration(format!(
                    "Mapping v{} maps column '{}' more than once",
                    self.version, rule.column
                )));
            }
        }
        Ok(())
    }
}
