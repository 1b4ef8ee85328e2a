//! Metadata validator
//!
//! Checks an assembled entry list against the repository's publication rules
//! and returns every finding as data, grouped by severity.
//!
//! ## Architecture
//!
//! - [`rules`] - The individual rules plus date literal helpers
//!
//! For each property only the most severe findings are kept: a property with
//! an error reports no warnings or suggestions, a property with a warning
//! reports no suggestions. Findings that concern no property are always kept.
//!
//! ## Usage
//!
//! ```rust
//! use metadata_curator::app::models::{MetadataEntry, Property};
//! use metadata_curator::app::services::validator::validate;
//!
//! let entries = vec![MetadataEntry::literal(Property::Title, "Untitled")];
//! let result = validate(&entries);
//! assert!(!result.is_publishable());
//! ```

pub mod rules;

#[cfg(test)]
pub mod tests;

pub use rules::{DateGranularity, date_granularity, is_date_entry, is_valid_date_literal};

use crate::app::models::{
    IssueCode, MetadataEntry, Property, Severity, ValidationIssue, ValidationResult,
};
use crate::app::services::field_parser::ParseNotice;
use crate::app::services::metadata_assembler::{Assembly, AssemblyNotice, AssemblyNoticeKind};
use crate::app::services::vocabulary::Vocabulary;
use std::collections::HashMap;
use tracing::debug;

/// Validates entry lists against one vocabulary
#[derive(Debug, Clone, Copy)]
pub struct Validator<'v> {
    vocabulary: &'v Vocabulary,
    strict_multilingual: bool,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl<'v> Validator<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self {
            vocabulary,
            strict_multilingual: false,
        }
    }

    /// Report mixed multilingual cells as errors instead of warnings
    pub fn with_strict_multilingual(mut self, strict: bool) -> Self {
        self.strict_multilingual = strict;
        self
    }

    /// Validate one record's entries
    pub fn validate(&self, entries: &[MetadataEntry]) -> ValidationResult {
        let issues = self.entry_issues(entries);
        self.finish(issues, entries)
    }

    /// Validate an assembled row, turning its notices into issues as well
    pub fn validate_assembly(&self, assembly: &Assembly) -> ValidationResult {
        let mut issues = self.entry_issues(&assembly.entries);

        for notice in &assembly.notices {
            let issue = self.notice_issue(notice, &assembly.entries);
            if !issues.contains(&issue) {
                issues.push(issue);
            }
        }

        self.finish(issues, &assembly.entries)
    }

    fn entry_issues(&self, entries: &[MetadataEntry]) -> Vec<ValidationIssue> {
        let mut issues = rules::check_required_fields(entries);
        issues.extend(rules::check_empty_values(entries));
        issues.extend(rules::check_resource_type(entries, self.vocabulary));
        issues.extend(rules::check_dates(entries));
        issues.extend(rules::check_person_identifiers(entries, self.vocabulary));
        issues.extend(rules::check_license(entries, self.vocabulary));
        issues.extend(rules::check_languages(entries, self.vocabulary));
        issues.extend(rules::check_system_property_languages(entries));
        issues.extend(rules::check_single_language(entries));
        issues
    }

    fn notice_issue(&self, notice: &AssemblyNotice, entries: &[MetadataEntry]) -> ValidationIssue {
        let property = Some(notice.property.clone());

        match &notice.kind {
            AssemblyNoticeKind::Parse(ParseNotice::MixedMultilingual { .. }) => {
                let issue = ValidationIssue::new(
                    IssueCode::MixedMultilingualCell,
                    property,
                    format!("column '{}': {}", notice.column, notice_text(notice)),
                );
                if self.strict_multilingual {
                    issue.with_severity(Severity::Error)
                } else {
                    issue
                }
            }
            AssemblyNoticeKind::Parse(ParseNotice::EmptyLanguageValue { .. }) => {
                ValidationIssue::new(
                    IssueCode::EmptyLanguageSegment,
                    property,
                    format!("column '{}': {}", notice.column, notice_text(notice)),
                )
            }
            AssemblyNoticeKind::Parse(ParseNotice::IncompleteName { .. }) => ValidationIssue::new(
                IssueCode::IncompleteName,
                property,
                format!("column '{}': {}", notice.column, notice_text(notice)),
            ),
            AssemblyNoticeKind::Parse(ParseNotice::EmptySegment { .. }) => ValidationIssue::new(
                IssueCode::EmptySegment,
                property,
                format!("column '{}': {}", notice.column, notice_text(notice)),
            ),
            AssemblyNoticeKind::UnverifiedVocabulary { value } => {
                let is_language_tag = entries.iter().any(|e| {
                    e.property == notice.property && e.language.as_deref() == Some(value)
                });

                if is_language_tag || notice.property == Property::Language {
                    ValidationIssue::new(
                        IssueCode::UnrecognizedLanguage,
                        property,
                        rules::unrecognized_language_message(&notice.property, value),
                    )
                } else if notice.property == Property::License {
                    ValidationIssue::new(
                        IssueCode::UnrecognizedLicense,
                        property,
                        rules::unrecognized_license_message(value),
                    )
                } else {
                    ValidationIssue::new(
                        IssueCode::UnverifiedResourceType,
                        property,
                        rules::unverified_resource_type_message(value),
                    )
                }
            }
        }
    }

    fn finish(&self, issues: Vec<ValidationIssue>, entries: &[MetadataEntry]) -> ValidationResult {
        let issues = apply_precedence(issues);
        let result =
            ValidationResult::from_issues(issues, rules::count_organization_creators(entries));
        debug!("Validated {} entries: {}", entries.len(), result.summary());
        result
    }
}

fn notice_text(notice: &AssemblyNotice) -> String {
    match &notice.kind {
        AssemblyNoticeKind::Parse(parse) => parse.to_string(),
        AssemblyNoticeKind::UnverifiedVocabulary { value } => value.clone(),
    }
}

/// Keep only the most severe issues per property, preserving order
fn apply_precedence(issues: Vec<ValidationIssue>) -> Vec<ValidationIssue> {
    let mut worst: HashMap<Property, Severity> = HashMap::new();
    for issue in &issues {
        if let Some(property) = &issue.property {
            let entry = worst.entry(property.clone()).or_insert(issue.severity);
            if issue.severity > *entry {
                *entry = issue.severity;
            }
        }
    }

    issues
        .into_iter()
        .filter(|issue| match &issue.property {
            Some(property) => worst.get(property) == Some(&issue.severity),
            None => true,
        })
        .collect()
}

/// Validate entries with the standard vocabulary
pub fn validate(entries: &[MetadataEntry]) -> ValidationResult {
    Validator::default().validate(entries)
}

/// Validate an assembled row with the standard vocabulary
pub fn validate_assembly(assembly: &Assembly) -> ValidationResult {
    Validator::default().validate_assembly(assembly)
}
