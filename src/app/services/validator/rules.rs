//! Individual validation rules
//!
//! Each rule inspects an entry list and returns the issues it finds. Rules
//! never short-circuit: every rule runs on every call so all findings for a
//! record are reported together.

use crate::app::models::{
    Agent, IssueCode, MetadataEntry, Property, ValidationIssue, ValueType,
};
use crate::app::services::vocabulary::Vocabulary;
use crate::constants::DATE_PATTERN;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_PATTERN).expect("valid date pattern"));

// =============================================================================
// Date Literals
// =============================================================================

/// Precision of a date literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateGranularity {
    Year,
    Month,
    Day,
}

/// Granularity of a calendar-valid `YYYY`, `YYYY-MM` or `YYYY-MM-DD` literal
pub fn date_granularity(value: &str) -> Option<DateGranularity> {
    let captures = DATE_RE.captures(value.trim())?;
    let year: i32 = captures.get(1)?.as_str().parse().ok()?;

    match (captures.get(2), captures.get(3)) {
        (None, _) => Some(DateGranularity::Year),
        (Some(month), None) => {
            let month: u32 = month.as_str().parse().ok()?;
            (1..=12)
                .contains(&month)
                .then_some(DateGranularity::Month)
        }
        (Some(month), Some(day)) => {
            let month: u32 = month.as_str().parse().ok()?;
            let day: u32 = day.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day).map(|_| DateGranularity::Day)
        }
    }
}

/// Whether a value is an accepted date literal
pub fn is_valid_date_literal(value: &str) -> bool {
    date_granularity(value).is_some()
}

/// Whether an entry must hold a date literal
pub fn is_date_entry(entry: &MetadataEntry) -> bool {
    entry.property.is_date_valued() || entry.value_type == Some(ValueType::Date)
}

// =============================================================================
// Messages
// =============================================================================

pub(crate) fn missing_required_message(property: &Property) -> String {
    format!("missing required field {}", property)
}

pub(crate) fn unrecognized_license_message(value: &str) -> String {
    format!("unrecognized license '{}'", value)
}

pub(crate) fn unrecognized_language_message(property: &Property, code: &str) -> String {
    format!("unrecognized language '{}' on {}", code, property)
}

pub(crate) fn unverified_resource_type_message(value: &str) -> String {
    format!("unverified resource type '{}'", value)
}

// =============================================================================
// Rules
// =============================================================================

/// Rule 1: every mandatory property has at least one entry
pub fn check_required_fields(entries: &[MetadataEntry]) -> Vec<ValidationIssue> {
    Property::mandatory()
        .into_iter()
        .filter(|property| !entries.iter().any(|e| &e.property == property))
        .map(|property| {
            let message = missing_required_message(&property);
            ValidationIssue::new(IssueCode::MissingRequiredField, Some(property), message)
        })
        .collect()
}

/// Rule 2: resource types match the identifier pattern (known ones preferred)
pub fn check_resource_type(
    entries: &[MetadataEntry],
    vocabulary: &Vocabulary,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for entry in entries.iter().filter(|e| e.property == Property::Type) {
        let Some(value) = entry.text() else {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidResourceType,
                Some(Property::Type),
                "invalid resource type: expected a URI, found a person list",
            ));
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        if !vocabulary.is_resource_type_syntax(value) {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidResourceType,
                Some(Property::Type),
                format!("invalid resource type '{}'", value),
            ));
        } else if !vocabulary.is_known_resource_type(value) {
            issues.push(ValidationIssue::new(
                IssueCode::UnverifiedResourceType,
                Some(Property::Type),
                unverified_resource_type_message(value),
            ));
        }
    }

    issues
}

/// Rule 3: date-valued entries hold `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
pub fn check_dates(entries: &[MetadataEntry]) -> Vec<ValidationIssue> {
    entries
        .iter()
        .filter(|entry| is_date_entry(entry) && !entry.value.is_empty())
        .filter(|entry| !entry.text().is_some_and(is_valid_date_literal))
        .map(|entry| {
            ValidationIssue::new(
                IssueCode::InvalidDateFormat,
                Some(entry.property.clone()),
                format!(
                    "invalid date format '{}' for {} (expected YYYY, YYYY-MM or YYYY-MM-DD)",
                    entry.value, entry.property
                ),
            )
        })
        .collect()
}

/// Rule 4: licenses should come from the known set; free text is allowed
pub fn check_license(entries: &[MetadataEntry], vocabulary: &Vocabulary) -> Vec<ValidationIssue> {
    entries
        .iter()
        .filter(|e| e.property == Property::License && !e.value.is_empty())
        .filter_map(|entry| {
            let value = entry.value.to_string();
            (!vocabulary.is_known_license(&value)).then(|| {
                ValidationIssue::new(
                    IssueCode::UnrecognizedLicense,
                    Some(Property::License),
                    unrecognized_license_message(&value),
                )
            })
        })
        .collect()
}

/// Rule 5: multilingual-capable properties with one language-less entry
pub fn check_single_language(entries: &[MetadataEntry]) -> Vec<ValidationIssue> {
    [Property::Title, Property::Description, Property::Subject]
        .into_iter()
        .filter(|property| {
            let matching: Vec<&MetadataEntry> =
                entries.iter().filter(|e| &e.property == property).collect();
            matching.len() == 1 && matching[0].language.is_none()
        })
        .map(|property| {
            let message = format!("add a second language to {}", property);
            ValidationIssue::new(IssueCode::SingleLanguage, Some(property), message)
        })
        .collect()
}

/// Rule 6: organizations among creators/contributors (counted, never an issue)
pub fn count_organization_creators(entries: &[MetadataEntry]) -> usize {
    entries
        .iter()
        .filter(|e| e.property.is_agent_valued())
        .filter_map(|e| e.value.agents())
        .flatten()
        .filter(|agent| agent.is_organization())
        .count()
}

/// Person identifiers must pass the checksum
pub fn check_person_identifiers(
    entries: &[MetadataEntry],
    vocabulary: &Vocabulary,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for entry in entries {
        let Some(agents) = entry.value.agents() else {
            continue;
        };
        for agent in agents {
            if let Agent::Person(person) = agent {
                if let Some(identifier) = &person.identifier {
                    if !vocabulary.is_valid_person_identifier(identifier) {
                        issues.push(ValidationIssue::new(
                            IssueCode::InvalidPersonIdentifier,
                            Some(entry.property.clone()),
                            format!(
                                "invalid person identifier '{}' for {}",
                                identifier,
                                person.full_name()
                            ),
                        ));
                    }
                }
            }
        }
    }

    issues
}

/// Entries must carry content
pub fn check_empty_values(entries: &[MetadataEntry]) -> Vec<ValidationIssue> {
    entries
        .iter()
        .filter(|entry| entry.value.is_empty())
        .map(|entry| {
            ValidationIssue::new(
                IssueCode::EmptyValue,
                Some(entry.property.clone()),
                format!("empty value for {}", entry.property),
            )
        })
        .collect()
}

/// Language tags and `language` values should be known ISO 639-1 codes
pub fn check_languages(entries: &[MetadataEntry], vocabulary: &Vocabulary) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for entry in entries {
        if let Some(code) = &entry.language {
            if !vocabulary.is_known_language(code) {
                issues.push(ValidationIssue::new(
                    IssueCode::UnrecognizedLanguage,
                    Some(entry.property.clone()),
                    unrecognized_language_message(&entry.property, code),
                ));
            }
        }

        if entry.property == Property::Language {
            if let Some(code) = entry.text().filter(|c| !c.trim().is_empty()) {
                if !vocabulary.is_known_language(code) {
                    issues.push(ValidationIssue::new(
                        IssueCode::UnrecognizedLanguage,
                        Some(Property::Language),
                        unrecognized_language_message(&Property::Language, code),
                    ));
                }
            }
        }
    }

    issues
}

/// System-controlled properties should not carry a language tag
pub fn check_system_property_languages(entries: &[MetadataEntry]) -> Vec<ValidationIssue> {
    entries
        .iter()
        .filter(|e| e.property.is_system_controlled() && e.language.is_some())
        .map(|entry| {
            ValidationIssue::new(
                IssueCode::LanguageOnSystemProperty,
                Some(entry.property.clone()),
                format!(
                    "language tag on system-controlled property {}",
                    entry.property
                ),
            )
        })
        .collect()
}
