//! Data models for validation results and quality reports
//!
//! Validation issues are returned as data rather than raised, so a batch of
//! records can be checked completely and every problem reported at once.

use super::Property;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Validation Issues
// =============================================================================

/// Severity of a validation issue, ordered from advisory to blocking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory improvement
    Suggestion,
    /// Non-blocking quality issue
    Warning,
    /// Blocks publication
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Reason code attached to every validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingRequiredField,
    InvalidResourceType,
    InvalidDateFormat,
    InvalidPersonIdentifier,
    EmptyValue,
    UnrecognizedLicense,
    UnrecognizedLanguage,
    UnverifiedResourceType,
    LanguageOnSystemProperty,
    MixedMultilingualCell,
    EmptyLanguageSegment,
    IncompleteName,
    EmptySegment,
    SingleLanguage,
}

impl IssueCode {
    /// Severity this code is reported at by default
    pub fn default_severity(&self) -> Severity {
        match self {
            IssueCode::MissingRequiredField
            | IssueCode::InvalidResourceType
            | IssueCode::InvalidDateFormat
            | IssueCode::InvalidPersonIdentifier
            | IssueCode::EmptyValue => Severity::Error,
            IssueCode::UnrecognizedLicense
            | IssueCode::UnrecognizedLanguage
            | IssueCode::UnverifiedResourceType
            | IssueCode::LanguageOnSystemProperty
            | IssueCode::MixedMultilingualCell
            | IssueCode::EmptyLanguageSegment
            | IssueCode::IncompleteName
            | IssueCode::EmptySegment => Severity::Warning,
            IssueCode::SingleLanguage => Severity::Suggestion,
        }
    }
}

/// A single finding about one property of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    /// Property the finding is about, if it concerns one
    pub property: Option<Property>,
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue at the code's default severity
    pub fn new(code: IssueCode, property: Option<Property>, message: impl Into<String>) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            property,
            message: message.into(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Outcome of one validation pass
///
/// Built fresh by every call and never patched afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Blocking issues
    pub errors: Vec<ValidationIssue>,
    /// Non-blocking quality issues
    pub warnings: Vec<ValidationIssue>,
    /// Advisory improvements
    pub suggestions: Vec<ValidationIssue>,
    /// Creator/contributor items that are organizations rather than persons
    pub organization_creators: usize,
}

impl ValidationResult {
    /// Build a result from a flat issue list, routing each issue by severity
    pub fn from_issues(issues: Vec<ValidationIssue>, organization_creators: usize) -> Self {
        let mut result = Self {
            organization_creators,
            ..Self::default()
        };

        for issue in issues {
            match issue.severity {
                Severity::Error => result.errors.push(issue),
                Severity::Warning => result.warnings.push(issue),
                Severity::Suggestion => result.suggestions.push(issue),
            }
        }

        result
    }

    /// Whether the record may be published (no blocking issue)
    pub fn is_publishable(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of issues of any severity
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.suggestions.len()
    }

    /// All issues, most severe first
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }

    /// Whether an issue with this code was reported for this property
    pub fn has_issue(&self, code: IssueCode, property: &Property) -> bool {
        self.issues()
            .any(|issue| issue.code == code && issue.property.as_ref() == Some(property))
    }

    /// Get summary of the validation outcome for logging
    pub fn summary(&self) -> String {
        format!(
            "{} errors, {} warnings, {} suggestions{}",
            self.errors.len(),
            self.warnings.len(),
            self.suggestions.len(),
            if self.is_publishable() {
                ""
            } else {
                " (not publishable)"
            }
        )
    }
}

// =============================================================================
// Quality Scores
// =============================================================================

/// Per-metric scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    pub completeness: f64,
    pub richness: f64,
    pub consistency: f64,
    pub standardization: f64,
}

/// Quality assessment of a snapshot of one or more records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub metrics: MetricScores,
    /// Weighted sum of the metrics, in [0, 100]
    pub overall: f64,
    /// Highest-priority unmet rule per metric, most impactful first
    pub recommendations: Vec<String>,
}

/// Counts summarising a scored batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub resources: usize,
    pub publishable: usize,
    pub errors: usize,
    pub warnings: usize,
    pub suggestions: usize,
    pub overall_score: f64,
}

/// Serializable quality report handed to presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub summary: QualitySummary,
    pub metrics: MetricScores,
    pub recommendations: Vec<String>,
}

impl QualityReport {
    /// Combine a score with the validation results of the same records
    pub fn new(score: QualityScore, validations: &[ValidationResult]) -> Self {
        let summary = QualitySummary {
            resources: validations.len(),
            publishable: validations.iter().filter(|v| v.is_publishable()).count(),
            errors: validations.iter().map(|v| v.errors.len()).sum(),
            warnings: validations.iter().map(|v| v.warnings.len()).sum(),
            suggestions: validations.iter().map(|v| v.suggestions.len()).sum(),
            overall_score: score.overall,
        };

        Self {
            summary,
            metrics: score.metrics,
            recommendations: score.recommendations,
        }
    }
}
