//! Data models for metadata transformation and curation
//!
//! This module contains the core data structures for representing repository
//! metadata entries, the people and organizations they credit, tabular rows,
//! and batch modification actions. Validation and quality report types live in
//! [`report`].

pub mod report;

pub use report::{
    IssueCode, MetricScores, QualityReport, QualityScore, QualitySummary, Severity,
    ValidationIssue, ValidationResult,
};

use crate::constants::{properties, value_types};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Property Identifiers
// =============================================================================

/// Canonical metadata property
///
/// Known properties map to fixed repository URIs. Any other absolute URI is
/// carried as [`Property::Other`] so custom mappings can target properties the
/// engine has no special rules for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Property {
    Title,
    Creator,
    Created,
    License,
    Type,
    Description,
    Abstract,
    Alternative,
    Subject,
    Language,
    Spatial,
    Temporal,
    Contributor,
    Publisher,
    Rights,
    Relation,
    Source,
    Date,
    Available,
    Format,
    /// Any other property, identified by its full URI
    Other(String),
}

/// Every property with a dedicated variant, in canonical order
const KNOWN_PROPERTIES: [Property; 20] = [
    Property::Title,
    Property::Creator,
    Property::Created,
    Property::License,
    Property::Type,
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

impl Property {
    /// Full property URI as sent to the repository
    pub fn uri(&self) -> &str {
        match self {
            Property::Title => properties::TITLE,
            Property::Creator => properties::CREATOR,
            Property::Created => properties::CREATED,
            Property::License => properties::LICENSE,
            Property::Type => properties::TYPE,
            Property::Description => properties::DESCRIPTION,
            Property::Abstract => properties::ABSTRACT,
            Property::Alternative => properties::ALTERNATIVE,
            Property::Subject => properties::SUBJECT,
            Property::Language => properties::LANGUAGE,
            Property::Spatial => properties::SPATIAL,
            Property::Temporal => properties::TEMPORAL,
            Property::Contributor => properties::CONTRIBUTOR,
            Property::Publisher => properties::PUBLISHER,
            Property::Rights => properties::RIGHTS,
            Property::Relation => properties::RELATION,
            Property::Source => properties::SOURCE,
            Property::Date => properties::DATE,
            Property::Available => properties::AVAILABLE,
            Property::Format => properties::FORMAT,
            Property::Other(uri) => uri,
        }
    }

    /// Short, human-facing name (used in messages and mapping files)
    pub fn short_name(&self) -> &str {
        match self {
            Property::Title => "title",
            Property::Creator => "creator",
            Property::Created => "created",
            Property::License => "license",
            Property::Type => "type",
            Property::Description => "description",
            Property::Abstract => "abstract",
            Property::Alternative => "alternative",
            Property::Subject => "keywords",
            Property::Language => "language",
            Property::Spatial => "spatial",
            Property::Temporal => "temporal",
            Property::Contributor => "contributor",
            Property::Publisher => "publisher",
            Property::Rights => "rights",
            Property::Relation => "relation",
            Property::Source => "source",
            Property::Date => "date",
            Property::Available => "available",
            Property::Format => "format",
            Property::Other(uri) => uri,
        }
    }

    /// The mandatory property set; every publishable record carries all five
    pub fn mandatory() -> [Property; 5] {
        [
            Property::Type,
            Property::Title,
            Property::Creator,
            Property::Created,
            Property::License,
        ]
    }

    /// Whether absence of this property blocks publication
    pub fn is_mandatory(&self) -> bool {
        matches!(
            self,
            Property::Type
                | Property::Title
                | Property::Creator
                | Property::Created
                | Property::License
        )
    }

    /// Whether this property is system-controlled and never language-tagged
    pub fn is_system_controlled(&self) -> bool {
        matches!(
            self,
            Property::Type
                | Property::Created
                | Property::License
                | Property::Date
                | Property::Available
        )
    }

    /// Whether a second language is expected for this property
    pub fn is_multilingual_capable(&self) -> bool {
        matches!(
            self,
            Property::Title | Property::Description | Property::Subject
        )
    }

    /// Whether values of this property must be date literals
    pub fn is_date_valued(&self) -> bool {
        matches!(
            self,
            Property::Created | Property::Date | Property::Available
        )
    }

    /// Whether values of this property are person/organization lists
    pub fn is_agent_valued(&self) -> bool {
        matches!(self, Property::Creator | Property::Contributor)
    }

    /// Field kind used when a mapping rule does not specify one
    pub fn default_field_kind(&self) -> FieldKind {
        match self {
            Property::Title
            | Property::Description
            | Property::Abstract
            | Property::Alternative
            | Property::Rights
            | Property::Spatial => FieldKind::Multilingual,
            Property::Creator | Property::Contributor => FieldKind::PersonList,
            Property::Subject => FieldKind::DelimitedList,
            Property::Type | Property::Relation => FieldKind::Uri,
            Property::Created | Property::Date | Property::Available => FieldKind::Date,
            Property::License
            | Property::Language
            | Property::Temporal
            | Property::Publisher
            | Property::Source
            | Property::Format
            | Property::Other(_) => FieldKind::Text,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for Property {
    type Err = Error;

    /// Accepts short names, `dcterms:`/`nakala:` prefixed names and full URIs
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::format("property", "property identifier is empty"));
        }

        if let Some(known) = KNOWN_PROPERTIES.iter().find(|p| p.uri() == trimmed) {
            return Ok(known.clone());
        }

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Property::Other(trimmed.to_string()));
        }

        let name = trimmed
            .strip_prefix("dcterms:")
            .or_else(|| trimmed.strip_prefix("nakala:"))
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        let property = match name.as_str() {
            "keywords" | "keyword" | "subject" => Property::Subject,
            "creation_date" | "created" => Property::Created,
            "licence" | "license" => Property::License,
            "resource_type" | "type" => Property::Type,
            other => KNOWN_PROPERTIES
                .iter()
                .find(|p| p.short_name() == other)
                .cloned()
                .ok_or_else(|| {
                    Error::format("property", format!("unknown property identifier '{}'", s))
                })?,
        };

        Ok(property)
    }
}

impl TryFrom<String> for Property {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Property> for String {
    fn from(property: Property) -> Self {
        property.uri().to_string()
    }
}

// =============================================================================
// Field Kinds and Value Types
// =============================================================================

/// How a raw cell is parsed into fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain string, one language-less fragment
    Text,
    /// Plain URI literal
    Uri,
    /// Plain date literal
    Date,
    /// `lang:value|lang:value` cell
    Multilingual,
    /// `Surname,GivenName;Organization` cell
    PersonList,
    /// `;`-separated list, each item optionally language-prefixed
    DelimitedList,
}

impl FieldKind {
    /// Value type tag attached to fragments of this kind, if any
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            FieldKind::Uri => Some(ValueType::Uri),
            FieldKind::Date => Some(ValueType::Date),
            FieldKind::Text | FieldKind::Multilingual | FieldKind::DelimitedList => {
                Some(ValueType::String)
            }
            FieldKind::PersonList => None,
        }
    }
}

/// Literal encoding of an entry value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "http://www.w3.org/2001/XMLSchema#string")]
    String,
    #[serde(rename = "http://www.w3.org/2001/XMLSchema#anyURI")]
    Uri,
    #[serde(rename = "http://www.w3.org/2001/XMLSchema#date")]
    Date,
    #[serde(rename = "http://www.w3.org/2001/XMLSchema#integer")]
    Integer,
}

impl ValueType {
    /// Datatype URI of this value type
    pub fn uri(&self) -> &'static str {
        match self {
            ValueType::String => value_types::STRING,
            ValueType::Uri => value_types::URI,
            ValueType::Date => value_types::DATE,
            ValueType::Integer => value_types::INTEGER,
        }
    }
}

// =============================================================================
// People and Organizations
// =============================================================================

/// A credited person
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRecord {
    pub surname: String,

    #[serde(rename = "givenName")]
    pub given_name: String,

    /// ORCID iD, validated by checksum when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl PersonRecord {
    pub fn new(surname: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// "Surname, GivenName" display form
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.surname, self.given_name)
    }
}

/// One item of a creator/contributor list
///
/// Organizations are plain strings with no surname/given-name split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Agent {
    Person(PersonRecord),
    Organization(String),
}

impl Agent {
    pub fn is_organization(&self) -> bool {
        matches!(self, Agent::Organization(_))
    }

    pub fn as_person(&self) -> Option<&PersonRecord> {
        match self {
            Agent::Person(person) => Some(person),
            Agent::Organization(_) => None,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Person(person) => write!(f, "{}", person.full_name()),
            Agent::Organization(name) => write!(f, "{}", name),
        }
    }
}

// =============================================================================
// Metadata Entries
// =============================================================================

/// Value of a metadata entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Person/organization list (creator, contributor)
    Agents(Vec<Agent>),
    /// Plain string or literal (URI, date, integer)
    Literal(String),
}

impl MetadataValue {
    /// Literal text, if this is not an agent list
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Literal(text) => Some(text),
            MetadataValue::Agents(_) => None,
        }
    }

    /// Agent list, if this is one
    pub fn agents(&self) -> Option<&[Agent]> {
        match self {
            MetadataValue::Agents(agents) => Some(agents),
            MetadataValue::Literal(_) => None,
        }
    }

    /// Whether the value carries no content
    pub fn is_empty(&self) -> bool {
        match self {
            MetadataValue::Literal(text) => text.trim().is_empty(),
            MetadataValue::Agents(agents) => agents.is_empty(),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Literal(text) => write!(f, "{}", text),
            MetadataValue::Agents(agents) => {
                let names: Vec<String> = agents.iter().map(|a| a.to_string()).collect();
                write!(f, "{}", names.join("; "))
            }
        }
    }
}

/// One fact about a resource, in the repository's wire shape
///
/// `(property, language)` pairs are not unique: multilingual repetition of the
/// same property is the normal case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "propertyIdentifier")]
    pub property: Property,

    pub value: MetadataValue,

    /// ISO 639-1 code; `None` means undetermined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(
        rename = "valueType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub value_type: Option<ValueType>,
}

impl MetadataEntry {
    /// Create a language-less literal entry
    pub fn literal(property: Property, value: impl Into<String>) -> Self {
        Self {
            property,
            value: MetadataValue::Literal(value.into()),
            language: None,
            value_type: None,
        }
    }

    /// Create an agent-list entry
    pub fn agents(property: Property, agents: Vec<Agent>) -> Self {
        Self {
            property,
            value: MetadataValue::Agents(agents),
            language: None,
            value_type: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Literal text of the value, if any
    pub fn text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Whether the entry matches a language scope (`None` scope matches all)
    pub fn in_language_scope(&self, scope: Option<&str>) -> bool {
        match scope {
            None => true,
            Some(language) => self.language.as_deref() == Some(language),
        }
    }
}

// =============================================================================
// Tabular Rows
// =============================================================================

/// One spreadsheet row keyed by column name
///
/// Missing keys and blank cells both read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from a CSV header and record
    pub fn from_record(headers: &csv::StringRecord, record: &csv::StringRecord) -> Self {
        headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.trim().to_string(), value.to_string()))
            .collect()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Trimmed, non-empty cell value
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Row {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect()
    }
}

// =============================================================================
// Modification Actions
// =============================================================================

/// Kind of batch edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Append a new entry; duplicates are kept
    Add,
    /// Remove every matching entry, then insert the new one
    Replace,
    /// Remove every matching entry
    Delete,
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(ActionKind::Add),
            "replace" | "modify" => Ok(ActionKind::Replace),
            "delete" => Ok(ActionKind::Delete),
            other => Err(Error::format(
                "action",
                format!(
                    "unknown action '{}' (expected add, replace, modify or delete)",
                    other
                ),
            )),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Add => "add",
            ActionKind::Replace => "replace",
            ActionKind::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// One row of an action file, applied exactly once to its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationAction {
    pub target_record_id: String,
    pub kind: ActionKind,
    pub property: Property,
    pub new_value: String,
    pub language: Option<String>,
}

impl ModificationAction {
    pub fn new(
        target_record_id: impl Into<String>,
        kind: ActionKind,
        property: Property,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            target_record_id: target_record_id.into(),
            kind,
            property,
            new_value: new_value.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_parsing_short_names() {
        assert_eq!("title".parse::<Property>().unwrap(), Property::Title);
        assert_eq!("Keywords".parse::<Property>().unwrap(), Property::Subject);
        assert_eq!("dcterms:spatial".parse::<Property>().unwrap(), Property::Spatial);
        assert_eq!("nakala:created".parse::<Property>().unwrap(), Property::Created);
        assert_eq!("licence".parse::<Property>().unwrap(), Property::License);
    }

    #[test]
    fn test_property_parsing_uris() {
        assert_eq!(
            properties::TITLE.parse::<Property>().unwrap(),
            Property::Title
        );
        assert_eq!(
            "http://example.org/terms#funding".parse::<Property>().unwrap(),
            Property::Other("http://example.org/terms#funding".to_string())
        );
    }

    #[test]
    fn test_property_parsing_rejects_unknown_names() {
        let error = "colour".parse::<Property>().unwrap_err();
        assert!(error.is_format_error());
        assert!("   ".parse::<Property>().is_err());
    }

    #[test]
    fn test_mandatory_set() {
        let mandatory = Property::mandatory();
        assert_eq!(mandatory.len(), 5);
        assert!(mandatory.iter().all(Property::is_mandatory));
        assert!(!Property::Description.is_mandatory());
    }

    #[test]
    fn test_system_controlled_properties() {
        assert!(Property::Type.is_system_controlled());
        assert!(Property::Created.is_system_controlled());
        assert!(Property::License.is_system_controlled());
        assert!(!Property::Title.is_system_controlled());
    }

    #[test]
    fn test_action_kind_parsing() {
        assert_eq!("add".parse::<ActionKind>().unwrap(), ActionKind::Add);
        assert_eq!(" Modify ".parse::<ActionKind>().unwrap(), ActionKind::Replace);
        assert_eq!("replace".parse::<ActionKind>().unwrap(), ActionKind::Replace);
        assert_eq!("DELETE".parse::<ActionKind>().unwrap(), ActionKind::Delete);
        assert!("upsert".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_row_treats_blank_cells_as_absent() {
        let row = Row::from([("title", "  "), ("creator", " Dupont,Jean ")]);
        assert_eq!(row.get("title"), None);
        assert_eq!(row.get("creator"), Some("Dupont,Jean"));
        assert_eq!(row.get("license"), None);
    }

    #[test]
    fn test_entry_wire_shape() {
        let entry = MetadataEntry::literal(Property::Title, "Titre")
            .with_language("fr")
            .with_value_type(ValueType::String);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["propertyIdentifier"], properties::TITLE);
        assert_eq!(json["value"], "Titre");
        assert_eq!(json["language"], "fr");
        assert_eq!(json["valueType"], value_types::STRING);
    }

    #[test]
    fn test_person_entry_wire_shape() {
        let entry = MetadataEntry::agents(
            Property::Creator,
            vec![
                Agent::Person(PersonRecord::new("Dupont", "Jean")),
                Agent::Organization("CNRS".to_string()),
            ],
        );
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["value"][0]["surname"], "Dupont");
        assert_eq!(json["value"][0]["givenName"], "Jean");
        assert!(json["value"][0].get("identifier").is_none());
        assert_eq!(json["value"][1], "CNRS");
        assert!(json.get("language").is_none());

        let back: MetadataEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
