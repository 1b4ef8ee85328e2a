//! Tests for the validator
//!
//! Rule coverage, severity precedence, and notice conversion.


// Test helper functions and fixtures
use crate::app::models::{Agent, MetadataEntry, PersonRecord, Property, ValueType};

pub const DATASET_TYPE: &str = "http://purl.org/coar/resource_type/c_ddb1";

/// A publishable record: every mandatory property, bilingual title
pub fn create_valid_entries() -> Vec<MetadataEntry> {
    vec![
        MetadataEntry::literal(Property::Title, "Titre")
            .with_language("fr")
            .with_value_type(ValueType::String),
        MetadataEntry::literal(Property::Title, "Title")
            .with_language("en")
            .with_value_type(ValueType::String),
        MetadataEntry::literal(Property::Type, DATASET_TYPE).with_value_type(ValueType::Uri),
        MetadataEntry::agents(
            Property::Creator,
            vec![Agent::Person(PersonRecord::new("Dupont", "Jean"))],
        ),
        MetadataEntry::literal(Property::Created, "2024").with_value_type(ValueType::Date),
        MetadataEntry::literal(Property::License, "CC-BY-4.0").with_value_type(ValueType::String),
    ]
}

/// Valid entries with every entry of one property removed
pub fn without(property: &Property) -> Vec<MetadataEntry> {
    create_valid_entries()
        .into_iter()
        .filter(|entry| &entry.property != property)
        .collect()
}

/// Valid entries with one property's value replaced
pub fn with_literal(property: Property, value: &str) -> Vec<MetadataEntry> {
    let mut entries = without(&property);
    entries.push(MetadataEntry::literal(property, value));
    entries
}
