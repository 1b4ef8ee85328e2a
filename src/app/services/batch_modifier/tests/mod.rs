//! Tests for the batch modification interpreter
//!
//! Action file parsing, entry list edits, the row lifecycle and the record
//! store.

pub mod interpreter_tests;

// Test helper functions and fixtures
use super::InMemoryRecordStore;
use crate::app::models::{Agent, MetadataEntry, PersonRecord, Property, ValueType};

pub const DATASET_TYPE: &str = "http://purl.org/coar/resource_type/c_ddb1";

/// A publishable record with a bilingual title
pub fn create_record() -> Vec<MetadataEntry> {
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

/// A store holding R1 and R2, both created from [`create_record`]
pub fn create_store() -> InMemoryRecordStore {
    let mut store = InMemoryRecordStore::new();
    store.insert("R1", create_record());
    store.insert("R2", create_record());
    store
}

/// Texts of a property's entries in order
pub fn texts_of(entries: &[MetadataEntry], property: &Property) -> Vec<String> {
    entries
        .iter()
        .filter(|e| &e.property == property)
        .map(|e| e.value.to_string())
        .collect()
}
