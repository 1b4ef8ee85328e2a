//! Tests for the metadata assembler
//!
//! Unit tests for mapping tables, row assembly, and CSV reading.

pub mod assembler_tests;

// Test helper functions and fixtures
use crate::app::models::{MetadataEntry, Property, Row};

/// Dataset resource type used across fixtures
pub const DATASET_TYPE: &str = "http://purl.org/coar/resource_type/c_ddb1";

/// The reference row: bilingual title, one person, every mandatory column
pub fn create_reference_row() -> Row {
    Row::from([
        ("title", "fr:Titre|en:Title"),
        ("type", DATASET_TYPE),
        ("creator", "Dupont,Jean"),
        ("created", "2024"),
        ("license", "CC-BY-4.0"),
    ])
}

/// Properties of an entry list in order
pub fn properties_of(entries: &[MetadataEntry]) -> Vec<Property> {
    entries.iter().map(|entry| entry.property.clone()).collect()
}

/// Number of entries for one property
pub fn count_of(entries: &[MetadataEntry], property: &Property) -> usize {
    entries.iter().filter(|e| &e.property == property).count()
}
