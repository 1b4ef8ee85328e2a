//! Tests for the quality scorer
//!
//! Metric computations, weighting, recommendation ranking and configuration.


// Test helper functions and fixtures
use crate::app::models::{Agent, MetadataEntry, PersonRecord, Property};

pub const DATASET_TYPE: &str = "http://purl.org/coar/resource_type/c_ddb1";

/// A record with every mandatory property and a bilingual title
pub fn create_minimal_record() -> Vec<MetadataEntry> {
    vec![
        MetadataEntry::literal(Property::Title, "Titre").with_language("fr"),
        MetadataEntry::literal(Property::Title, "Title").with_language("en"),
        MetadataEntry::literal(Property::Type, DATASET_TYPE),
        MetadataEntry::agents(
            Property::Creator,
            vec![Agent::Person(PersonRecord::new("Dupont", "Jean"))],
        ),
        MetadataEntry::literal(Property::Created, "2024"),
        MetadataEntry::literal(Property::License, "CC-BY-4.0"),
    ]
}

/// A record that meets every completeness and richness rule
pub fn create_rich_record() -> Vec<MetadataEntry> {
    let mut record = create_minimal_record();
    record.extend([
        MetadataEntry::literal(Property::Description, words(25)).with_language("en"),
        MetadataEntry::literal(Property::Subject, "ceramics").with_language("en"),
        MetadataEntry::literal(Property::Subject, "archaeology").with_language("en"),
        MetadataEntry::literal(Property::Language, "fr"),
        MetadataEntry::literal(Property::Spatial, "Lyon").with_language("fr"),
        MetadataEntry::literal(Property::Temporal, "Roman period"),
        MetadataEntry::literal(Property::Rights, "Open access").with_language("en"),
    ]);
    record
}

/// A space-separated text of `count` words
pub fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

/// Replace every entry of a property with one literal
pub fn with_literal(mut record: Vec<MetadataEntry>, property: Property, value: &str) -> Vec<MetadataEntry> {
    record.retain(|entry| entry.property != property);
    record.push(MetadataEntry::literal(property, value));
    record
}

/// Float comparison for scores
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
