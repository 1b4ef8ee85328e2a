//! Tests for row assembly

use super::*;
use crate::app::models::{Agent, FieldKind, MetadataValue, PersonRecord, ValueType};
use crate::app::services::field_parser::ParseNotice;
use crate::app::services::metadata_assembler::{
    AssemblyNoticeKind, ColumnRule, FieldMapping, MetadataAssembler, assemble,
};
use crate::app::services::vocabulary::Vocabulary;

#[test]
fn test_reference_row_assembly() {
    let assembly = assemble(&create_reference_row(), &FieldMapping::standard()).unwrap();
    let entries = &assembly.entries;

    assert_eq!(entries.len(), 6);
    assert_eq!(count_of(entries, &Property::Title), 2);
    assert_eq!(count_of(entries, &Property::Type), 1);
    assert_eq!(count_of(entries, &Property::Creator), 1);
    assert_eq!(count_of(entries, &Property::Created), 1);
    assert_eq!(count_of(entries, &Property::License), 1);

    let creator = entries
        .iter()
        .find(|e| e.property == Property::Creator)
        .unwrap();
    assert_eq!(
        creator.value,
        MetadataValue::Agents(vec![Agent::Person(PersonRecord::new("Dupont", "Jean"))])
    );
    assert!(assembly.notices.is_empty());
}

#[test]
fn test_output_follows_mapping_order() {
    let assembly = assemble(&create_reference_row(), &FieldMapping::standard()).unwrap();

    assert_eq!(
        properties_of(&assembly.entries),
        vec![
            Property::Title,
            Property::Title,
            Property::Type,
            Property::Creator,
            Property::Created,
            Property::License,
        ]
    );
}

#[test]
fn test_assembly_is_deterministic() {
    let row = Row::from([
        ("keywords", "fr:céramique;en:ceramics"),
        ("license", "CC-BY-4.0"),
        ("title", "fr:Titre|en:Title"),
        ("creator", "Dupont,Jean;CNRS"),
        ("created", "2024-05"),
    ]);
    let mapping = FieldMapping::standard();

    let first = assemble(&row, &mapping).unwrap();
    let second = assemble(&row, &mapping).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_value_types_follow_field_kinds() {
    let assembly = assemble(&create_reference_row(), &FieldMapping::standard()).unwrap();

    let value_type = |property: Property| {
        assembly
            .entries
            .iter()
            .find(|e| e.property == property)
            .and_then(|e| e.value_type)
    };
    assert_eq!(value_type(Property::Type), Some(ValueType::Uri));
    assert_eq!(value_type(Property::Created), Some(ValueType::Date));
    assert_eq!(value_type(Property::Title), Some(ValueType::String));
    assert_eq!(value_type(Property::Creator), None);
}

#[test]
fn test_blank_and_unknown_columns_ignored() {
    let mut row = create_reference_row();
    row.insert("description", "   ");
    row.insert("filename", "scan_001.tif");

    let assembly = assemble(&row, &FieldMapping::standard()).unwrap();
    assert_eq!(assembly.entries.len(), 6);
    assert_eq!(count_of(&assembly.entries, &Property::Description), 0);
}

#[test]
fn test_malformed_person_cell_names_column() {
    let mut row = create_reference_row();
    row.insert("creator", "Dupont,Jean,Extra");

    let error = assemble(&row, &FieldMapping::standard()).unwrap_err();
    assert!(error.is_format_error());
    assert!(error.to_string().contains("creator"));
}

#[test]
fn test_unknown_vocabulary_is_emitted_and_flagged() {
    let mut row = create_reference_row();
    row.insert("type", "http://purl.org/coar/resource_type/c_zzzz");
    row.insert("license", "My own licence");

    let assembly = assemble(&row, &FieldMapping::standard()).unwrap();

    assert_eq!(assembly.entries.len(), 6);
    assert!(assembly.has_unverified_values());
    let flagged: Vec<&Property> = assembly
        .notices
        .iter()
        .filter(|n| matches!(n.kind, AssemblyNoticeKind::UnverifiedVocabulary { .. }))
        .map(|n| &n.property)
        .collect();
    assert_eq!(flagged, vec![&Property::Type, &Property::License]);
}

#[test]
fn test_unknown_language_tag_is_flagged() {
    let mut row = create_reference_row();
    row.insert("title", "fr:Titre|zz:Unknown");

    let assembly = assemble(&row, &FieldMapping::standard()).unwrap();
    assert!(assembly.notices.iter().any(|n| n.kind
        == AssemblyNoticeKind::UnverifiedVocabulary {
            value: "zz".to_string()
        }));
}

#[test]
fn test_parse_notices_are_forwarded() {
    let mut row = create_reference_row();
    row.insert("title", "fr:Titre|Title");

    let assembly = assemble(&row, &FieldMapping::standard()).unwrap();
    assert_eq!(assembly.notices.len(), 1);
    assert_eq!(assembly.notices[0].column, "title");
    assert!(matches!(
        assembly.notices[0].kind,
        AssemblyNoticeKind::Parse(ParseNotice::MixedMultilingual { .. })
    ));
}

#[test]
fn test_keywords_produce_one_entry_per_item() {
    let row = Row::from([("keywords", "fr:céramique;en:ceramics; pottery ;")]);
    let assembly = assemble(&row, &FieldMapping::standard()).unwrap();

    assert_eq!(count_of(&assembly.entries, &Property::Subject), 3);
    assert_eq!(assembly.entries[0].language.as_deref(), Some("fr"));
    assert_eq!(assembly.entries[2].language, None);
}

#[test]
fn test_custom_mapping_extension() {
    let mut mapping = FieldMapping::standard();
    let mut extension = FieldMapping::new(2);
    extension.set_rule(
        ColumnRule::new(
            "funder",
            Property::Other("http://example.org/terms#funder".to_string()),
        )
        .with_kind(FieldKind::PersonList),
    );
    mapping.extend(extension);

    let mut row = create_reference_row();
    row.insert("funder", "ANR");

    let assembly = assemble(&row, &mapping).unwrap();
    let last = assembly.entries.last().unwrap();
    assert_eq!(
        last.property,
        Property::Other("http://example.org/terms#funder".to_string())
    );
    assert_eq!(
        last.value,
        MetadataValue::Agents(vec![Agent::Organization("ANR".to_string())])
    );
}

#[test]
fn test_injected_vocabulary() {
    let vocabulary = Vocabulary::new([(DATASET_TYPE, "dataset")], ["Custom-1.0"], ["fr", "en"]);
    let assembler = MetadataAssembler::new(&vocabulary);

    let assembly = assembler
        .assemble(&create_reference_row(), &FieldMapping::standard())
        .unwrap();
    assert_eq!(assembly.notices.len(), 1);
    assert_eq!(assembly.notices[0].property, Property::License);
}

#[test]
fn test_row_is_not_mutated() {
    let row = create_reference_row();
    let before = row.clone();
    let _ = assemble(&row, &FieldMapping::standard()).unwrap();
    assert_eq!(row, before);
}
