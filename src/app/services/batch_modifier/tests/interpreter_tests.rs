//! Tests for entry list edits and the row lifecycle

use super::*;
use crate::app::models::{ActionKind, IssueCode, MetadataValue, ModificationAction};
use crate::app::services::batch_modifier::{
    ActionState, BatchModifier, RecordStore, RejectionReason, apply_action, build_entries,
    read_actions,
};
use crate::app::services::validator::validate;

fn action(kind: ActionKind, property: Property, value: &str) -> ModificationAction {
    ModificationAction::new("R1", kind, property, value)
}

// =============================================================================
// apply_action
// =============================================================================

#[test]
fn test_add_appends_without_deduplicating() {
    let mut entries = create_record();
    let add = action(ActionKind::Add, Property::Title, "Title").with_language("en");

    apply_action(&mut entries, &add).unwrap();
    apply_action(&mut entries, &add).unwrap();

    assert_eq!(entries.len(), create_record().len() + 2);
    assert_eq!(texts_of(&entries, &Property::Title), vec!["Titre", "Title", "Title", "Title"]);
}

#[test]
fn test_replace_is_language_scoped() {
    let mut entries = create_record();
    let replace = action(ActionKind::Replace, Property::Title, "Nouveau").with_language("fr");

    let removed = apply_action(&mut entries, &replace).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(entries.len(), create_record().len());
    assert_eq!(entries[0].value, MetadataValue::Literal("Nouveau".to_string()));
    assert_eq!(entries[0].language.as_deref(), Some("fr"));
    assert_eq!(texts_of(&entries, &Property::Title), vec!["Nouveau", "Title"]);
}

#[test]
fn test_replace_without_language_removes_every_entry() {
    let mut entries = create_record();
    let replace = action(ActionKind::Replace, Property::Title, "Only");

    let removed = apply_action(&mut entries, &replace).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(texts_of(&entries, &Property::Title), vec!["Only"]);
    assert_eq!(entries[0].property, Property::Title);
}

#[test]
fn test_replace_with_nothing_to_remove_appends() {
    let mut entries = create_record();
    let replace = action(ActionKind::Replace, Property::Description, "Text").with_language("en");

    let removed = apply_action(&mut entries, &replace).unwrap();

    assert_eq!(removed, 0);
    assert_eq!(entries.last().unwrap().property, Property::Description);
}

#[test]
fn test_delete_is_language_scoped() {
    let mut entries = create_record();
    let delete = action(ActionKind::Delete, Property::Title, "").with_language("en");

    assert_eq!(apply_action(&mut entries, &delete).unwrap(), 1);
    assert_eq!(texts_of(&entries, &Property::Title), vec!["Titre"]);
}

#[test]
fn test_delete_of_mandatory_property_is_allowed() {
    let mut entries = create_record();
    let delete = action(ActionKind::Delete, Property::Creator, "");

    assert_eq!(apply_action(&mut entries, &delete).unwrap(), 1);
    assert!(texts_of(&entries, &Property::Creator).is_empty());
}

#[test]
fn test_language_on_system_property_is_locked() {
    for kind in [ActionKind::Add, ActionKind::Replace] {
        let mut entries = create_record();
        let locked = action(kind, Property::License, "CC0-1.0").with_language("en");

        let error = apply_action(&mut entries, &locked).unwrap_err();
        assert!(matches!(error, crate::Error::PropertyLocked { .. }));
        assert_eq!(entries, create_record());
    }
}

#[test]
fn test_build_entries_parses_person_lists() {
    let entries =
        build_entries(&action(ActionKind::Add, Property::Creator, "Martin,Claire;CNRS")).unwrap();
    assert_eq!(entries.len(), 1);

    let agents = entries[0].value.agents().unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0], Agent::Person(PersonRecord::new("Martin", "Claire")));
    assert!(agents[1].is_organization());
    assert_eq!(entries[0].value_type, None);
}

#[test]
fn test_build_entries_sets_value_type_by_property() {
    let created = build_entries(&action(ActionKind::Replace, Property::Created, "2023")).unwrap();
    assert_eq!(created[0].value_type, Some(ValueType::Date));

    let kind = build_entries(&action(ActionKind::Replace, Property::Type, DATASET_TYPE)).unwrap();
    assert_eq!(kind[0].value_type, Some(ValueType::Uri));
}

#[test]
fn test_build_entries_splits_keyword_lists() {
    let scoped = build_entries(
        &action(ActionKind::Add, Property::Subject, "ceramics; pottery").with_language("en"),
    )
    .unwrap();
    assert_eq!(texts_of(&scoped, &Property::Subject), vec!["ceramics", "pottery"]);
    assert!(scoped.iter().all(|e| e.language.as_deref() == Some("en")));

    let mixed = build_entries(&action(ActionKind::Add, Property::Subject, "ceramics;fr:poterie")).unwrap();
    let pairs: Vec<(String, Option<&str>)> = mixed
        .iter()
        .map(|e| (e.value.to_string(), e.language.as_deref()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("ceramics".to_string(), None),
            ("poterie".to_string(), Some("fr")),
        ]
    );
}

#[test]
fn test_build_entries_reads_language_prefixes() {
    let entries =
        build_entries(&action(ActionKind::Add, Property::Title, "fr:Titre|en:Title")).unwrap();

    let languages: Vec<Option<&str>> = entries.iter().map(|e| e.language.as_deref()).collect();
    assert_eq!(languages, vec![Some("fr"), Some("en")]);
    assert_eq!(texts_of(&entries, &Property::Title), vec!["Titre", "Title"]);
}

#[test]
fn test_build_entries_rejects_conflicting_language() {
    let conflicting = action(ActionKind::Replace, Property::Title, "fr:Titre").with_language("en");
    let error = build_entries(&conflicting).unwrap_err();
    assert!(error.is_format_error());
}

#[test]
fn test_build_entries_rejects_blank_value() {
    let error = build_entries(&action(ActionKind::Add, Property::Description, "  ")).unwrap_err();
    assert!(error.is_format_error());
}

#[test]
fn test_build_entries_rejects_malformed_person() {
    let error = build_entries(&action(ActionKind::Add, Property::Creator, "A,B,C")).unwrap_err();
    assert!(error.is_format_error());
}

#[test]
fn test_replace_inserts_every_language_in_place() {
    let mut entries = create_record();
    let replace = action(ActionKind::Replace, Property::Title, "de:Titel|en:New title");

    let removed = apply_action(&mut entries, &replace).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(entries.len(), create_record().len());
    assert_eq!(texts_of(&entries, &Property::Title), vec!["Titel", "New title"]);
    assert_eq!(entries[0].language.as_deref(), Some("de"));
    assert_eq!(entries[1].language.as_deref(), Some("en"));
}

// =============================================================================
// BatchModifier
// =============================================================================

#[test]
fn test_delete_creator_then_validate() {
    let mut store = create_store();
    let rows = read_actions("id,action,property,value,lang\nR1,delete,creator,,\n".as_bytes()).unwrap();

    let outcome = BatchModifier::new(&mut store).run(&rows);
    assert!(outcome.all_committed());

    let entries = store.fetch("R1").unwrap().unwrap();
    let result = validate(&entries);
    assert!(!result.is_publishable());
    assert!(result.has_issue(IssueCode::MissingRequiredField, &Property::Creator));
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.message == "missing required field creator")
    );

    // R2 untouched
    assert_eq!(store.fetch("R2").unwrap().unwrap(), create_record());
}

#[test]
fn test_delete_optional_property_then_validate() {
    let mut store = create_store();
    let csv = "id,action,property,value,lang
R1,add,description,Description du jeu,fr
R1,add,keywords,ceramics;pottery,en
R1,delete,description,,
R1,delete,keywords,,
";
    let rows = read_actions(csv.as_bytes()).unwrap();

    let outcome = BatchModifier::new(&mut store).run(&rows);
    assert!(outcome.all_committed());
    assert_eq!(outcome.rows[2].removed, 1);
    assert_eq!(outcome.rows[3].removed, 2);

    let entries = store.fetch("R1").unwrap().unwrap();
    assert_eq!(entries, create_record());

    let result = validate(&entries);
    assert!(result.is_publishable());
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
}

#[test]
fn test_every_rejection_carries_a_reason() {
    let mut store = create_store();
    store.lock("R2");
    let csv = "id,action,property,value,lang
R9,add,title,Ghost,en
R1,explode,title,x,
R1,add,license,CC0-1.0,en
R2,add,keywords,ceramics,en
R1,add,keywords,ceramics,en
";
    let rows = read_actions(csv.as_bytes()).unwrap();
    let outcome = BatchModifier::new(&mut store).run(&rows);

    let states: Vec<ActionState> = outcome.rows.iter().map(|r| r.state).collect();
    assert_eq!(
        states,
        vec![
            ActionState::Rejected(RejectionReason::TargetNotFound),
            ActionState::Rejected(RejectionReason::FormatError),
            ActionState::Rejected(RejectionReason::PropertyLocked),
            ActionState::Rejected(RejectionReason::CommitFailed),
            ActionState::Committed,
        ]
    );
    assert!(outcome.rejected().all(|row| row.message.is_some()));

    assert_eq!(outcome.stats.total_rows, 5);
    assert_eq!(outcome.stats.committed, 1);
    assert_eq!(outcome.stats.rejected(), 4);
    assert!(outcome.stats.summary().contains("1 committed"));
}

#[test]
fn test_rows_for_same_target_apply_in_order() {
    let mut store = create_store();
    let csv = "id,action,property,value,lang
R1,add,keywords,ceramics,en
R1,add,keywords,archaeology,en
R1,delete,keywords,,en
R1,add,keywords,pottery,fr
";
    let rows = read_actions(csv.as_bytes()).unwrap();
    let outcome = BatchModifier::new(&mut store).run(&rows);

    assert!(outcome.all_committed());
    assert_eq!(outcome.rows[2].removed, 2);

    let entries = store.fetch("R1").unwrap().unwrap();
    assert_eq!(texts_of(&entries, &Property::Subject), vec!["pottery"]);
}

#[test]
fn test_rejected_row_leaves_record_unchanged() {
    let mut store = create_store();
    let rows = read_actions(
        "id,action,property,value,lang\nR1,replace,created,2023,fr\n".as_bytes(),
    )
    .unwrap();

    let outcome = BatchModifier::new(&mut store).run(&rows);

    assert_eq!(
        outcome.rows[0].rejection(),
        Some(RejectionReason::PropertyLocked)
    );
    assert_eq!(store.fetch("R1").unwrap().unwrap(), create_record());
}
