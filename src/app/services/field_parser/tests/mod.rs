//! Tests for the field parser
//!
//! Covers every cell grammar plus the recoverable notices each one can raise.


// Test helper functions and fixtures
use super::{Fragment, ParsedField};
use crate::app::models::{Agent, PersonRecord};

/// Collect (language, text) pairs of literal fragments
pub fn language_pairs(parsed: &ParsedField) -> Vec<(Option<String>, String)> {
    parsed
        .fragments
        .iter()
        .map(|fragment| {
            (
                fragment.language.clone(),
                fragment.text().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

/// Agents of the single agent-list fragment a person cell produces
pub fn agents_of(parsed: &ParsedField) -> Vec<Agent> {
    assert_eq!(parsed.fragments.len(), 1, "person cells yield one fragment");
    parsed.fragments[0]
        .value
        .agents()
        .expect("person fragment holds agents")
        .to_vec()
}

/// Shorthand for a person agent
pub fn person(surname: &str, given_name: &str) -> Agent {
    Agent::Person(PersonRecord::new(surname, given_name))
}

/// Shorthand for an organization agent
pub fn organization(name: &str) -> Agent {
    Agent::Organization(name.to_string())
}

/// Fragment languages in order
pub fn languages(fragments: &[Fragment]) -> Vec<Option<&str>> {
    fragments.iter().map(|f| f.language.as_deref()).collect()
}
