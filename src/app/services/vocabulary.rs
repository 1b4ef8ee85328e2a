//! Controlled vocabulary lookups
//!
//! Wraps the static tables in [`crate::constants`] as an immutable, shareable
//! resource. Components receive a `&Vocabulary` rather than reaching for
//! module-level state, so tests and custom deployments can inject their own
//! tables. The standard tables are built once per process.

use crate::constants::{
    LANGUAGES, LICENSES, PERSON_IDENTIFIER_PATTERN, RESOURCE_TYPE_PATTERN, RESOURCE_TYPES,
};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::{LazyLock, OnceLock};

static RESOURCE_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RESOURCE_TYPE_PATTERN).expect("valid resource type pattern"));

static PERSON_IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PERSON_IDENTIFIER_PATTERN).expect("valid person identifier pattern")
});

static STANDARD: OnceLock<Vocabulary> = OnceLock::new();

/// Read-only controlled vocabularies
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Resource type URI to label
    resource_types: HashMap<String, String>,
    /// License identifiers keyed by lowercase form
    licenses: HashMap<String, String>,
    languages: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from explicit tables
    pub fn new<'a>(
        resource_types: impl IntoIterator<Item = (&'a str, &'a str)>,
        licenses: impl IntoIterator<Item = &'a str>,
        languages: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            resource_types: resource_types
                .into_iter()
                .map(|(uri, label)| (uri.to_string(), label.to_string()))
                .collect(),
            licenses: licenses
                .into_iter()
                .map(|license| (license.to_ascii_lowercase(), license.to_string()))
                .collect(),
            languages: languages.into_iter().map(str::to_string).collect(),
        }
    }

    /// The process-wide standard vocabulary
    pub fn standard() -> &'static Vocabulary {
        STANDARD.get_or_init(|| {
            Vocabulary::new(
                RESOURCE_TYPES.iter().copied(),
                LICENSES.iter().copied(),
                LANGUAGES.iter().copied(),
            )
        })
    }

    /// Whether a value is syntactically a resource type identifier
    pub fn is_resource_type_syntax(&self, value: &str) -> bool {
        RESOURCE_TYPE_RE.is_match(value.trim())
    }

    /// Whether a value is an accepted resource type
    pub fn is_known_resource_type(&self, value: &str) -> bool {
        self.resource_types.contains_key(value.trim())
    }

    /// Label of an accepted resource type
    pub fn resource_type_label(&self, value: &str) -> Option<&str> {
        self.resource_types.get(value.trim()).map(String::as_str)
    }

    /// Whether a value is an accepted license (case-insensitive)
    pub fn is_known_license(&self, value: &str) -> bool {
        self.licenses
            .contains_key(&value.trim().to_ascii_lowercase())
    }

    /// Canonical spelling of an accepted license
    pub fn canonical_license(&self, value: &str) -> Option<&str> {
        self.licenses
            .get(&value.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether a value is an accepted ISO 639-1 language code
    pub fn is_known_language(&self, code: &str) -> bool {
        self.languages.contains(code.trim())
    }

    /// Whether a person identifier is a well-formed ORCID iD with a valid checksum
    pub fn is_valid_person_identifier(&self, identifier: &str) -> bool {
        PERSON_IDENTIFIER_RE
            .captures(identifier.trim())
            .and_then(|captures| captures.get(1))
            .is_some_and(|id| orcid_checksum_matches(id.as_str()))
    }

    pub fn resource_type_count(&self) -> usize {
        self.resource_types.len()
    }

    pub fn license_count(&self) -> usize {
        self.licenses.len()
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }
}

/// ISO 7064 MOD 11-2 check over the 15 base digits of an ORCID iD
fn orcid_checksum_matches(orcid: &str) -> bool {
    let characters: Vec<char> = orcid.chars().filter(|c| *c != '-').collect();
    let Some((check, base)) = characters.split_last() else {
        return false;
    };
    if base.len() != 15 {
        return false;
    }

    let mut total: u32 = 0;
    for c in base {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        total = (total + digit) * 2;
    }

    let remainder = total % 11;
    let result = (12 - remainder) % 11;
    let expected = if result == 10 {
        'X'
    } else {
        char::from_digit(result, 10).unwrap_or('?')
    };

    *check == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_vocabulary_is_shared() {
        let first = Vocabulary::standard() as *const Vocabulary;
        let second = Vocabulary::standard() as *const Vocabulary;
        assert_eq!(first, second);
        assert_eq!(Vocabulary::standard().license_count(), LICENSES.len());
        assert_eq!(Vocabulary::standard().language_count(), LANGUAGES.len());
    }

    #[test]
    fn test_resource_type_syntax() {
        let vocabulary = Vocabulary::standard();
        assert!(vocabulary.is_resource_type_syntax("http://purl.org/coar/resource_type/c_ddb1"));
        assert!(vocabulary.is_resource_type_syntax("http://purl.org/coar/resource_type/QX5C-AR31"));
        assert!(!vocabulary.is_resource_type_syntax("dataset"));
        assert!(!vocabulary.is_resource_type_syntax("http://purl.org/coar/resource_type/c_ddb1x"));
        assert!(!vocabulary.is_resource_type_syntax("https://purl.org/coar/resource_type/c_ddb1"));
    }

    #[test]
    fn test_known_resource_types() {
        let vocabulary = Vocabulary::standard();
        assert!(vocabulary.is_known_resource_type("http://purl.org/coar/resource_type/c_ddb1"));
        assert_eq!(
            vocabulary.resource_type_label("http://purl.org/coar/resource_type/c_c513"),
            Some("image")
        );
        assert!(!vocabulary.is_known_resource_type("http://purl.org/coar/resource_type/c_zzzz"));
    }

    #[test]
    fn test_license_lookup_is_case_insensitive() {
        let vocabulary = Vocabulary::standard();
        assert!(vocabulary.is_known_license("CC-BY-4.0"));
        assert!(vocabulary.is_known_license("cc-by-4.0"));
        assert_eq!(vocabulary.canonical_license("cc0-1.0"), Some("CC0-1.0"));
        assert!(!vocabulary.is_known_license("All rights reserved, ask me"));
    }

    #[test]
    fn test_language_lookup() {
        let vocabulary = Vocabulary::standard();
        assert!(vocabulary.is_known_language("fr"));
        assert!(vocabulary.is_known_language("en"));
        assert!(!vocabulary.is_known_language("zz"));
        assert!(!vocabulary.is_known_language("FR"));
    }

    #[test]
    fn test_person_identifier_checksum() {
        let vocabulary = Vocabulary::standard();
        // Reference iDs from the ORCID documentation
        assert!(vocabulary.is_valid_person_identifier("0000-0002-1825-0097"));
        assert!(vocabulary.is_valid_person_identifier("https://orcid.org/0000-0001-5109-3700"));
        assert!(vocabulary.is_valid_person_identifier("0000-0002-1694-233X"));

        assert!(!vocabulary.is_valid_person_identifier("0000-0002-1825-0098"));
        assert!(!vocabulary.is_valid_person_identifier("0000-0002-1825"));
        assert!(!vocabulary.is_valid_person_identifier("not-an-orcid"));
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocabulary = Vocabulary::new(
            [("http://purl.org/coar/resource_type/c_ddb1", "dataset")],
            ["Custom-1.0"],
            ["fr"],
        );
        assert_eq!(vocabulary.resource_type_count(), 1);
        assert!(vocabulary.is_known_license("custom-1.0"));
        assert!(!vocabulary.is_known_license("CC-BY-4.0"));
        assert!(!vocabulary.is_known_language("en"));
    }
}
