//! Delimited list cell grammar (keywords and similar)

use super::multilingual::split_language_segment;
use super::{Fragment, ParsedField};
use crate::app::models::ValueType;
use crate::constants::LIST_SEPARATOR;

/// Parse a `;`-separated list; each item may carry its own `lang:` prefix
///
/// Items are trimmed and empty items are dropped silently.
pub fn parse_delimited_list(raw: &str) -> ParsedField {
    let fragments = raw
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter_map(|item| match split_language_segment(item) {
            Some((language, value)) => {
                let value = value.trim();
                (!value.is_empty()).then(|| {
                    Fragment::literal(value, Some(ValueType::String))
                        .with_language(Some(language.to_string()))
                })
            }
            None => Some(Fragment::literal(item, Some(ValueType::String))),
        })
        .collect();

    ParsedField::new(fragments)
}
