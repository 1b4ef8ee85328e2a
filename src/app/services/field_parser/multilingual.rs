//! Multilingual cell grammar
//!
//! A multilingual cell is `lang:value` segments separated by `|`, where `lang`
//! is two lowercase ASCII letters. A cell without any typed segment is a
//! single language-less value and is never split on `|`.

use super::{Fragment, ParseNotice, ParsedField};
use crate::app::models::ValueType;
use crate::constants::{LANGUAGE_SEGMENT_PATTERN, MULTILINGUAL_SEPARATOR};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LANGUAGE_SEGMENT_PATTERN).expect("valid language segment pattern"));

/// Split a `lang:value` segment into its language and value
pub fn split_language_segment(segment: &str) -> Option<(&str, &str)> {
    let captures = SEGMENT_RE.captures(segment)?;
    let language = captures.get(1)?.as_str();
    let value = captures.get(2)?.as_str();
    Some((language, value))
}

/// Parse a multilingual cell
///
/// Mixed cells (some segments typed, some not) are parsed best-effort: typed
/// segments keep their language, untyped ones get none, and a
/// [`ParseNotice::MixedMultilingual`] is recorded. Empty segments between
/// separators are dropped with a [`ParseNotice::EmptySegment`].
pub fn parse_multilingual(raw: &str) -> ParsedField {
    let cell = raw.trim();
    if cell.is_empty() {
        return ParsedField::default();
    }

    let segments: Vec<&str> = cell
        .split(MULTILINGUAL_SEPARATOR)
        .map(str::trim)
        .collect();

    let typed_segments = segments
        .iter()
        .filter(|segment| split_language_segment(segment).is_some())
        .count();

    if typed_segments == 0 {
        return ParsedField::new(vec![Fragment::literal(cell, Some(ValueType::String))]);
    }

    let mut parsed = ParsedField::default();
    let mut untyped_segments = 0;

    for segment in segments {
        match split_language_segment(segment) {
            Some((language, value)) => {
                let value = value.trim();
                if value.is_empty() {
                    parsed.notices.push(ParseNotice::EmptyLanguageValue {
                        language: language.to_string(),
                    });
                    continue;
                }
                parsed.fragments.push(
                    Fragment::literal(value, Some(ValueType::String))
                        .with_language(Some(language.to_string())),
                );
            }
            None if segment.is_empty() => {
                parsed.notices.push(ParseNotice::EmptySegment {
                    segment: String::new(),
                });
            }
            None => {
                untyped_segments += 1;
                parsed
                    .fragments
                    .push(Fragment::literal(segment, Some(ValueType::String)));
            }
        }
    }

    if untyped_segments > 0 {
        debug!(
            "Mixed multilingual cell: {} typed, {} untyped segments",
            typed_segments, untyped_segments
        );
        parsed.notices.push(ParseNotice::MixedMultilingual {
            typed_segments,
            untyped_segments,
        });
    }

    parsed
}

/// Serialize fragments back into a multilingual cell in canonical order
///
/// Canonical order is by language code, language-less fragments last.
pub fn to_multilingual_cell(fragments: &[Fragment]) -> String {
    let mut ordered: Vec<&Fragment> = fragments.iter().collect();
    ordered.sort_by(|a, b| match (&a.language, &b.language) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    ordered
        .iter()
        .map(|fragment| {
            let value = fragment.value.to_string();
            match &fragment.language {
                Some(language) => format!("{}:{}", language, value),
                None => value,
            }
        })
        .collect::<Vec<_>>()
        .join(&MULTILINGUAL_SEPARATOR.to_string())
}
