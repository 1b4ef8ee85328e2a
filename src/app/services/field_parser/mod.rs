//! Field parser for spreadsheet cells
//!
//! This module turns one raw cell value into one or more typed metadata
//! fragments. Each [`FieldKind`] has its own cell grammar:
//!
//! - [`FieldKind::Text`], [`FieldKind::Uri`], [`FieldKind::Date`] - one
//!   language-less fragment holding the trimmed cell
//! - [`FieldKind::Multilingual`] - `lang:value|lang:value` segments, see [`multilingual`]
//! - [`FieldKind::PersonList`] - `Surname,GivenName;Organization`, see [`persons`]
//! - [`FieldKind::DelimitedList`] - `;`-separated items, see [`delimited`]
//!
//! Only structurally malformed cells fail (with [`Error::Format`](crate::Error::Format));
//! ambiguous but recoverable input is parsed best-effort and reported through
//! [`ParseNotice`]s.
//!
//! ## Usage
//!
//! ```rust
//! use metadata_curator::app::models::FieldKind;
//! use metadata_curator::app::services::field_parser::parse_field;
//!
//! # fn example() -> metadata_curator::Result<()> {
//! let parsed = parse_field("fr:Titre|en:Title", FieldKind::Multilingual)?;
//! assert_eq!(parsed.fragments.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod delimited;
pub mod multilingual;
pub mod persons;

#[cfg(test)]
pub mod tests;

pub use delimited::parse_delimited_list;
pub use multilingual::{parse_multilingual, to_multilingual_cell};
pub use persons::parse_person_list;

use crate::Result;
use crate::app::models::{FieldKind, MetadataEntry, MetadataValue, Property, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One typed piece of a parsed cell, not yet bound to a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub value: MetadataValue,
    pub language: Option<String>,
    pub value_type: Option<ValueType>,
}

impl Fragment {
    /// Language-less literal fragment
    pub fn literal(value: impl Into<String>, value_type: Option<ValueType>) -> Self {
        Self {
            value: MetadataValue::Literal(value.into()),
            language: None,
            value_type,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Literal text, if this is not an agent list
    pub fn text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Bind the fragment to a property
    pub fn into_entry(self, property: Property) -> MetadataEntry {
        MetadataEntry {
            property,
            value: self.value,
            language: self.language,
            value_type: self.value_type,
        }
    }
}

/// Recoverable oddity found while parsing a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseNotice {
    /// Some multilingual segments carried a `lang:` prefix and some did not
    MixedMultilingual {
        typed_segments: usize,
        untyped_segments: usize,
    },
    /// A `lang:` segment had no value and was dropped
    EmptyLanguageValue { language: String },
    /// A person segment had a comma but only one non-empty name part
    IncompleteName { segment: String },
    /// A segment held only separators and was dropped
    EmptySegment { segment: String },
}

impl fmt::Display for ParseNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseNotice::MixedMultilingual {
                typed_segments,
                untyped_segments,
            } => write!(
                f,
                "mixed multilingual cell: {} segment(s) with a language prefix, {} without",
                typed_segments, untyped_segments
            ),
            ParseNotice::EmptyLanguageValue { language } => {
                write!(f, "empty value for language '{}' was dropped", language)
            }
            ParseNotice::IncompleteName { segment } => write!(
                f,
                "person '{}' is missing a surname or given name",
                segment
            ),
            ParseNotice::EmptySegment { segment } if segment.is_empty() => {
                write!(f, "empty segment was dropped")
            }
            ParseNotice::EmptySegment { segment } => {
                write!(f, "segment '{}' holds no value and was dropped", segment)
            }
        }
    }
}

/// Fragments parsed from one cell plus any recoverable notices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedField {
    pub fragments: Vec<Fragment>,
    pub notices: Vec<ParseNotice>,
}

impl ParsedField {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self {
            fragments,
            notices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Parse one raw cell according to its field kind
pub fn parse_field(raw: &str, kind: FieldKind) -> Result<ParsedField> {
    match kind {
        FieldKind::Text | FieldKind::Uri | FieldKind::Date => Ok(parse_plain(raw, kind)),
        FieldKind::Multilingual => Ok(parse_multilingual(raw)),
        FieldKind::PersonList => parse_person_list(raw),
        FieldKind::DelimitedList => Ok(parse_delimited_list(raw)),
    }
}

/// Plain cell: one trimmed, language-less fragment (none if blank)
pub fn parse_plain(raw: &str, kind: FieldKind) -> ParsedField {
    let value = raw.trim();
    if value.is_empty() {
        return ParsedField::default();
    }

    ParsedField::new(vec![Fragment::literal(value, kind.value_type())])
}
