//! Action file reading
//!
//! An action file is a CSV with the header `id, action, property, value, lang`.
//! Header names are matched case-insensitively; `lang` and `value` may be
//! omitted from the header entirely. Each data row becomes an [`ActionRow`]
//! that either holds a parsed action or the reason it could not be parsed.

use crate::app::models::{ActionKind, ModificationAction, Property};
use crate::constants::ACTION_FILE_COLUMNS;
use crate::{Error, Result};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static LANGUAGE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}$").expect("valid language tag pattern"));

/// One data row of an action file
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRow {
    /// 1-based data row number (header excluded)
    pub row_number: usize,

    /// Raw target id, kept even when the rest of the row is malformed
    pub target_record_id: Option<String>,

    /// The parsed action, or why the row is malformed
    pub action: std::result::Result<ModificationAction, String>,
}

/// Column positions of an action file header
#[derive(Debug, Clone, Copy)]
struct ActionColumns {
    id: usize,
    action: usize,
    property: usize,
    value: Option<usize>,
    lang: Option<usize>,
}

impl ActionColumns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };

        let required = |name: &str| {
            position(name).ok_or_else(|| {
                Error::format(
                    "action file",
                    format!(
                        "missing '{}' column (expected {})",
                        name,
                        ACTION_FILE_COLUMNS.join(", ")
                    ),
                )
            })
        };

        Ok(Self {
            id: required("id")?,
            action: required("action")?,
            property: required("property")?,
            value: position("value"),
            lang: position("lang"),
        })
    }
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

/// Parse one action row
pub fn parse_action(
    id: &str,
    action: &str,
    property: &str,
    value: &str,
    lang: &str,
) -> Result<ModificationAction> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::format("id", "target record id is empty"));
    }

    let kind: ActionKind = action.parse()?;
    let property: Property = property.parse()?;
    let value = value.trim();

    if kind != ActionKind::Delete && value.is_empty() {
        return Err(Error::format(
            "value",
            format!("{} action on {} needs a value", kind, property),
        ));
    }

    let mut parsed = ModificationAction::new(id, kind, property, value);

    let lang = lang.trim();
    if !lang.is_empty() {
        if !LANGUAGE_TAG_RE.is_match(lang) {
            return Err(Error::format(
                "lang",
                format!("'{}' is not a two-letter lowercase language code", lang),
            ));
        }
        parsed = parsed.with_language(lang);
    }

    Ok(parsed)
}

/// Read every row of an action file from a CSV source
///
/// Fails as a whole only when the header is unreadable or lacks a required
/// column; malformed data rows are kept with their reason.
pub fn read_actions<R: Read>(reader: R) -> Result<Vec<ActionRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::csv_parsing("action file", "Failed to read CSV headers", Some(e)))?
        .clone();
    let columns = ActionColumns::from_headers(&headers)?;

    let mut rows = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let row_number = index + 1;

        let row = match result {
            Ok(record) => {
                let id = cell(&record, Some(columns.id));
                let action = parse_action(
                    id,
                    cell(&record, Some(columns.action)),
                    cell(&record, Some(columns.property)),
                    cell(&record, columns.value),
                    cell(&record, columns.lang),
                );
                ActionRow {
                    row_number,
                    target_record_id: (!id.is_empty()).then(|| id.to_string()),
                    action: action.map_err(|e| e.to_string()),
                }
            }
            Err(e) => ActionRow {
                row_number,
                target_record_id: None,
                action: Err(format!("CSV parse error: {}", e)),
            },
        };

        if let Err(reason) = &row.action {
            debug!("Action row {} is malformed: {}", row_number, reason);
        }
        rows.push(row);
    }

    info!("Read {} action rows", rows.len());
    Ok(rows)
}

/// Read every row of an action file on disk
pub fn read_action_file(path: &Path) -> Result<Vec<ActionRow>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;

    read_actions(file).map_err(|e| match e {
        Error::CsvParsing {
            message, source, ..
        } => Error::csv_parsing(path.display().to_string(), message, source),
        other => other,
    })
}
