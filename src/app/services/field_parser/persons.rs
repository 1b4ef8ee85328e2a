//! Person list cell grammar
//!
//! `Surname,GivenName;Surname,GivenName;Organization` - each `;` segment is a
//! person when it holds exactly one comma and an organization when it holds
//! none. More than one comma is a format error. A person with one blank name
//! part stays a person and raises [`ParseNotice::IncompleteName`].

use super::{Fragment, ParseNotice, ParsedField};
use crate::app::models::{Agent, MetadataValue, PersonRecord};
use crate::constants::{LIST_SEPARATOR, NAME_SEPARATOR};
use crate::{Error, Result};

/// Parse one person-list segment into an agent
///
/// Blank segments yield nothing. A lone comma yields no agent but reports
/// [`ParseNotice::EmptySegment`].
pub fn parse_agent(segment: &str) -> Result<(Option<Agent>, Option<ParseNotice>)> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Ok((None, None));
    }

    let commas = segment.matches(NAME_SEPARATOR).count();
    match commas {
        0 => Ok((Some(Agent::Organization(segment.to_string())), None)),
        1 => {
            let (surname, given_name) = segment
                .split_once(NAME_SEPARATOR)
                .unwrap_or((segment, ""));
            let (surname, given_name) = (surname.trim(), given_name.trim());

            match (surname.is_empty(), given_name.is_empty()) {
                (false, false) => Ok((
                    Some(Agent::Person(PersonRecord::new(surname, given_name))),
                    None,
                )),
                (true, true) => Ok((
                    None,
                    Some(ParseNotice::EmptySegment {
                        segment: segment.to_string(),
                    }),
                )),
                _ => Ok((
                    Some(Agent::Person(PersonRecord::new(surname, given_name))),
                    Some(ParseNotice::IncompleteName {
                        segment: segment.to_string(),
                    }),
                )),
            }
        }
        _ => Err(Error::format(
            "person list",
            format!(
                "segment '{}' contains {} commas; expected 'Surname,GivenName' or an organization name",
                segment, commas
            ),
        )),
    }
}

/// Parse a person-list cell into a single agent-list fragment
pub fn parse_person_list(raw: &str) -> Result<ParsedField> {
    let mut agents = Vec::new();
    let mut notices = Vec::new();

    for segment in raw.split(LIST_SEPARATOR) {
        let (agent, notice) = parse_agent(segment)?;
        agents.extend(agent);
        notices.extend(notice);
    }

    if agents.is_empty() {
        return Ok(ParsedField {
            fragments: Vec::new(),
            notices,
        });
    }

    Ok(ParsedField {
        fragments: vec![Fragment {
            value: MetadataValue::Agents(agents),
            language: None,
            value_type: None,
        }],
        notices,
    })
}
