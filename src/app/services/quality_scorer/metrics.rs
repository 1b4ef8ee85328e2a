//! The four quality metrics
//!
//! Each metric yields a score in [0, 100] plus the highest-priority rule the
//! batch does not meet yet, if any.

use super::config::QualityConfig;
use crate::app::models::{Agent, MetadataEntry, Property};
use crate::app::services::validator::date_granularity;
use crate::app::services::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One of the four scored dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Completeness,
    Richness,
    Consistency,
    Standardization,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Completeness => "completeness",
            Metric::Richness => "richness",
            Metric::Consistency => "consistency",
            Metric::Standardization => "standardization",
        };
        write!(f, "{}", name)
    }
}

/// Score of one metric plus its most important unmet rule
#[derive(Debug, Clone, PartialEq)]
pub struct MetricOutcome {
    pub score: f64,
    pub unmet_rule: Option<String>,
}

impl MetricOutcome {
    fn met(score: f64) -> Self {
        Self {
            score,
            unmet_rule: None,
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        100.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn has_property(record: &[MetadataEntry], property: &Property) -> bool {
    record
        .iter()
        .any(|entry| &entry.property == property && !entry.value.is_empty())
}

// =============================================================================
// Completeness
// =============================================================================

/// Weighted share of mandatory and recommended properties present, averaged
pub fn completeness(records: &[Vec<MetadataEntry>], config: &QualityConfig) -> MetricOutcome {
    if records.is_empty() {
        return MetricOutcome::met(0.0);
    }

    let targets: Vec<(Property, f64)> = Property::mandatory()
        .into_iter()
        .map(|p| (p, config.mandatory_property_weight))
        .chain(
            config
                .recommended_properties
                .iter()
                .cloned()
                .map(|p| (p, config.recommended_property_weight)),
        )
        .collect();

    let total_weight: f64 = targets.iter().map(|(_, weight)| weight).sum();
    if total_weight <= 0.0 {
        return MetricOutcome::met(100.0);
    }

    let score = records
        .iter()
        .map(|record| {
            let present: f64 = targets
                .iter()
                .filter(|(property, _)| has_property(record, property))
                .map(|(_, weight)| weight)
                .sum();
            present / total_weight * 100.0
        })
        .sum::<f64>()
        / records.len() as f64;

    // Mandatory gaps outrank recommended ones, then the most widespread gap wins
    let mut worst: Option<(bool, usize, &Property)> = None;
    for (property, _) in &targets {
        let missing = records
            .iter()
            .filter(|record| !has_property(record, property))
            .count();
        if missing == 0 {
            continue;
        }
        let key = (property.is_mandatory(), missing);
        if worst.is_none_or(|(mandatory, count, _)| key > (mandatory, count)) {
            worst = Some((key.0, key.1, property));
        }
    }

    let unmet_rule = worst.map(|(mandatory, missing, property)| {
        format!(
            "Add the {} property {} (missing from {} of {} records)",
            if mandatory { "mandatory" } else { "recommended" },
            property,
            missing,
            records.len()
        )
    });

    MetricOutcome { score, unmet_rule }
}

// =============================================================================
// Richness
// =============================================================================

fn title_language_count(record: &[MetadataEntry]) -> usize {
    record
        .iter()
        .filter(|e| e.property == Property::Title)
        .filter_map(|e| e.language.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

fn description_words(record: &[MetadataEntry]) -> usize {
    record
        .iter()
        .filter(|e| e.property == Property::Description)
        .filter_map(|e| e.text())
        .map(|text| text.split_whitespace().count())
        .max()
        .unwrap_or(0)
}

fn keyword_count(record: &[MetadataEntry]) -> usize {
    record
        .iter()
        .filter(|e| e.property == Property::Subject && !e.value.is_empty())
        .count()
}

/// Mean share of records meeting each richness criterion
pub fn richness(records: &[Vec<MetadataEntry>], config: &QualityConfig) -> MetricOutcome {
    if records.is_empty() {
        return MetricOutcome::met(0.0);
    }

    let criteria: [(String, Box<dyn Fn(&[MetadataEntry]) -> bool + '_>); 4] = [
        (
            format!(
                "Provide titles in at least {} languages",
                config.min_title_languages
            ),
            Box::new(|r: &[MetadataEntry]| {
                title_language_count(r) >= config.min_title_languages
            }),
        ),
        (
            format!(
                "Write descriptions of at least {} words",
                config.min_description_words
            ),
            Box::new(|r: &[MetadataEntry]| {
                description_words(r) >= config.min_description_words
            }),
        ),
        (
            format!("Add at least {} keywords", config.min_keywords),
            Box::new(|r: &[MetadataEntry]| keyword_count(r) >= config.min_keywords),
        ),
        (
            "Add temporal or spatial coverage".to_string(),
            Box::new(|r: &[MetadataEntry]| {
                has_property(r, &Property::Temporal) || has_property(r, &Property::Spatial)
            }),
        ),
    ];

    let mut shares = Vec::with_capacity(criteria.len());
    let mut weakest: Option<(usize, &str)> = None;

    for (rule, meets) in &criteria {
        let met = records
            .iter()
            .filter(|record| meets(record.as_slice()))
            .count();
        shares.push(percentage(met, records.len()));

        if met < records.len() && weakest.is_none_or(|(count, _)| met < count) {
            weakest = Some((met, rule.as_str()));
        }
    }

    let score = shares.iter().sum::<f64>() / shares.len() as f64;
    let unmet_rule = weakest
        .map(|(met, rule)| format!("{} (met by {} of {} records)", rule, met, records.len()));

    MetricOutcome { score, unmet_rule }
}

// =============================================================================
// Consistency
// =============================================================================

/// A convention dimension and the convention each record follows, if any
struct Dimension {
    rule: String,
    conventions: Vec<String>,
}

impl Dimension {
    /// Dominant convention, its count, and the number of records observed
    fn dominant(&self) -> Option<(&str, usize, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for convention in &self.conventions {
            *counts.entry(convention.as_str()).or_default() += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for (convention, count) in counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((convention, count));
            }
        }
        best.map(|(convention, count)| (convention, count, self.conventions.len()))
    }
}

fn date_convention(record: &[MetadataEntry], property: &Property) -> Option<String> {
    record
        .iter()
        .filter(|e| &e.property == property)
        .filter_map(|e| e.text().and_then(date_granularity))
        .next()
        .map(|granularity| format!("{:?}", granularity).to_lowercase())
}

fn title_convention(record: &[MetadataEntry]) -> Option<String> {
    let titles: Vec<&MetadataEntry> = record
        .iter()
        .filter(|e| e.property == Property::Title)
        .collect();
    if titles.is_empty() {
        return None;
    }

    let tagged = titles.iter().filter(|e| e.language.is_some()).count();
    let convention = if tagged == titles.len() {
        "tagged"
    } else if tagged == 0 {
        "untagged"
    } else {
        "partially tagged"
    };
    Some(convention.to_string())
}

fn creator_convention(record: &[MetadataEntry]) -> Option<String> {
    let agents: Vec<&Agent> = record
        .iter()
        .filter(|e| e.property == Property::Creator)
        .filter_map(|e| e.value.agents())
        .flatten()
        .collect();
    if agents.is_empty() {
        return None;
    }

    let organizations = agents.iter().filter(|a| a.is_organization()).count();
    let convention = if organizations == 0 {
        "persons"
    } else if organizations == agents.len() {
        "organizations"
    } else {
        "persons and organizations"
    };
    Some(convention.to_string())
}

/// Average share of records following the dominant convention per dimension
pub fn consistency(records: &[Vec<MetadataEntry>]) -> MetricOutcome {
    if records.len() < 2 {
        return MetricOutcome::met(100.0);
    }

    let mut dimensions: Vec<Dimension> = [Property::Created, Property::Date, Property::Available]
        .iter()
        .map(|property| Dimension {
            rule: format!("Use a single date granularity for {}", property),
            conventions: records
                .iter()
                .filter_map(|r| date_convention(r, property))
                .collect(),
        })
        .collect();
    dimensions.push(Dimension {
        rule: "Tag titles with a language consistently".to_string(),
        conventions: records.iter().filter_map(|r| title_convention(r)).collect(),
    });
    dimensions.push(Dimension {
        rule: "Represent creators consistently".to_string(),
        conventions: records.iter().filter_map(|r| creator_convention(r)).collect(),
    });

    let mut shares = Vec::new();
    let mut weakest: Option<(f64, String)> = None;

    for dimension in dimensions.iter().filter(|d| d.conventions.len() >= 2) {
        let Some((dominant, count, observed)) = dimension.dominant() else {
            continue;
        };
        let share = percentage(count, observed);
        shares.push(share);

        if count < observed && weakest.as_ref().is_none_or(|(worst, _)| share < *worst) {
            weakest = Some((
                share,
                format!(
                    "{} ('{}' used by {} of {} records)",
                    dimension.rule, dominant, count, observed
                ),
            ));
        }
    }

    if shares.is_empty() {
        return MetricOutcome::met(100.0);
    }

    MetricOutcome {
        score: shares.iter().sum::<f64>() / shares.len() as f64,
        unmet_rule: weakest.map(|(_, rule)| rule),
    }
}

// =============================================================================
// Standardization
// =============================================================================

/// Share of vocabulary-governed values that the vocabulary knows
pub fn standardization(records: &[Vec<MetadataEntry>], vocabulary: &Vocabulary) -> MetricOutcome {
    // (known, total) per governed category, in reporting order
    let mut tallies: [(&str, usize, usize); 3] =
        [("resource type", 0, 0), ("license", 0, 0), ("language", 0, 0)];

    for entry in records.iter().flatten() {
        let governed = match (&entry.property, entry.text()) {
            (Property::Type, Some(text)) => Some((0, vocabulary.is_known_resource_type(text))),
            (Property::License, Some(text)) => Some((1, vocabulary.is_known_license(text))),
            (Property::Language, Some(text)) => Some((2, vocabulary.is_known_language(text))),
            _ => None,
        };
        if let Some((index, known)) = governed {
            tallies[index].2 += 1;
            tallies[index].1 += usize::from(known);
        }

        if let Some(language) = &entry.language {
            tallies[2].2 += 1;
            tallies[2].1 += usize::from(vocabulary.is_known_language(language));
        }
    }

    let known: usize = tallies.iter().map(|(_, known, _)| known).sum();
    let total: usize = tallies.iter().map(|(_, _, total)| total).sum();

    let mut worst: Option<(usize, &str, usize)> = None;
    for (category, known, total) in tallies {
        let unknown = total - known;
        if unknown > 0 && worst.is_none_or(|(count, _, _)| unknown > count) {
            worst = Some((unknown, category, total));
        }
    }

    MetricOutcome {
        score: percentage(known, total),
        unmet_rule: worst.map(|(unknown, category, total)| {
            format!(
                "Use controlled {} values ({} of {} unrecognized)",
                category, unknown, total
            )
        }),
    }
}
