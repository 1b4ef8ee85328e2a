//! Quality scoring parameters

use crate::app::models::Property;
use crate::constants::quality;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Weights and thresholds used by the quality scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Weight of completeness in the overall score
    pub completeness_weight: f64,

    /// Weight of richness in the overall score
    pub richness_weight: f64,

    /// Weight of consistency in the overall score
    pub consistency_weight: f64,

    /// Weight of standardization in the overall score
    pub standardization_weight: f64,

    /// Per-property weight of a mandatory property in completeness
    pub mandatory_property_weight: f64,

    /// Per-property weight of a recommended property in completeness
    pub recommended_property_weight: f64,

    /// Properties counted as recommended for completeness
    pub recommended_properties: Vec<Property>,

    /// Metrics below this score get a recommendation
    pub recommendation_threshold: f64,

    /// Words a description needs to count as rich
    pub min_description_words: usize,

    /// Keywords a record needs to count as rich
    pub min_keywords: usize,

    /// Distinct title languages a record needs to count as rich
    pub min_title_languages: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            completeness_weight: quality::COMPLETENESS_WEIGHT,
            richness_weight: quality::RICHNESS_WEIGHT,
            consistency_weight: quality::CONSISTENCY_WEIGHT,
            standardization_weight: quality::STANDARDIZATION_WEIGHT,
            mandatory_property_weight: quality::MANDATORY_PROPERTY_WEIGHT,
            recommended_property_weight: quality::RECOMMENDED_PROPERTY_WEIGHT,
            recommended_properties: vec![
                Property::Description,
                Property::Subject,
                Property::Language,
                Property::Spatial,
                Property::Temporal,
                Property::Rights,
            ],
            recommendation_threshold: quality::RECOMMENDATION_THRESHOLD,
            min_description_words: quality::MIN_DESCRIPTION_WORDS,
            min_keywords: quality::MIN_KEYWORDS,
            min_title_languages: quality::MIN_TITLE_LANGUAGES,
        }
    }
}

impl QualityConfig {
    /// Replace the four metric weights
    pub fn with_weights(
        mut self,
        completeness: f64,
        richness: f64,
        consistency: f64,
        standardization: f64,
    ) -> Self {
        self.completeness_weight = completeness;
        self.richness_weight = richness;
        self.consistency_weight = consistency;
        self.standardization_weight = standardization;
        self
    }

    pub fn with_recommendation_threshold(mut self, threshold: f64) -> Self {
        self.recommendation_threshold = threshold;
        self
    }

    pub fn with_min_description_words(mut self, words: usize) -> Self {
        self.min_description_words = words;
        self
    }

    /// Sum of the four metric weights
    pub fn total_weight(&self) -> f64 {
        self.completeness_weight
            + self.richness_weight
            + self.consistency_weight
            + self.standardization_weight
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("completeness_weight", self.completeness_weight),
            ("richness_weight", self.richness_weight),
            ("consistency_weight", self.consistency_weight),
            ("standardization_weight", self.standardization_weight),
            ("mandatory_property_weight", self.mandatory_property_weight),
            ("recommended_property_weight", self.recommended_property_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if (self.total_weight() - 1.0).abs() > 1e-6 {
            return Err(Error::configuration(format!(
                "metric weights must sum to 1.0, got {:.3}",
                self.total_weight()
            )));
        }

        if !(0.0..=100.0).contains(&self.recommendation_threshold) {
            return Err(Error::configuration(format!(
                "recommendation_threshold must be within 0..=100, got {}",
                self.recommendation_threshold
            )));
        }

        if let Some(property) = self
            .recommended_properties
            .iter()
            .find(|property| property.is_mandatory())
        {
            return Err(Error::configuration(format!(
                "{} is mandatory and cannot also be recommended",
                property
            )));
        }

        Ok(())
    }
}
