//! Batch quality scoring

use super::config::QualityConfig;
use super::metrics::{self, Metric};
use super::recommendations::{Recommendation, rank};
use crate::app::models::{MetadataEntry, MetricScores, QualityReport, QualityScore, ValidationResult};
use crate::app::services::vocabulary::Vocabulary;
use tracing::{debug, info};

/// Scores snapshots of records against one vocabulary and configuration
#[derive(Debug, Clone)]
pub struct QualityScorer<'v> {
    vocabulary: &'v Vocabulary,
    config: QualityConfig,
}

impl Default for QualityScorer<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard(), QualityConfig::default())
    }
}

impl<'v> QualityScorer<'v> {
    pub fn new(vocabulary: &'v Vocabulary, config: QualityConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Score a batch of records, each given as its entry list
    pub fn score(&self, records: &[Vec<MetadataEntry>]) -> QualityScore {
        let (score, _) = self.score_detailed(records);
        score
    }

    /// Score a batch and keep the ranked recommendations with their metrics
    pub fn score_detailed(
        &self,
        records: &[Vec<MetadataEntry>],
    ) -> (QualityScore, Vec<Recommendation>) {
        let completeness = metrics::completeness(records, &self.config);
        let richness = metrics::richness(records, &self.config);
        let consistency = metrics::consistency(records);
        let standardization = metrics::standardization(records, self.vocabulary);

        let outcomes = [
            (
                Metric::Completeness,
                self.config.completeness_weight,
                &completeness,
            ),
            (Metric::Richness, self.config.richness_weight, &richness),
            (
                Metric::Consistency,
                self.config.consistency_weight,
                &consistency,
            ),
            (
                Metric::Standardization,
                self.config.standardization_weight,
                &standardization,
            ),
        ];

        let overall: f64 = outcomes
            .iter()
            .map(|(_, weight, outcome)| weight * outcome.score)
            .sum();

        let ranked = rank(&outcomes, self.config.recommendation_threshold);

        debug!(
            "Scored {} records: C={:.1} R={:.1} Co={:.1} S={:.1}",
            records.len(),
            completeness.score,
            richness.score,
            consistency.score,
            standardization.score
        );

        let score = QualityScore {
            metrics: MetricScores {
                completeness: completeness.score,
                richness: richness.score,
                consistency: consistency.score,
                standardization: standardization.score,
            },
            overall,
            recommendations: ranked.iter().map(|r| r.message.clone()).collect(),
        };

        (score, ranked)
    }

    /// Score a batch and combine it with the records' validation results
    pub fn report(
        &self,
        records: &[Vec<MetadataEntry>],
        validations: &[ValidationResult],
    ) -> QualityReport {
        let (report, _) = self.report_detailed(records, validations);
        report
    }

    /// Build the report and keep the ranked recommendations, scoring once
    pub fn report_detailed(
        &self,
        records: &[Vec<MetadataEntry>],
        validations: &[ValidationResult],
    ) -> (QualityReport, Vec<Recommendation>) {
        let (score, ranked) = self.score_detailed(records);
        let report = QualityReport::new(score, validations);

        info!(
            "Quality report: {} resources, {} publishable, overall {:.1}",
            report.summary.resources, report.summary.publishable, report.summary.overall_score
        );

        (report, ranked)
    }
}

/// Score records with the standard vocabulary and default configuration
pub fn score(records: &[Vec<MetadataEntry>]) -> QualityScore {
    QualityScorer::default().score(records)
}
