//! Recommendation ranking

use super::metrics::{Metric, MetricOutcome};
use serde::{Deserialize, Serialize};

/// An improvement suggested for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub metric: Metric,
    pub message: String,
    /// Metric weight times the distance to a perfect score
    pub weighted_deficit: f64,
}

impl Recommendation {
    pub fn new(metric: Metric, message: impl Into<String>, weight: f64, score: f64) -> Self {
        Self {
            metric,
            message: message.into(),
            weighted_deficit: weight * (100.0 - score).max(0.0),
        }
    }
}

/// One recommendation per metric scoring below `threshold`, most impactful first
///
/// Metrics with no unmet rule produce nothing even when below threshold. Ties
/// keep metric order.
pub fn rank(outcomes: &[(Metric, f64, &MetricOutcome)], threshold: f64) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = outcomes
        .iter()
        .filter(|(_, _, outcome)| outcome.score < threshold)
        .filter_map(|(metric, weight, outcome)| {
            outcome
                .unmet_rule
                .as_ref()
                .map(|rule| Recommendation::new(*metric, rule, *weight, outcome.score))
        })
        .collect();

    recommendations.sort_by(|a, b| b.weighted_deficit.total_cmp(&a.weighted_deficit));
    recommendations
}
