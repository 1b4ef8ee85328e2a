//! Quality scorer for metadata snapshots
//!
//! Scores a batch of records on completeness, richness, consistency and
//! standardization, combines them into a weighted overall score, and ranks
//! improvement recommendations.
//!
//! ## Architecture
//!
//! - [`config`] - Weights and thresholds
//! - [`metrics`] - The four metric computations
//! - [`recommendations`] - Ranking by weighted deficit
//! - [`scorer`] - The scorer itself and report assembly
//!
//! Scoring reads its input only; the same snapshot always yields the same
//! score.
//!
//! ## Usage
//!
//! ```rust
//! use metadata_curator::app::models::{MetadataEntry, Property};
//! use metadata_curator::app::services::quality_scorer::score;
//!
//! let records = vec![vec![MetadataEntry::literal(Property::Title, "Untitled")]];
//! let quality = score(&records);
//! assert!(quality.overall < 50.0);
//! ```

pub mod config;
pub mod metrics;
pub mod recommendations;
pub mod scorer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use config::QualityConfig;
pub use metrics::{Metric, MetricOutcome};
pub use recommendations::Recommendation;
pub use scorer::{QualityScorer, score};
