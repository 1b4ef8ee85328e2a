//! Configuration management and validation.
//!
//! Provides the configuration for column mapping, validation strictness,
//! quality scoring parameters and worker counts, loadable from a TOML file.
//!
//! ```toml
//! workers = 8
//!
//! [mapping]
//! version = 2
//! rules = [
//!     { column = "titre", property = "title" },
//!     { column = "auteurs", property = "creator", kind = "person_list" },
//! ]
//!
//! [validation]
//! strict_multilingual = true
//!
//! [quality]
//! min_description_words = 30
//! ```

use crate::app::services::metadata_assembler::{ColumnRule, FieldMapping};
use crate::app::services::quality_scorer::QualityConfig;
use crate::app::services::validator::Validator;
use crate::app::services::vocabulary::Vocabulary;
use crate::constants::{DEFAULT_MAPPING_VERSION, MAX_PARALLEL_WORKERS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Column mapping configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Layer `rules` over the standard mapping instead of replacing it
    pub extend_standard: bool,

    /// Version of the configured rules
    pub version: u32,

    /// Column rules in output order
    pub rules: Vec<ColumnRule>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            extend_standard: true,
            version: DEFAULT_MAPPING_VERSION,
            rules: Vec::new(),
        }
    }
}

impl MappingConfig {
    /// The effective mapping table
    pub fn field_mapping(&self) -> FieldMapping {
        let configured = FieldMapping {
            version: self.version,
            rules: self.rules.clone(),
        };

        if self.extend_standard {
            let mut mapping = FieldMapping::standard();
            mapping.extend(configured);
            mapping
        } else {
            configured
        }
    }
}

/// Validation behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report mixed multilingual cells as errors rather than warnings
    pub strict_multilingual: bool,
}

/// Global configuration for metadata curation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of worker threads for concurrent validation (defaults to the CPU count)
    pub workers: usize,

    /// Column mapping
    pub mapping: MappingConfig,

    /// Validation settings
    pub validation: ValidationConfig,

    /// Quality scoring settings
    pub quality: QualityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, MAX_PARALLEL_WORKERS),
            mapping: MappingConfig::default(),
            validation: ValidationConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        let config = Self::from_toml_str(&contents)?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Report mixed multilingual cells as errors
    pub fn with_strict_multilingual(mut self) -> Self {
        self.validation.strict_multilingual = true;
        self
    }

    /// Configure quality scoring
    pub fn with_quality(mut self, quality: QualityConfig) -> Self {
        self.quality = quality;
        self
    }

    /// Add or override one mapping rule
    pub fn with_mapping_rule(mut self, rule: ColumnRule) -> Self {
        match self.mapping.rules.iter_mut().find(|r| r.column == rule.column) {
            Some(existing) => *existing = rule,
            None => self.mapping.rules.push(rule),
        }
        self
    }

    /// The effective column mapping
    pub fn field_mapping(&self) -> FieldMapping {
        self.mapping.field_mapping()
    }

    /// Validator configured with these settings
    pub fn validator<'v>(&self, vocabulary: &'v Vocabulary) -> Validator<'v> {
        Validator::new(vocabulary).with_strict_multilingual(self.validation.strict_multilingual)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }
        if self.workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "workers cannot exceed {}",
                MAX_PARALLEL_WORKERS
            )));
        }

        self.field_mapping().validate()?;
        self.quality.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FieldKind, Property};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert!((1..=MAX_PARALLEL_WORKERS).contains(&config.workers));
        assert_eq!(config.field_mapping(), FieldMapping::standard());
        assert!(!config.validation.strict_multilingual);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_extends_standard_mapping() {
        let config = Config::from_toml_str(
            r#"
            workers = 2

            [mapping]
            version = 2
            rules = [
                { column = "auteurs", property = "creator" },
                { column = "title", property = "title", kind = "text" },
            ]

            [validation]
            strict_multilingual = true

            [quality]
            min_description_words = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.workers, 2);
        assert!(config.validation.strict_multilingual);
        assert_eq!(config.quality.min_description_words, 30);

        let mapping = config.field_mapping();
        assert_eq!(mapping.version, 2);
        assert_eq!(mapping.len(), FieldMapping::standard().len() + 1);
        assert_eq!(
            mapping.rule_for("auteurs").unwrap().property,
            Property::Creator
        );
        assert_eq!(
            mapping.rule_for("title").unwrap().field_kind(),
            FieldKind::Text
        );
    }

    #[test]
    fn test_toml_can_replace_standard_mapping() {
        let config = Config::from_toml_str(
            r#"
            [mapping]
            extend_standard = false
            rules = [{ column = "nom", property = "title" }]
            "#,
        )
        .unwrap();

        let mapping = config.field_mapping();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.columns().collect::<Vec<_>>(), vec!["nom"]);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(Config::from_toml_str("workers = 0").is_err());
        assert!(Config::from_toml_str("workers = 101").is_err());
        assert!(Config::from_toml_str("[quality]\ncompleteness_weight = 0.9").is_err());
        assert!(Config::from_toml_str("[mapping]\nrules = [{ column = \"x\", property = \"colour\" }]").is_err());
        assert!(Config::from_toml_str("workers = \"many\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "workers = 3").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.workers, 3);

        let missing = Config::from_file(Path::new("/nonexistent/curator.toml"));
        assert!(matches!(missing, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_workers(16)
            .with_strict_multilingual()
            .with_mapping_rule(ColumnRule::new("auteurs", Property::Creator));

        assert_eq!(config.workers, 16);
        assert!(config.validation.strict_multilingual);
        assert!(config.field_mapping().rule_for("auteurs").is_some());
    }
}
