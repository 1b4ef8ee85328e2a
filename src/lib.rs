//! Metadata Curator Library
//!
//! A Rust library for turning research spreadsheets into repository-compliant
//! metadata records and curating them once they are published.
//!
//! This library provides tools for:
//! - Parsing spreadsheet cells (multilingual, person lists, delimited lists)
//! - Assembling ordered property/value/language entry lists from CSV rows
//! - Validating entry lists against required-field and format rules
//! - Scoring batches of records for completeness, richness and consistency
//! - Interpreting action files that bulk-edit existing records
//! - Comprehensive error handling with row-scoped failures

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_modifier;
        pub mod field_parser;
        pub mod metadata_assembler;
        pub mod quality_scorer;
        pub mod validator;
        pub mod vocabulary;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    MetadataEntry, MetadataValue, ModificationAction, PersonRecord, Property, QualityScore,
    ValidationResult,
};
pub use config::Config;

/// Result type alias for the metadata curator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for metadata transformation and curation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Malformed cell or action row (the caller's data is wrong)
    #[error("Format error in '{field}': {message}")]
    Format { field: String, message: String },

    /// Record id could not be resolved by the record store
    #[error("Target record not found: {id}")]
    TargetNotFound { id: String },

    /// Attempt to language-tag a system-controlled property
    #[error("Property '{property}' is system-controlled and cannot carry a language tag")]
    PropertyLocked { property: String },

    /// Record store refused a write
    #[error("Record store error: {message}")]
    RecordStore { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON (de)serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a format error for a named cell, column or action field
    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a target not found error
    pub fn target_not_found(id: impl Into<String>) -> Self {
        Self::TargetNotFound { id: id.into() }
    }

    /// Create a property locked error
    pub fn property_locked(property: impl Into<String>) -> Self {
        Self::PropertyLocked {
            property: property.into(),
        }
    }

    /// Create a record store error
    pub fn record_store(message: impl Into<String>) -> Self {
        Self::RecordStore {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error is a malformed-input error
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML configuration: {}", error),
        }
    }
}
