//! Application constants for the metadata curator
//!
//! This module contains the controlled vocabularies, property identifiers,
//! default values and scoring parameters used throughout the engine. All
//! tables are immutable; the [`Vocabulary`](crate::app::services::vocabulary::Vocabulary)
//! service wraps them for lookups.

// =============================================================================
// Property Namespaces
// =============================================================================

/// Namespace of the repository's own mandatory properties
pub const REPOSITORY_TERMS_NS: &str = "http://nakala.fr/terms#";

/// Dublin Core terms namespace used for every optional property
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

/// Property identifiers (full URIs as expected by the repository API)
pub mod properties {
    pub const TITLE: &str = "http://nakala.fr/terms#title";
    pub const CREATOR: &str = "http://nakala.fr/terms#creator";
    pub const CREATED: &str = "http://nakala.fr/terms#created";
    pub const LICENSE: &str = "http://nakala.fr/terms#license";
    pub const TYPE: &str = "http://nakala.fr/terms#type";

    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    pub const ABSTRACT: &str = "http://purl.org/dc/terms/abstract";
    pub const ALTERNATIVE: &str = "http://purl.org/dc/terms/alternative";
    pub const SUBJECT: &str = "http://purl.org/dc/terms/subject";
    pub const LANGUAGE: &str = "http://purl.org/dc/terms/language";
    pub const SPATIAL: &str = "http://purl.org/dc/terms/spatial";
    pub const TEMPORAL: &str = "http://purl.org/dc/terms/temporal";
    pub const CONTRIBUTOR: &str = "http://purl.org/dc/terms/contributor";
    pub const PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
    pub const RIGHTS: &str = "http://purl.org/dc/terms/rights";
    pub const RELATION: &str = "http://purl.org/dc/terms/relation";
    pub const SOURCE: &str = "http://purl.org/dc/terms/source";
    pub const DATE: &str = "http://purl.org/dc/terms/date";
    pub const AVAILABLE: &str = "http://purl.org/dc/terms/available";
    pub const FORMAT: &str = "http://purl.org/dc/terms/format";
}

// =============================================================================
// Value Type Identifiers
// =============================================================================

/// XML Schema datatype URIs used as entry value types
pub mod value_types {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
}

// =============================================================================
// Controlled Vocabularies
// =============================================================================

/// Prefix shared by every COAR resource type identifier
pub const RESOURCE_TYPE_PREFIX: &str = "http://purl.org/coar/resource_type/";

/// Syntactic pattern for a resource type identifier
///
/// Covers both the legacy `c_xxxx` identifiers and the newer `XXXX-XXXX` form.
pub const RESOURCE_TYPE_PATTERN: &str =
    r"^http://purl\.org/coar/resource_type/(c_[0-9a-z]{4}|[A-Z0-9]{4}-[A-Z0-9]{4})$";

/// Accepted resource types as (identifier, label) pairs
pub const RESOURCE_TYPES: &[(&str, &str)] = &[
    ("http://purl.org/coar/resource_type/c_ddb1", "dataset"),
    ("http://purl.org/coar/resource_type/c_c513", "image"),
    ("http://purl.org/coar/resource_type/c_ecc8", "still image"),
    ("http://purl.org/coar/resource_type/c_8a7e", "moving image"),
    ("http://purl.org/coar/resource_type/c_12ce", "video"),
    ("http://purl.org/coar/resource_type/c_18cc", "sound"),
    ("http://purl.org/coar/resource_type/c_18cf", "text"),
    ("http://purl.org/coar/resource_type/c_6501", "journal article"),
    ("http://purl.org/coar/resource_type/c_2f33", "book"),
    ("http://purl.org/coar/resource_type/c_3248", "book part"),
    ("http://purl.org/coar/resource_type/c_5794", "conference paper"),
    ("http://purl.org/coar/resource_type/c_46ec", "thesis"),
    ("http://purl.org/coar/resource_type/c_93fc", "report"),
    ("http://purl.org/coar/resource_type/c_12cd", "map"),
    ("http://purl.org/coar/resource_type/c_12cc", "cartographic material"),
    ("http://purl.org/coar/resource_type/c_5ce6", "software"),
    ("http://purl.org/coar/resource_type/c_e9a0", "interactive resource"),
    ("http://purl.org/coar/resource_type/c_e059", "learning object"),
    ("http://purl.org/coar/resource_type/c_18cw", "musical composition"),
    ("http://purl.org/coar/resource_type/c_1843", "other"),
];

/// Accepted license identifiers (SPDX style plus common open-data licences)
pub const LICENSES: &[&str] = &[
    "CC-BY-4.0",
    "CC-BY-SA-4.0",
    "CC-BY-ND-4.0",
    "CC-BY-NC-4.0",
    "CC-BY-NC-SA-4.0",
    "CC-BY-NC-ND-4.0",
    "CC-BY-3.0",
    "CC-BY-SA-3.0",
    "CC-BY-NC-3.0",
    "CC-BY-NC-SA-3.0",
    "CC-BY-NC-ND-3.0",
    "CC0-1.0",
    "etalab-2.0",
    "ODbL-1.0",
    "ODC-By-1.0",
    "PDDL-1.0",
    "MIT",
    "Apache-2.0",
    "GPL-3.0",
    "LGPL-3.0",
    "BSD-3-Clause",
    "Copyright",
];

/// ISO 639-1 language codes
pub const LANGUAGES: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

/// Pattern for a person identifier (ORCID iD, optionally as a URL)
pub const PERSON_IDENTIFIER_PATTERN: &str =
    r"^(?:https?://orcid\.org/)?(\d{4}-\d{4}-\d{4}-\d{3}[\dX])$";

// =============================================================================
// Cell Grammar
// =============================================================================

/// Separator between `lang:value` segments in a multilingual cell
pub const MULTILINGUAL_SEPARATOR: char = '|';

/// Separator between items of a person list or delimited list
pub const LIST_SEPARATOR: char = ';';

/// Separator between surname and given name
pub const NAME_SEPARATOR: char = ',';

/// Pattern for one typed multilingual segment
pub const LANGUAGE_SEGMENT_PATTERN: &str = r"(?s)^([a-z]{2}):(.*)$";

/// Accepted date-literal pattern (YYYY, YYYY-MM, YYYY-MM-DD)
pub const DATE_PATTERN: &str = r"^(\d{4})(?:-(\d{2})(?:-(\d{2}))?)?$";

// =============================================================================
// Action File
// =============================================================================

/// Expected header columns of a batch action file
pub const ACTION_FILE_COLUMNS: &[&str] = &["id", "action", "property", "value", "lang"];

/// Current version of the default column mapping
pub const DEFAULT_MAPPING_VERSION: u32 = 1;

// =============================================================================
// Quality Scoring Defaults
// =============================================================================

/// Quality scoring parameters
pub mod quality {
    /// Weight of the completeness metric in the overall score
    pub const COMPLETENESS_WEIGHT: f64 = 0.4;

    /// Weight of the richness metric in the overall score
    pub const RICHNESS_WEIGHT: f64 = 0.3;

    /// Weight of the consistency metric in the overall score
    pub const CONSISTENCY_WEIGHT: f64 = 0.2;

    /// Weight of the standardization metric in the overall score
    pub const STANDARDIZATION_WEIGHT: f64 = 0.1;

    /// Completeness weight of one mandatory property
    pub const MANDATORY_PROPERTY_WEIGHT: f64 = 2.0;

    /// Completeness weight of one recommended property
    pub const RECOMMENDED_PROPERTY_WEIGHT: f64 = 1.0;

    /// Minimum description length (words) counted as rich
    pub const MIN_DESCRIPTION_WORDS: usize = 20;

    /// Minimum number of keywords counted as rich
    pub const MIN_KEYWORDS: usize = 2;

    /// Minimum number of title languages counted as rich
    pub const MIN_TITLE_LANGUAGES: usize = 2;

    /// Metric score below which a recommendation is emitted
    pub const RECOMMENDATION_THRESHOLD: f64 = 80.0;
}

/// Upper bound on parallel validation workers
pub const MAX_PARALLEL_WORKERS: usize = 100;
