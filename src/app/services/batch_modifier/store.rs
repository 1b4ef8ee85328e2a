//! Record store seam
//!
//! [`RecordStore`] is the boundary to the repository holding published
//! records. [`InMemoryRecordStore`] keeps records in memory and persists them
//! as a JSON snapshot of the form `{ "<id>": [entries...] }`.

use crate::app::models::MetadataEntry;
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Access to existing records by id
pub trait RecordStore: Send + Sync {
    /// Current entries of a record, or `None` when the id is unknown
    fn fetch(&self, id: &str) -> Result<Option<Vec<MetadataEntry>>>;

    /// Replace a record's entries
    fn commit(&mut self, id: &str, entries: Vec<MetadataEntry>) -> Result<()>;
}

/// Record store backed by an ordered map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryRecordStore {
    records: BTreeMap<String, Vec<MetadataEntry>>,
    locked: BTreeSet<String>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let records: BTreeMap<String, Vec<MetadataEntry>> = serde_json::from_str(json)
            .map_err(|e| Error::serialization("Failed to parse record snapshot", e))?;
        Ok(Self {
            records,
            locked: BTreeSet::new(),
        })
    }

    /// Serialize all records as a pretty-printed JSON snapshot
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| Error::serialization("Failed to serialize record snapshot", e))
    }

    /// Load a JSON snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        let store = Self::from_json(&json)?;
        debug!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Write all records to disk as a JSON snapshot
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
        debug!("Saved {} records to {}", self.len(), path.display());
        Ok(())
    }

    pub fn insert(&mut self, id: impl Into<String>, entries: Vec<MetadataEntry>) {
        self.records.insert(id.into(), entries);
    }

    pub fn get(&self, id: &str) -> Option<&[MetadataEntry]> {
        self.records.get(id).map(Vec::as_slice)
    }

    /// Refuse future commits to a record
    pub fn lock(&mut self, id: impl Into<String>) {
        self.locked.insert(id.into());
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// All records in id order
    pub fn records(&self) -> impl Iterator<Item = (&str, &[MetadataEntry])> {
        self.records
            .iter()
            .map(|(id, entries)| (id.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, Vec<MetadataEntry>)> for InMemoryRecordStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<MetadataEntry>)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            locked: BTreeSet::new(),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn fetch(&self, id: &str) -> Result<Option<Vec<MetadataEntry>>> {
        Ok(self.records.get(id).cloned())
    }

    fn commit(&mut self, id: &str, entries: Vec<MetadataEntry>) -> Result<()> {
        if self.locked.contains(id) {
            return Err(Error::record_store(format!("record {} is locked", id)));
        }
        if !self.records.contains_key(id) {
            return Err(Error::target_not_found(id));
        }
        self.records.insert(id.to_string(), entries);
        Ok(())
    }
}
