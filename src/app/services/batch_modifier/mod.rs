//! Batch modification interpreter
//!
//! Reads action files describing edits to already-published records and
//! applies them row by row through a [`RecordStore`].
//!
//! ## Architecture
//!
//! - [`action_file`] - CSV action file reading and row parsing
//! - [`interpreter`] - Entry list edits and the per-row lifecycle
//! - [`store`] - Record store seam and the in-memory implementation
//! - [`stats`] - Row outcome statistics
//!
//! Rows run in file order, so several rows aimed at the same record apply one
//! after another. Every rejected row carries a reason code.
//!
//! ## Usage
//!
//! ```rust
//! use metadata_curator::app::models::{MetadataEntry, Property};
//! use metadata_curator::app::services::batch_modifier::{
//!     BatchModifier, InMemoryRecordStore, read_actions,
//! };
//!
//! # fn example() -> metadata_curator::Result<()> {
//! let mut store = InMemoryRecordStore::new();
//! store.insert("R1", vec![MetadataEntry::literal(Property::Title, "Old")]);
//!
//! let rows = read_actions("id,action,property,value,lang\nR1,replace,title,New,\n".as_bytes())?;
//! let outcome = BatchModifier::new(&mut store).run(&rows);
//! assert!(outcome.all_committed());
//! # Ok(())
//! # }
//! ```

pub mod action_file;
pub mod interpreter;
pub mod stats;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use action_file::{ActionRow, parse_action, read_action_file, read_actions};
pub use interpreter::{
    ActionState, BatchModifier, RejectionReason, RowOutcome, apply_action, build_entries,
};
pub use stats::{BatchOutcome, ModificationStats};
pub use store::{InMemoryRecordStore, RecordStore};
