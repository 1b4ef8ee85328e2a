//! Metadata assembler for spreadsheet rows
//!
//! This module consumes tabular rows plus a column→property mapping and
//! produces ordered metadata entry lists in the repository's API shape.
//!
//! ## Architecture
//!
//! - [`mapping`] - Versioned column rules (column → property → field kind)
//! - [`assembler`] - Row assembly and the unverified-vocabulary side channel
//! - [`reader`] - CSV reading with row-scoped failures
//! - [`stats`] - Assembly statistics and result structures
//!
//! Output order follows the mapping, never the input column order, so two
//! calls with the same row and mapping always produce identical lists.
//!
//! ## Usage
//!
//! ```rust
//! use metadata_curator::app::models::Row;
//! use metadata_curator::app::services::metadata_assembler::{FieldMapping, assemble};
//!
//! # fn example() -> metadata_curator::Result<()> {
//! let row = Row::from([("title", "fr:Titre|en:Title"), ("creator", "Dupont,Jean")]);
//! let assembly = assemble(&row, &FieldMapping::standard())?;
//! println!("{} entries", assembly.entries.len());
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod mapping;
pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use assembler::{Assembly, AssemblyNotice, AssemblyNoticeKind, MetadataAssembler, assemble};
pub use mapping::{ColumnRule, FieldMapping};
pub use reader::ID_COLUMN;
pub use stats::{AssemblyStats, RowAssembly, SpreadsheetAssembly};
