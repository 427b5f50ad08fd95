//! In-memory row evaluation
//!
//! Applies an effective filter set and a sort list to rows held in memory.
//! Rows are JSON objects keyed by column id.

mod filtering;
mod sorting;

pub use filtering::{filter_rows, row_matches};
pub use sorting::{compare_rows, sort_rows};

/// A row keyed by column id
pub type RowRecord = serde_json::Map<String, serde_json::Value>;
