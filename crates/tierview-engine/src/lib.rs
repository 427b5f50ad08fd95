//! Tierview Engine - layered filter & sort configuration
//!
//! Pure functions over the value model in `tierview-core`:
//!
//! - [`codec`] - tabular <-> draft conversion for filters and sorting
//! - [`equality`] - order-aware sort equality and order-independent filter equality
//! - [`diff`] - draft entries missing from a saved baseline
//! - [`merge`] - Scope / Routine / User tier composition
//! - [`sync`] - the draft state machine of an editing surface
//! - [`rows`] - in-memory evaluation and sorting of rows
//!
//! Nothing in this crate performs I/O or holds global state.

pub mod codec;
pub mod diff;
pub mod equality;
pub mod merge;
pub mod rows;
pub mod sync;

pub use codec::{decode_filters, decode_sorting, encode_filters, encode_sorting};
pub use diff::{BaselineKey, diff_against_baseline, diff_against_baseline_by};
pub use equality::{draft_filters_equal, draft_sorting_equal, filters_equal, sorting_equal};
pub use merge::{TieredFilters, merge_filters};
pub use rows::{RowRecord, compare_rows, filter_rows, row_matches, sort_rows};
pub use sync::{
    DraftEdit, DraftEvent, DraftPhase, DraftSession, DraftSynchronizer, SyncState,
    toggle_column_sort,
};
pub use tierview_core::column_id_for;
