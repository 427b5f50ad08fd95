//! Sort codec

use tierview_core::{DraftSortEntry, SortDirection, SortEntry};

/// Decode tabular sorting into draft rows with positional ids (`sort-<index>`)
pub fn decode_sorting(sorting: &[SortEntry]) -> Vec<DraftSortEntry> {
    sorting
        .iter()
        .enumerate()
        .map(|(index, entry)| DraftSortEntry {
            id: DraftSortEntry::id_for(index),
            column_id: entry.column_id.clone(),
            direction: entry.direction(),
        })
        .collect()
}

/// Encode draft rows back to tabular sorting. Order is priority and is kept.
pub fn encode_sorting(entries: &[DraftSortEntry]) -> Vec<SortEntry> {
    entries
        .iter()
        .map(|entry| SortEntry::new(entry.column_id.clone(), entry.direction == SortDirection::Desc))
        .collect()
}
