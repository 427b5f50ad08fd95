//! Structural equality for sort and filter lists
//!
//! Sorting is an ordered list: swapping primary and secondary sort is a real
//! difference. Filters are a set keyed by id: order never matters, and both
//! sides go through the same canonicalization before comparison so that
//! `"x"` and `["x"]` compare equal while raw shapes are never compared.

use itertools::Itertools;
use tierview_core::{
    DraftFilterEntry, DraftSortEntry, FilterValue, Scalar, SortEntry, TabularFilter,
};

use crate::codec::{decode_filter_value, encode_filter_value, encode_filters};

/// True iff the `(columnId, direction)` sequences match element for element
pub fn sorting_equal(a: &[SortEntry], b: &[SortEntry]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.column_id == y.column_id && x.descending == y.descending)
}

/// Sort equality for draft rows; row ids are ignored
pub fn draft_sorting_equal(a: &[DraftSortEntry], b: &[DraftSortEntry]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.column_id == y.column_id && x.direction == y.direction)
}

/// Canonical text of a filter value: the re-encoded wire form as JSON.
///
/// `None` for values with nothing selected, which count as absent. Whole
/// numbers compare equal whatever their float/integer form.
pub fn canonical_value(value: &FilterValue) -> Option<String> {
    let (condition, values) = decode_filter_value(value);
    let values: Vec<Scalar> = values.iter().map(Scalar::normalized).collect();
    encode_filter_value(&condition, &values).map(|encoded| encoded.to_json().to_string())
}

/// Normalize a filter list to sorted `(id, canonical value)` pairs
pub fn normalize_filters(filters: &[TabularFilter]) -> Vec<(String, String)> {
    filters
        .iter()
        .filter_map(|filter| canonical_value(&filter.value).map(|value| (filter.id.clone(), value)))
        .sorted()
        .collect()
}

/// Order-independent filter equality over canonicalized entries
pub fn filters_equal(a: &[TabularFilter], b: &[TabularFilter]) -> bool {
    normalize_filters(a) == normalize_filters(b)
}

/// Filter equality for draft rows, compared through their tabular encoding
pub fn draft_filters_equal(a: &[DraftFilterEntry], b: &[DraftFilterEntry]) -> bool {
    filters_equal(&encode_filters(a), &encode_filters(b))
}
