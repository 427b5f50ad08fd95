//! Baseline diffing
//!
//! Flags draft rows that have no equal counterpart in a saved baseline (the
//! active Routine). This is a different question from "does the draft differ
//! from what is applied", which lives in [`crate::equality`].

use std::collections::HashSet;
use std::hash::Hash;

use itertools::Itertools;
use tierview_core::{
    DraftFilterEntry, DraftSortEntry, FilterCondition, Scalar, SortDirection, SortEntry,
    TabularFilter,
};

use crate::codec::decode_filter_value;

/// Matching key of an entry when comparing against a baseline
pub trait BaselineKey {
    fn baseline_key(&self) -> String;
}

fn sort_key(column_id: &str, direction: SortDirection) -> String {
    format!("{}:{}", column_id, direction.label())
}

/// `filterId` plus the sorted, de-duplicated canonical value set. A
/// non-default condition is part of the key so changing only the condition
/// is flagged. `10.0` and `10` share a key.
fn filter_key(filter_id: &str, condition: &FilterCondition, values: &[Scalar]) -> String {
    let value_set = values.iter().map(Scalar::canonical).sorted().dedup().join(",");
    if condition.is_default() {
        format!("{}=[{}]", filter_id, value_set)
    } else {
        format!("{}:{}=[{}]", filter_id, condition, value_set)
    }
}

impl BaselineKey for SortEntry {
    fn baseline_key(&self) -> String {
        sort_key(&self.column_id, self.direction())
    }
}

impl BaselineKey for DraftSortEntry {
    fn baseline_key(&self) -> String {
        sort_key(&self.column_id, self.direction)
    }
}

impl BaselineKey for DraftFilterEntry {
    fn baseline_key(&self) -> String {
        filter_key(&self.filter_id, &self.condition, &self.values)
    }
}

impl BaselineKey for TabularFilter {
    fn baseline_key(&self) -> String {
        let (condition, values) = decode_filter_value(&self.value);
        filter_key(&self.id, &condition, &values)
    }
}

/// Draft entries whose key has no counterpart in `baseline`, in draft order
pub fn diff_against_baseline<'a, D, B>(draft: &'a [D], baseline: &[B]) -> Vec<&'a D>
where
    D: BaselineKey,
    B: BaselineKey,
{
    diff_against_baseline_by(draft, baseline, D::baseline_key, B::baseline_key)
}

/// [`diff_against_baseline`] with explicit matchers for both sides
pub fn diff_against_baseline_by<'a, D, B, K, FD, FB>(
    draft: &'a [D],
    baseline: &[B],
    draft_key: FD,
    baseline_key: FB,
) -> Vec<&'a D>
where
    K: Eq + Hash,
    FD: Fn(&D) -> K,
    FB: Fn(&B) -> K,
{
    let saved: HashSet<K> = baseline.iter().map(baseline_key).collect();
    draft
        .iter()
        .filter(|entry| !saved.contains(&draft_key(*entry)))
        .collect()
}
