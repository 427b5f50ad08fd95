//! Tier merging
//!
//! Scope filters are read-only, lowest precedence and always applied. The
//! applied Routine/User filters are authoritative: on an id collision the
//! whole applied entry wins, value lists are never unioned.

use std::collections::HashSet;

use tierview_core::TabularFilter;

/// Merge two filter tiers.
///
/// Starts from `high` and appends each `low` entry whose id is not already
/// present. Entries with no values are treated as absent on both sides, so an
/// emptied high entry does not shadow a low one. Not commutative: call with
/// the Routine/User tier as `high` and the Scope tier as `low`.
pub fn merge_filters(high: &[TabularFilter], low: &[TabularFilter]) -> Vec<TabularFilter> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(high.len() + low.len());

    for filter in high.iter().filter(|f| !f.is_empty()) {
        seen.insert(filter.id.as_str());
        merged.push(filter.clone());
    }

    for filter in low.iter().filter(|f| !f.is_empty()) {
        if seen.insert(filter.id.as_str()) {
            merged.push(filter.clone());
        } else {
            tracing::trace!(filter_id = %filter.id, "lower tier filter shadowed");
        }
    }

    merged
}

/// Filters contributed by each tier of a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieredFilters {
    /// Scope tier, injected automatically and never edited here
    pub scope: Vec<TabularFilter>,
    /// Committed Routine/User tier
    pub applied: Vec<TabularFilter>,
}

impl TieredFilters {
    pub fn new(scope: Vec<TabularFilter>, applied: Vec<TabularFilter>) -> Self {
        Self { scope, applied }
    }

    /// The filter set rows are evaluated against
    pub fn effective(&self) -> Vec<TabularFilter> {
        merge_filters(&self.applied, &self.scope)
    }

    /// Ids of active scope filters overridden by the applied tier
    pub fn shadowed_scope_ids(&self) -> Vec<&str> {
        let applied: HashSet<&str> = self
            .applied
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| f.id.as_str())
            .collect();
        self.scope
            .iter()
            .filter(|f| !f.is_empty() && applied.contains(f.id.as_str()))
            .map(|f| f.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tierview_core::{FilterValue, Scalar};

    #[test]
    fn test_high_tier_wins_and_low_passes_through() {
        let high = vec![TabularFilter::one_of("column2", ["value2"])];
        let low = vec![
            TabularFilter::one_of("column2", ["scopeValue"]),
            TabularFilter::one_of("column3", ["value3"]),
        ];

        let merged = merge_filters(&high, &low);
        assert_eq!(
            merged,
            vec![
                TabularFilter::one_of("column2", ["value2"]),
                TabularFilter::one_of("column3", ["value3"]),
            ]
        );
    }

    #[test]
    fn test_no_union_on_collision() {
        let high = vec![TabularFilter::one_of("supplier", ["Acme"])];
        let low = vec![TabularFilter::one_of("supplier", ["Acme", "Globex"])];
        assert_eq!(merge_filters(&high, &low), high);
    }

    #[test]
    fn test_not_commutative() {
        let a = vec![TabularFilter::one_of("x", ["a"])];
        let b = vec![TabularFilter::one_of("x", ["b"])];
        assert_ne!(merge_filters(&a, &b), merge_filters(&b, &a));
    }

    #[test]
    fn test_empty_inputs() {
        let filters = vec![TabularFilter::new("status", Scalar::from("active"))];
        assert_eq!(merge_filters(&filters, &[]), filters);
        assert_eq!(merge_filters(&[], &filters), filters);
        assert!(merge_filters(&[], &[]).is_empty());
    }

    #[test]
    fn test_empty_high_entry_does_not_shadow() {
        let high = vec![TabularFilter::new("status", FilterValue::empty())];
        let low = vec![TabularFilter::new("status", Scalar::from("active"))];
        assert_eq!(merge_filters(&high, &low), low);
    }

    #[test]
    fn test_idempotent() {
        let filters = vec![
            TabularFilter::one_of("a", ["1", "2"]),
            TabularFilter::new("b", Scalar::from(3)),
        ];
        assert_eq!(merge_filters(&filters, &filters), filters);
        let once = merge_filters(&filters, &[]);
        assert_eq!(merge_filters(&once, &filters), once);
    }

    #[test]
    fn test_tiered_filters() {
        let tiers = TieredFilters::new(
            vec![
                TabularFilter::one_of("warehouse", ["north"]),
                TabularFilter::one_of("status", ["active"]),
            ],
            vec![TabularFilter::one_of("status", ["backordered"])],
        );

        let effective = tiers.effective();
        assert_eq!(effective.len(), 2);
        assert_eq!(effective[0], TabularFilter::one_of("status", ["backordered"]));
        assert_eq!(tiers.shadowed_scope_ids(), vec!["status"]);
    }
}
