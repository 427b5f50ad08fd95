//! Scope resolution

use tierview_core::TabularFilter;
use tierview_engine::merge_filters;

use crate::records::Scope;

/// Scope-tier filters for a view.
///
/// Applicable scopes (the view's own and global ones) are merged in list
/// order; on an id collision the earlier scope wins.
pub fn scope_filters_for(scopes: &[Scope], view_id: &str) -> Vec<TabularFilter> {
    scopes
        .iter()
        .filter(|scope| scope.applies_to(view_id))
        .fold(Vec::new(), |acc, scope| merge_filters(&acc, &scope.filters))
}
