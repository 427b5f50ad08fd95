//! Filter definition to table column identity mapping
//!
//! Filter definitions and table columns are named independently. The table
//! below is the single source of truth and only maps filterId -> columnId;
//! the reverse direction is derived by scanning it.

/// (filter definition id, data column id)
const FILTER_COLUMNS: &[(&str, &str)] = &[
    ("part-name", "partName"),
    ("part-number", "partNumber"),
    ("category", "category"),
    ("supplier", "supplier"),
    ("price", "price"),
    ("quantity-on-hand", "quantity"),
    ("reorder-level", "reorderLevel"),
    ("warehouse", "warehouse"),
    ("status", "status"),
    ("last-ordered", "lastOrderedAt"),
];

/// Resolve the table column a filter definition applies to.
///
/// `None` means the filter has no column of its own and must be edited with
/// the generic filter editor rather than the column-scoped one.
pub fn column_id_for(filter_id: &str) -> Option<&'static str> {
    mapped_pairs()
        .iter()
        .find(|(filter, _)| *filter == filter_id)
        .map(|(_, column)| *column)
}

/// Resolve the filter definition bound to a table column, if any
pub fn filter_id_for(column_id: &str) -> Option<&'static str> {
    mapped_pairs()
        .iter()
        .find(|(_, column)| *column == column_id)
        .map(|(filter, _)| *filter)
}

/// All mapped pairs in table order
pub fn mapped_pairs() -> &'static [(&'static str, &'static str)] {
    FILTER_COLUMNS
}
