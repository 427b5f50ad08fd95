//! Row filtering

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tierview_core::{FilterCondition, RowSettings, Scalar, TabularFilter, column_id_for};

use super::RowRecord;
use crate::codec::decode_filter_value;

/// Whether a row passes every active filter.
///
/// Filters with no values are inactive. The cell is looked up under the
/// filter's mapped column, or under the filter id when it has no mapping.
pub fn row_matches(row: &RowRecord, filters: &[TabularFilter], settings: &RowSettings) -> bool {
    filters.iter().all(|filter| {
        let (condition, values) = decode_filter_value(&filter.value);
        if values.is_empty() {
            return true;
        }
        let column = column_id_for(&filter.id).unwrap_or(filter.id.as_str());
        let cell = row.get(column).filter(|value| !value.is_null());
        evaluate_condition(&condition, cell, &values, settings.case_sensitive)
    })
}

/// Indices of the rows passing every active filter, in input order
pub fn filter_rows(rows: &[RowRecord], filters: &[TabularFilter], settings: &RowSettings) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, filters, settings))
        .map(|(index, _)| index)
        .collect()
}

fn evaluate_condition(
    condition: &FilterCondition,
    cell: Option<&Value>,
    values: &[Scalar],
    case_sensitive: bool,
) -> bool {
    let text = cell.map(cell_text);

    match condition {
        FilterCondition::IsEmpty => text.as_deref().is_none_or(str::is_empty),
        FilterCondition::IsNotEmpty => text.as_deref().is_some_and(|t| !t.is_empty()),
        FilterCondition::Custom(name) => {
            tracing::trace!(condition = %name, "custom condition not evaluated in memory");
            true
        }
        _ => {
            let Some(text) = text else {
                // A missing cell only satisfies the negated conditions
                return matches!(
                    condition,
                    FilterCondition::IsNot | FilterCondition::DoesNotContain
                );
            };
            evaluate_on_text(condition, &text, values, case_sensitive)
        }
    }
}

fn evaluate_on_text(
    condition: &FilterCondition,
    cell: &str,
    values: &[Scalar],
    case_sensitive: bool,
) -> bool {
    let fold = |s: &str| {
        if case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    };
    let cell_folded = fold(cell);
    let any_text = |test: &dyn Fn(&str, &str) -> bool| {
        values
            .iter()
            .any(|value| test(&cell_folded, &fold(&value.to_string())))
    };
    let first = &values[0];

    match condition {
        FilterCondition::Is => values
            .iter()
            .any(|value| compare(cell, value, case_sensitive) == Ordering::Equal),
        FilterCondition::IsNot => values
            .iter()
            .all(|value| compare(cell, value, case_sensitive) != Ordering::Equal),
        FilterCondition::Contains => any_text(&|c, v| c.contains(v)),
        FilterCondition::DoesNotContain => !any_text(&|c, v| c.contains(v)),
        FilterCondition::StartsWith => any_text(&|c, v| c.starts_with(v)),
        FilterCondition::EndsWith => any_text(&|c, v| c.ends_with(v)),
        FilterCondition::GreaterThan => compare(cell, first, case_sensitive).is_gt(),
        FilterCondition::GreaterThanOrEqual => compare(cell, first, case_sensitive).is_ge(),
        FilterCondition::LessThan => compare(cell, first, case_sensitive).is_lt(),
        FilterCondition::LessThanOrEqual => compare(cell, first, case_sensitive).is_le(),
        FilterCondition::Between | FilterCondition::NotBetween => {
            let upper = values.get(1).unwrap_or(first);
            let inside = compare(cell, first, case_sensitive).is_ge()
                && compare(cell, upper, case_sensitive).is_le();
            inside == matches!(condition, FilterCondition::Between)
        }
        FilterCondition::IsEmpty | FilterCondition::IsNotEmpty | FilterCondition::Custom(_) => {
            true
        }
    }
}

/// Display text of a non-null cell
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compare a cell with a filter value: numerically when both are numbers,
/// as dates when both parse as ISO dates, as text otherwise.
fn compare(cell: &str, value: &Scalar, case_sensitive: bool) -> Ordering {
    let cell = cell.trim();
    if let (Ok(a), Some(b)) = (cell.parse::<f64>(), value.as_f64()) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }

    let other = value.to_string();
    if let (Some(a), Some(b)) = (parse_date(cell), parse_date(&other)) {
        return a.cmp(&b);
    }

    if case_sensitive {
        cell.cmp(other.as_str())
    } else {
        cell.to_lowercase().cmp(&other.to_lowercase())
    }
}

pub(super) fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_utc());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
