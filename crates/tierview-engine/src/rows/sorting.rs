//! Multi-column row sorting with null handling

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde_json::Value;
use tierview_core::{NullPosition, SortEntry};

use super::RowRecord;
use super::filtering::parse_date;

/// Compare two rows by every sort entry in priority order
pub fn compare_rows(
    a: &RowRecord,
    b: &RowRecord,
    sorting: &[SortEntry],
    null_position: NullPosition,
) -> Ordering {
    for entry in sorting {
        let left = a.get(&entry.column_id).filter(|v| !v.is_null());
        let right = b.get(&entry.column_id).filter(|v| !v.is_null());

        // Null placement holds regardless of direction
        let ordering = match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match null_position {
                NullPosition::First => return Ordering::Less,
                NullPosition::Last => return Ordering::Greater,
            },
            (Some(_), None) => match null_position {
                NullPosition::First => return Ordering::Greater,
                NullPosition::Last => return Ordering::Less,
            },
            (Some(left), Some(right)) => compare_values(left, right),
        };

        if ordering != Ordering::Equal {
            return if entry.descending {
                ordering.reverse()
            } else {
                ordering
            };
        }
    }
    Ordering::Equal
}

/// Sort rows in place. Stable: rows equal under every entry keep their order.
pub fn sort_rows(rows: &mut [RowRecord], sorting: &[SortEntry], null_position: NullPosition) {
    if sorting.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare_rows(a, b, sorting, null_position));
}

/// Sort key of a non-null cell. Keys of different kinds compare by kind
/// alone, in declaration order, which keeps the ordering total over mixed
/// columns.
enum SortKey<'a> {
    /// Numbers and text that parses as a finite number
    Number(f64),
    Date(NaiveDateTime),
    Text(&'a str),
    Bool(bool),
    Other(String),
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Other(n.to_string()),
            },
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Self::Number(f),
                _ => match parse_date(s) {
                    Some(date) => Self::Date(date),
                    None => Self::Text(s),
                },
            },
            Value::Bool(b) => Self::Bool(*b),
            other => Self::Other(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
            Self::Bool(_) => 3,
            Self::Other(_) => 4,
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Date(x), SortKey::Date(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(&y),
        (SortKey::Other(x), SortKey::Other(y)) => x.cmp(&y),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(values: Vec<Value>) -> Vec<RowRecord> {
        values
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    fn column<'a>(rows: &'a [RowRecord], column_id: &str) -> Vec<&'a Value> {
        rows.iter().map(|row| &row[column_id]).collect()
    }

    #[test]
    fn test_single_column_ascending_and_descending() {
        let mut data = rows(vec![
            json!({"price": 3}),
            json!({"price": 1}),
            json!({"price": 2.5}),
        ]);

        sort_rows(&mut data, &[SortEntry::asc("price")], NullPosition::Last);
        assert_eq!(column(&data, "price"), vec![&json!(1), &json!(2.5), &json!(3)]);

        sort_rows(&mut data, &[SortEntry::desc("price")], NullPosition::Last);
        assert_eq!(column(&data, "price"), vec![&json!(3), &json!(2.5), &json!(1)]);
    }

    #[test]
    fn test_multi_column_sort() {
        let mut data = rows(vec![
            json!({"supplier": "B", "price": 1}),
            json!({"supplier": "A", "price": 2}),
            json!({"supplier": "A", "price": 1}),
            json!({"supplier": "B", "price": 2}),
        ]);

        sort_rows(
            &mut data,
            &[SortEntry::asc("supplier"), SortEntry::desc("price")],
            NullPosition::Last,
        );
        let pairs: Vec<_> = data
            .iter()
            .map(|row| (row["supplier"].clone(), row["price"].clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (json!("A"), json!(2)),
                (json!("A"), json!(1)),
                (json!("B"), json!(2)),
                (json!("B"), json!(1)),
            ]
        );
    }

    #[test]
    fn test_null_position() {
        let data = rows(vec![json!({"price": 2}), json!({"price": null}), json!({}), json!({"price": 1})]);

        let mut last = data.clone();
        sort_rows(&mut last, &[SortEntry::desc("price")], NullPosition::Last);
        assert_eq!(last[0]["price"], json!(2));
        assert_eq!(last[1]["price"], json!(1));

        let mut first = data;
        sort_rows(&mut first, &[SortEntry::asc("price")], NullPosition::First);
        assert_eq!(first[2]["price"], json!(1));
        assert_eq!(first[3]["price"], json!(2));
    }

    #[test]
    fn test_numeric_text_and_dates() {
        let mut data = rows(vec![json!({"v": "10"}), json!({"v": "9"}), json!({"v": 9.5})]);
        sort_rows(&mut data, &[SortEntry::asc("v")], NullPosition::Last);
        assert_eq!(column(&data, "v"), vec![&json!("9"), &json!(9.5), &json!("10")]);

        let mut data = rows(vec![
            json!({"d": "2024-05-01T00:00:00Z"}),
            json!({"d": "2024-01-15"}),
        ]);
        sort_rows(&mut data, &[SortEntry::asc("d")], NullPosition::Last);
        assert_eq!(data[0]["d"], json!("2024-01-15"));
    }

    #[test]
    fn test_mixed_numeric_and_plain_text() {
        let mut data = rows(vec![
            json!({"part": "1a"}),
            json!({"part": "10"}),
            json!({"part": true}),
            json!({"part": "9"}),
            json!({"part": "2024-01-15"}),
            json!({"part": 9.5}),
        ]);
        sort_rows(&mut data, &[SortEntry::asc("part")], NullPosition::Last);
        assert_eq!(
            column(&data, "part"),
            vec![
                &json!("9"),
                &json!(9.5),
                &json!("10"),
                &json!("2024-01-15"),
                &json!("1a"),
                &json!(true),
            ]
        );
    }

    #[test]
    fn test_empty_sorting_keeps_order() {
        let mut data = rows(vec![json!({"a": 2}), json!({"a": 1})]);
        sort_rows(&mut data, &[], NullPosition::Last);
        assert_eq!(data[0]["a"], json!(2));
    }
}
