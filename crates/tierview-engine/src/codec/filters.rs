//! Filter value codec

use tierview_core::{DraftFilterEntry, FilterCondition, FilterValue, Scalar, TabularFilter};

/// Split a tabular value into its condition and value set
pub fn decode_filter_value(value: &FilterValue) -> (FilterCondition, Vec<Scalar>) {
    (value.condition(), value.values().to_vec())
}

/// Build the tabular value for a condition and value set.
///
/// Returns `None` for an empty value set: such a filter is inactive and must
/// not be stored. A non-default condition always uses the conditioned form;
/// otherwise one value encodes as a bare scalar and several as a list.
pub fn encode_filter_value(condition: &FilterCondition, values: &[Scalar]) -> Option<FilterValue> {
    if values.is_empty() {
        return None;
    }

    if !condition.is_default() {
        return Some(FilterValue::Conditioned {
            condition: condition.clone(),
            values: values.to_vec(),
        });
    }

    Some(match values {
        [single] => FilterValue::Scalar(single.clone()),
        many => FilterValue::List(many.to_vec()),
    })
}

/// Decode tabular filters into draft rows.
///
/// Every input entry yields a row, including entries whose value decoded to
/// nothing, so a corrupted filter stays visible and removable.
pub fn decode_filters(filters: &[TabularFilter]) -> Vec<DraftFilterEntry> {
    filters
        .iter()
        .map(|filter| {
            let (condition, values) = decode_filter_value(&filter.value);
            DraftFilterEntry::new(filter.id.clone(), values).with_condition(condition)
        })
        .collect()
}

/// Encode draft rows back into tabular filters, omitting rows with no values
pub fn encode_filters(entries: &[DraftFilterEntry]) -> Vec<TabularFilter> {
    entries
        .iter()
        .filter_map(|entry| {
            let value = encode_filter_value(&entry.condition, &entry.values);
            if value.is_none() {
                tracing::trace!(filter_id = %entry.filter_id, "omitting filter with no values");
            }
            value.map(|value| TabularFilter::new(entry.filter_id.clone(), value))
        })
        .collect()
}
