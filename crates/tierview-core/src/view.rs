//! Sort and filter state in its two representations
//!
//! The tabular types (`SortEntry`, `TabularFilter`, `ViewState`) are what gets
//! persisted into Routine/Scope records and what row evaluation consumes.
//! The draft types carry a synthetic per-row `id` so editing surfaces can
//! reorder, edit and remove rows independently of column identity.

use serde::{Deserialize, Serialize};

use crate::{FilterCondition, FilterValue, Scalar};

/// Prefix of draft filter ids (`filter-<filterId>`)
pub const FILTER_ID_PREFIX: &str = "filter-";

/// Prefix of draft sort ids (`sort-<n>`)
pub const SORT_ID_PREFIX: &str = "sort-";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending { Self::Desc } else { Self::Asc }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A single tabular sort entry. Position in the list is its priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    #[serde(rename = "id")]
    pub column_id: String,
    #[serde(rename = "desc", default)]
    pub descending: bool,
}

impl SortEntry {
    pub fn new(column_id: impl Into<String>, descending: bool) -> Self {
        Self {
            column_id: column_id.into(),
            descending,
        }
    }

    pub fn asc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, false)
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, true)
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_descending(self.descending)
    }
}

/// A single tabular filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularFilter {
    /// Filter definition id
    pub id: String,
    pub value: FilterValue,
}

impl TabularFilter {
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Shorthand for a default-condition filter over a list of values
    pub fn one_of<I, S>(id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self::new(
            id,
            FilterValue::List(values.into_iter().map(Into::into).collect()),
        )
    }

    /// A filter with no values is inactive and treated as absent
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Editable sort row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSortEntry {
    pub id: String,
    pub column_id: String,
    pub direction: SortDirection,
}

impl DraftSortEntry {
    /// Id of the sort row at `index`
    pub fn id_for(index: usize) -> String {
        format!("{}{}", SORT_ID_PREFIX, index)
    }
}

/// Editable filter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFilterEntry {
    pub id: String,
    pub filter_id: String,
    pub values: Vec<Scalar>,
    /// Re-attached on encode when not the default
    #[serde(default, skip_serializing_if = "FilterCondition::is_default")]
    pub condition: FilterCondition,
}

impl DraftFilterEntry {
    pub fn new(filter_id: impl Into<String>, values: Vec<Scalar>) -> Self {
        let filter_id = filter_id.into();
        Self {
            id: Self::id_for(&filter_id),
            filter_id,
            values,
            condition: FilterCondition::default(),
        }
    }

    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Deterministic draft id for a filter definition
    pub fn id_for(filter_id: &str) -> String {
        format!("{}{}", FILTER_ID_PREFIX, filter_id)
    }
}

/// Committed (applied) sort and filter configuration of a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub sorting: Vec<SortEntry>,
    #[serde(default)]
    pub filters: Vec<TabularFilter>,
}

impl ViewState {
    pub fn new(sorting: Vec<SortEntry>, filters: Vec<TabularFilter>) -> Self {
        Self { sorting, filters }
    }

    pub fn is_empty(&self) -> bool {
        self.sorting.is_empty() && self.filters.iter().all(TabularFilter::is_empty)
    }
}

/// Draft sort and filter configuration of an open editing surface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftView {
    pub sorting: Vec<DraftSortEntry>,
    pub filters: Vec<DraftFilterEntry>,
}

impl DraftView {
    pub fn is_empty(&self) -> bool {
        self.sorting.is_empty() && self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sort_entry_wire_format() {
        let entry: SortEntry = serde_json::from_value(json!({"id": "price", "desc": true})).unwrap();
        assert_eq!(entry, SortEntry::desc("price"));
        assert_eq!(
            serde_json::to_value(SortEntry::asc("partName")).unwrap(),
            json!({"id": "partName", "desc": false})
        );
    }

    #[test]
    fn test_view_state_parses_persisted_record() {
        let state: ViewState = serde_json::from_value(json!({
            "sorting": [{"id": "partName", "desc": false}],
            "filters": [
                {"id": "status", "value": "active"},
                {"id": "supplier", "value": ["Acme", null]},
                {"id": "price", "value": {"condition": "lessThan", "values": [20]}}
            ]
        }))
        .unwrap();

        assert_eq!(state.sorting.len(), 1);
        assert_eq!(state.filters.len(), 3);
        assert_eq!(state.filters[1].value.values(), &[Scalar::from("Acme")]);
        assert_eq!(state.filters[2].value.condition(), FilterCondition::LessThan);
    }

    #[test]
    fn test_draft_filter_entry_omits_default_condition() {
        let entry = DraftFilterEntry::new("partName", vec![Scalar::from("bolt")]);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"id": "filter-partName", "filterId": "partName", "values": ["bolt"]})
        );
    }

    #[test]
    fn test_empty_view_state_ignores_empty_filters() {
        let state = ViewState::new(Vec::new(), vec![TabularFilter::new("x", FilterValue::empty())]);
        assert!(state.is_empty());
    }
}
