//! Filter definitions
//!
//! Static metadata describing the filters a view offers. Definitions drive
//! display (labels, grouping, option labels) and validation; they play no
//! part in merge or equality.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{DraftFilterEntry, Scalar, TierviewError, column_id_for};

/// Group a filter definition is listed under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Favorites,
    General,
    /// Domain-specific group, e.g. "inventory" or "purchasing"
    Domain(String),
}

impl FilterCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Favorites => "favorites",
            Self::General => "general",
            Self::Domain(group) => group,
        }
    }
}

impl From<&str> for FilterCategory {
    fn from(s: &str) -> Self {
        match s {
            "favorites" => Self::Favorites,
            "general" => Self::General,
            other => Self::Domain(other.to_string()),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Kind of value a filter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterValueType {
    Text,
    Number,
    Date,
    Select,
    MultiSelect,
}

/// Enumerated option of a select filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: Scalar,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<Scalar>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Static metadata for one filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    pub id: String,
    pub label: String,
    pub category: FilterCategory,
    pub value_type: FilterValueType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FilterOption>,
    #[serde(default)]
    pub favorite: bool,
}

impl FilterDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: FilterCategory,
        value_type: FilterValueType,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            value_type,
            options: Vec::new(),
            favorite: false,
        }
    }

    pub fn with_options(mut self, options: Vec<FilterOption>) -> Self {
        self.options = options;
        self
    }

    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }

    /// Column this filter edits, if it has one
    pub fn column_id(&self) -> Option<&'static str> {
        column_id_for(&self.id)
    }

    /// Label of an option value, falling back to the value itself
    pub fn option_label(&self, value: &Scalar) -> String {
        self.options
            .iter()
            .find(|option| &option.value == value)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    /// Returns true if `value` is acceptable for this definition
    pub fn accepts(&self, value: &Scalar) -> bool {
        match self.value_type {
            FilterValueType::Text => true,
            FilterValueType::Number => value.as_f64().is_some(),
            FilterValueType::Date => match value {
                Scalar::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
                Scalar::Number(_) => false,
            },
            FilterValueType::Select | FilterValueType::MultiSelect => {
                self.options.is_empty() || self.options.iter().any(|o| &o.value == value)
            }
        }
    }
}

/// Ordered collection of filter definitions
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog {
    definitions: IndexMap<String, FilterDefinition>,
}

impl FilterCatalog {
    pub fn new(definitions: impl IntoIterator<Item = FilterDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.id.clone(), definition))
                .collect(),
        }
    }

    /// Definitions for the parts inventory dashboard
    pub fn builtin() -> Self {
        use FilterCategory::{Domain, General};
        use FilterValueType::*;

        let inventory = || Domain("inventory".to_string());
        let purchasing = || Domain("purchasing".to_string());

        Self::new([
            FilterDefinition::new("part-name", "Part name", General, Text).favorite(),
            FilterDefinition::new("part-number", "Part number", General, Text),
            FilterDefinition::new("category", "Category", General, MultiSelect).with_options(vec![
                FilterOption::new("fasteners", "Fasteners"),
                FilterOption::new("electrical", "Electrical"),
                FilterOption::new("hydraulics", "Hydraulics"),
                FilterOption::new("tooling", "Tooling"),
            ]),
            FilterDefinition::new("status", "Status", General, Select)
                .with_options(vec![
                    FilterOption::new("active", "Active"),
                    FilterOption::new("discontinued", "Discontinued"),
                    FilterOption::new("backordered", "Backordered"),
                ])
                .favorite(),
            FilterDefinition::new("price", "Unit price", purchasing(), Number),
            FilterDefinition::new("supplier", "Supplier", purchasing(), MultiSelect),
            FilterDefinition::new("last-ordered", "Last ordered", purchasing(), Date),
            FilterDefinition::new("quantity-on-hand", "Quantity on hand", inventory(), Number)
                .favorite(),
            FilterDefinition::new("reorder-level", "Reorder level", inventory(), Number),
            FilterDefinition::new("warehouse", "Warehouse", inventory(), Select).with_options(vec![
                FilterOption::new("north", "North DC"),
                FilterOption::new("south", "South DC"),
                FilterOption::new("east", "East DC"),
            ]),
            FilterDefinition::new("low-stock", "Below reorder level", inventory(), Select)
                .with_options(vec![FilterOption::new("yes", "Yes"), FilterOption::new("no", "No")]),
        ])
    }

    /// Parse a catalog from a JSON array of definitions. Ids must be unique.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let definitions: Vec<FilterDefinition> = serde_json::from_str(text)?;
        let count = definitions.len();
        let catalog = Self::new(definitions);
        if catalog.len() != count {
            return Err(TierviewError::Configuration(
                "filter catalog contains duplicate ids".to_string(),
            ));
        }
        Ok(catalog)
    }

    /// Load a catalog file written as a JSON array of definitions
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        tracing::debug!(count = catalog.len(), "loaded filter catalog from {:?}", path);
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&FilterDefinition> {
        self.definitions.get(id)
    }

    /// Like [`Self::get`], but an unknown id is an error
    pub fn require(&self, id: &str) -> crate::Result<&FilterDefinition> {
        self.get(id)
            .ok_or_else(|| TierviewError::UnknownFilter(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDefinition> {
        self.definitions.values()
    }

    /// Definitions flagged as favorites, in catalog order
    pub fn favorites(&self) -> Vec<&FilterDefinition> {
        self.iter().filter(|d| d.favorite).collect()
    }

    /// Definitions listed under `category`. `Favorites` selects by the favorite flag.
    pub fn by_category(&self, category: &FilterCategory) -> Vec<&FilterDefinition> {
        match category {
            FilterCategory::Favorites => self.favorites(),
            other => self.iter().filter(|d| &d.category == other).collect(),
        }
    }

    /// Case-insensitive match on label or id. An empty query lists everything.
    pub fn search(&self, query: &str) -> Vec<&FilterDefinition> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.iter().collect();
        }
        self.iter()
            .filter(|d| d.label.to_lowercase().contains(&query) || d.id.contains(&query))
            .collect()
    }

    /// Display label of a value of the given filter
    pub fn option_label(&self, filter_id: &str, value: &Scalar) -> String {
        match self.get(filter_id) {
            Some(definition) => definition.option_label(value),
            None => value.to_string(),
        }
    }

    /// Values of a draft entry its definition does not accept.
    ///
    /// Entries for filters missing from the catalog are not validated.
    pub fn validate(&self, entry: &DraftFilterEntry) -> Vec<Scalar> {
        let Some(definition) = self.get(&entry.filter_id) else {
            return Vec::new();
        };
        entry
            .values
            .iter()
            .filter(|value| !definition.accepts(value))
            .cloned()
            .collect()
    }
}
