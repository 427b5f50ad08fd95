//! Persisted records: routines and scopes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tierview_core::{TabularFilter, ViewState};
use uuid::Uuid;

/// A record a [`crate::Repository`] can store
pub trait Record: Serialize + DeserializeOwned + Clone + Send {
    /// Storage name of the record kind, used as the table name
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Named, saved sort/filter configuration of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub view_id: String,
    #[serde(default)]
    pub view: ViewState,
    /// Loaded automatically when the view opens
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    pub fn new(name: impl Into<String>, view_id: impl Into<String>, view: ViewState) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            view_id: view_id.into(),
            view,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for Routine {
    const KIND: &'static str = "routines";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Read-only filters injected into views by an administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub id: String,
    pub name: String,
    /// View the scope is limited to; `None` applies to every view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    #[serde(default)]
    pub filters: Vec<TabularFilter>,
}

impl Scope {
    pub fn new(name: impl Into<String>, view_id: impl Into<String>, filters: Vec<TabularFilter>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            view_id: Some(view_id.into()),
            filters,
        }
    }

    /// A scope applying to every view
    pub fn global(name: impl Into<String>, filters: Vec<TabularFilter>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            view_id: None,
            filters,
        }
    }

    pub fn applies_to(&self, view_id: &str) -> bool {
        self.view_id.as_deref().is_none_or(|id| id == view_id)
    }
}

impl Record for Scope {
    const KIND: &'static str = "scopes";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tierview_core::SortEntry;

    #[test]
    fn test_routine_round_trips_through_json() {
        let routine = Routine::new(
            "Low stock",
            "inventory",
            ViewState::new(
                vec![SortEntry::asc("quantity")],
                vec![TabularFilter::one_of("warehouse", ["north"])],
            ),
        )
        .with_description("Parts to reorder");

        let json = serde_json::to_value(&routine).unwrap();
        assert_eq!(json["viewId"], json!("inventory"));
        assert_eq!(json["view"]["sorting"], json!([{"id": "quantity", "desc": false}]));

        let back: Routine = serde_json::from_value(json).unwrap();
        assert_eq!(back, routine);
    }

    #[test]
    fn test_scope_applicability() {
        let scoped = Scope::new("North only", "inventory", Vec::new());
        let global = Scope::global("Active only", Vec::new());

        assert!(scoped.applies_to("inventory"));
        assert!(!scoped.applies_to("orders"));
        assert!(global.applies_to("orders"));
    }
}
