//! Filter values
//!
//! `FilterValue` is the tagged form of the three tabular value shapes. Raw
//! JSON is sniffed exactly once, in `FilterValue::from_json`; everything past
//! the boundary matches on the variant instead of re-inspecting JSON types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::FilterCondition;

/// A single filter value: text or a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(Number),
}

impl Scalar {
    /// Convert a JSON value into a scalar. Null, booleans, arrays and objects
    /// are not scalars.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
        }
    }

    /// Build a numeric scalar from a float. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::Number)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Numeric view of the scalar. Text that parses as a number counts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Whole-number floats become integers so `10.0` and `10` are one value.
    /// Text is never touched.
    pub fn normalized(&self) -> Self {
        match self {
            Self::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => {
                    Self::Number(Number::from(f as i64))
                }
                _ => self.clone(),
            },
            _ => self.clone(),
        }
    }

    /// Canonical JSON text, used as a stable key for sets and comparisons
    pub fn canonical(&self) -> String {
        self.normalized().to_json().to_string()
    }
}

/// Largest magnitude below which every whole f64 is an exact integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Tabular filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Single selected value, default condition
    Scalar(Scalar),
    /// "Value is one of these", default condition
    List(Vec<Scalar>),
    /// Explicit condition applied to the value set
    Conditioned {
        condition: FilterCondition,
        values: Vec<Scalar>,
    },
}

impl FilterValue {
    /// The empty value: a filter carrying it is inactive
    pub fn empty() -> Self {
        Self::List(Vec::new())
    }

    /// Decode a raw JSON value.
    ///
    /// Total over all JSON: unrecognized shapes decode to the empty list and
    /// non-scalar array members are dropped, keeping the valid remainder.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(_) | Value::Number(_) => match Scalar::from_json(value) {
                Some(scalar) => Self::Scalar(scalar),
                None => Self::empty(),
            },
            Value::Array(items) => Self::List(scalars_from(items)),
            Value::Object(map) => Self::from_object(map),
            Value::Null | Value::Bool(_) => {
                tracing::warn!(value = %value, "unrecognized filter value shape, treating as empty");
                Self::empty()
            }
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let values = match map.get("values") {
            Some(Value::Array(items)) => scalars_from(items),
            Some(other) => match Scalar::from_json(other) {
                Some(scalar) => vec![scalar],
                None => Vec::new(),
            },
            None => {
                tracing::warn!("filter value object has no `values` field, treating as empty");
                return Self::empty();
            }
        };

        let condition = map
            .get("condition")
            .and_then(Value::as_str)
            .map(FilterCondition::from)
            .unwrap_or_default();

        Self::Conditioned { condition, values }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(scalar) => scalar.to_json(),
            Self::List(values) => Value::Array(values.iter().map(Scalar::to_json).collect()),
            Self::Conditioned { condition, values } => {
                let mut map = Map::new();
                map.insert(
                    "condition".to_string(),
                    Value::String(condition.as_str().to_string()),
                );
                map.insert(
                    "values".to_string(),
                    Value::Array(values.iter().map(Scalar::to_json).collect()),
                );
                Value::Object(map)
            }
        }
    }

    /// The value set carried by this filter value
    pub fn values(&self) -> &[Scalar] {
        match self {
            Self::Scalar(scalar) => std::slice::from_ref(scalar),
            Self::List(values) => values,
            Self::Conditioned { values, .. } => values,
        }
    }

    /// The condition, with the bare shapes implying the default
    pub fn condition(&self) -> FilterCondition {
        match self {
            Self::Conditioned { condition, .. } => condition.clone(),
            Self::Scalar(_) | Self::List(_) => FilterCondition::default(),
        }
    }

    /// True when the value set is empty
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

fn scalars_from(items: &[Value]) -> Vec<Scalar> {
    let scalars: Vec<Scalar> = items.iter().filter_map(Scalar::from_json).collect();
    if scalars.len() != items.len() {
        tracing::trace!(
            dropped = items.len() - scalars.len(),
            "dropped non-scalar filter values"
        );
    }
    scalars
}

impl From<Scalar> for FilterValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Vec<Scalar>> for FilterValue {
    fn from(values: Vec<Scalar>) -> Self {
        Self::List(values)
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_scalar_shapes() {
        assert_eq!(
            FilterValue::from_json(&json!("bolt")),
            FilterValue::Scalar(Scalar::from("bolt"))
        );
        assert_eq!(
            FilterValue::from_json(&json!(42)),
            FilterValue::Scalar(Scalar::from(42))
        );
    }

    #[test]
    fn test_array_drops_non_scalars() {
        let value = FilterValue::from_json(&json!(["test", null, 123, {"a": 1}, true]));
        assert_eq!(
            value,
            FilterValue::List(vec![Scalar::from("test"), Scalar::from(123)])
        );
    }

    #[test]
    fn test_conditioned_shape() {
        let value = FilterValue::from_json(&json!({"condition": "greaterThan", "values": [10]}));
        assert_eq!(
            value,
            FilterValue::Conditioned {
                condition: FilterCondition::GreaterThan,
                values: vec![Scalar::from(10)],
            }
        );
    }

    #[test]
    fn test_object_without_condition_uses_default() {
        let value = FilterValue::from_json(&json!({"values": ["a"]}));
        assert_eq!(value.condition(), FilterCondition::Is);
        assert_eq!(value.values(), &[Scalar::from("a")]);
    }

    #[test]
    fn test_malformed_shapes_decode_empty() {
        assert!(FilterValue::from_json(&json!(null)).is_empty());
        assert!(FilterValue::from_json(&json!(false)).is_empty());
        assert!(FilterValue::from_json(&json!({"from": "2024-01-01"})).is_empty());
        assert!(FilterValue::from_json(&json!({"values": {"nested": 1}})).is_empty());
    }

    #[test]
    fn test_serialize_emits_wire_shapes() {
        let value = FilterValue::Conditioned {
            condition: FilterCondition::Between,
            values: vec![Scalar::from("2024-01-01"), Scalar::from("2024-02-01")],
        };
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"condition": "between", "values": ["2024-01-01", "2024-02-01"]})
        );

        let parsed: FilterValue = serde_json::from_value(json!(["x", 1])).unwrap();
        assert_eq!(parsed.values().len(), 2);
    }

    #[test]
    fn test_scalar_numeric_view() {
        assert_eq!(Scalar::from("12.5").as_f64(), Some(12.5));
        assert_eq!(Scalar::from(7).as_f64(), Some(7.0));
        assert_eq!(Scalar::from("abc").as_f64(), None);
        assert!(Scalar::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_whole_floats_canonicalize_as_integers() {
        let float = Scalar::from_f64(10.0).unwrap();
        assert_eq!(float.canonical(), Scalar::from(10).canonical());
        assert_eq!(float.normalized(), Scalar::from(10));
        assert_eq!(Scalar::from_f64(-3.0).unwrap().canonical(), "-3");

        assert_eq!(Scalar::from_f64(10.5).unwrap().canonical(), "10.5");
        assert_ne!(Scalar::from("10").canonical(), Scalar::from(10).canonical());
    }
}
