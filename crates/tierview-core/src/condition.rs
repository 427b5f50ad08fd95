//! Filter conditions
//!
//! A condition describes how a filter's value set is applied to a cell. The
//! default condition (`is`) is implied by the bare scalar and array value
//! shapes; every other condition travels in the `{condition, values}` form.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Condition applied to a filter's value set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterCondition {
    // Set membership
    #[default]
    Is,
    IsNot,

    // Text matching
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,

    // Ordered comparison (numbers, ISO dates, then text)
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,

    // Range (first two values, inclusive)
    Between,
    NotBetween,

    // Presence
    IsEmpty,
    IsNotEmpty,

    /// Any condition string this build does not know about. Kept verbatim so
    /// records written by a newer schema survive a decode/encode cycle.
    Custom(String),
}

impl FilterCondition {
    /// Wire name of the condition
    pub fn as_str(&self) -> &str {
        match self {
            Self::Is => "is",
            Self::IsNot => "isNot",
            Self::Contains => "contains",
            Self::DoesNotContain => "doesNotContain",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::Between => "between",
            Self::NotBetween => "notBetween",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
            Self::Custom(name) => name,
        }
    }

    /// Get the display label for the condition
    pub fn label(&self) -> &str {
        match self {
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::Contains => "contains",
            Self::DoesNotContain => "does not contain",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqual => "greater than or equal",
            Self::LessThan => "less than",
            Self::LessThanOrEqual => "less than or equal",
            Self::Between => "is between",
            Self::NotBetween => "is not between",
            Self::IsEmpty => "is empty",
            Self::IsNotEmpty => "is not empty",
            Self::Custom(name) => name,
        }
    }

    /// Returns true for the condition implied by the bare value shapes
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Is)
    }

    /// Returns true if this condition needs at least one value to be active
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Returns true if this condition reads two values (range bounds)
    pub fn requires_two_values(&self) -> bool {
        matches!(self, Self::Between | Self::NotBetween)
    }

    /// All known conditions in display order
    pub fn all() -> &'static [FilterCondition] {
        &[
            Self::Is,
            Self::IsNot,
            Self::Contains,
            Self::DoesNotContain,
            Self::StartsWith,
            Self::EndsWith,
            Self::GreaterThan,
            Self::GreaterThanOrEqual,
            Self::LessThan,
            Self::LessThanOrEqual,
            Self::Between,
            Self::NotBetween,
            Self::IsEmpty,
            Self::IsNotEmpty,
        ]
    }
}

impl FromStr for FilterCondition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "is" => Self::Is,
            "isNot" => Self::IsNot,
            "contains" => Self::Contains,
            "doesNotContain" => Self::DoesNotContain,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "greaterThan" => Self::GreaterThan,
            "greaterThanOrEqual" => Self::GreaterThanOrEqual,
            "lessThan" => Self::LessThan,
            "lessThanOrEqual" => Self::LessThanOrEqual,
            "between" => Self::Between,
            "notBetween" => Self::NotBetween,
            "isEmpty" => Self::IsEmpty,
            "isNotEmpty" => Self::IsNotEmpty,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<&str> for FilterCondition {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(condition) => condition,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}
