//! Engine settings

use serde::{Deserialize, Serialize};

/// Placement of missing/null cells when sorting rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPosition {
    /// Nulls appear first
    First,
    /// Nulls appear last (default, matches SQL behavior)
    #[default]
    Last,
}

impl NullPosition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// In-memory row evaluation settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RowSettings {
    /// Compare text case-sensitively (default: case-insensitive)
    pub case_sensitive: bool,
    pub null_position: NullPosition,
}

/// Logging settings persisted alongside the engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            default_filter: "info,tierview_core=info,tierview_engine=info,tierview_routines=info"
                .to_string(),
            json: false,
        }
    }
}

/// Top-level settings file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub rows: RowSettings,
    pub logging: LogSettings,
}
