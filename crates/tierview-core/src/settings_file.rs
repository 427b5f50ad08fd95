//! Settings file utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::EngineSettings;

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("tierview"))
}

pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .context("Could not determine data directory")
        .map(|p| p.join("tierview"))
}

pub fn settings_file() -> Result<PathBuf> {
    config_dir().map(|p| p.join("settings.json"))
}

/// Load settings from `path`, falling back to defaults when the file does not exist
pub fn load_settings(path: &Path) -> Result<EngineSettings> {
    if !path.exists() {
        tracing::debug!("No settings file at {:?}, using defaults", path);
        return Ok(EngineSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {:?}", path))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings JSON at {:?}", path))
}

/// Write settings to `path` as pretty JSON, creating parent directories
pub fn save_settings(path: &Path, settings: &EngineSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {:?}", path))?;

    tracing::debug!("Saved settings to {:?}", path);
    Ok(())
}
