//! Logging setup for tierview hosts
//!
//! Library code only emits `tracing` events; whichever process embeds the
//! engine calls [`init`] once to install a subscriber. `RUST_LOG` takes
//! precedence over the configured default filter.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::LogSettings;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level filter
    pub default_filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Colored output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "debug,tierview_core=debug,tierview_engine=debug,tierview_routines=debug"
                .to_string(),
            json: false,
            include_location: cfg!(debug_assertions),
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Production configuration: JSON lines, info level
    pub fn production() -> Self {
        Self {
            default_filter: LogSettings::default().default_filter,
            json: true,
            include_location: false,
            ansi: false,
        }
    }

    /// Development configuration: human-readable, verbose
    pub fn development() -> Self {
        Self::default()
    }

    /// Testing configuration: everything, no colors
    pub fn testing() -> Self {
        Self {
            default_filter: "trace".to_string(),
            json: false,
            include_location: true,
            ansi: false,
        }
    }

    /// Configuration derived from the persisted settings file
    pub fn from_settings(settings: &LogSettings) -> Self {
        Self {
            default_filter: settings.default_filter.clone(),
            json: settings.json,
            ansi: !settings.json,
            ..Self::default()
        }
    }

    /// Build the filter, honouring `RUST_LOG` first
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = config.env_filter();

    let mut layers = Vec::new();
    if config.json {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_ansi(false)
                .json()
                .with_filter(env_filter)
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_ansi(config.ansi)
                .with_filter(env_filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        json = config.json,
        filter = %config.default_filter,
        "Logging initialized"
    );
    Ok(())
}

/// Initialize logging with the build-appropriate preset
pub fn init_default() -> anyhow::Result<()> {
    let config = if cfg!(debug_assertions) {
        LoggingConfig::development()
    } else {
        LoggingConfig::production()
    };

    init(config)
}
