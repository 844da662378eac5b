use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::estimator::DEFAULT_MODELING_HOURS;

const APP_NAME: &str = "tp-calculator";
const CONFIG_FILE: &str = "config.json";

/// Environment variable that overrides the configured port.
pub const PORT_ENV: &str = "TPCALC_PORT";

pub const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Port the UI server listens on (127.0.0.1 only).
    pub port: u16,
    /// Reference database location. Defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Fixed data modeling overhead added to every estimate, in hours.
    pub modeling_hours: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: None,
            modeling_hours: DEFAULT_MODELING_HOURS,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// `TPCALC_PORT`. Returns defaults if the file doesn't exist or fails
    /// to parse.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_port_override(std::env::var(PORT_ENV).ok().as_deref())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config file")?;

        if !config.modeling_hours.is_finite() || config.modeling_hours < 0.0 {
            anyhow::bail!(
                "Invalid modeling_hours {} in config file; expected a non-negative number of hours",
                config.modeling_hours
            );
        }

        Ok(config)
    }

    /// Apply a port override such as the value of `TPCALC_PORT`.
    /// Unparseable values are ignored with a warning.
    pub fn with_port_override(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            match value.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", PORT_ENV, value),
            }
        }
        self
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
