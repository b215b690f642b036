//! User settings loader with precedence
//!
//! Loads settings from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.ojet/config.yaml)
//! 3. Environment variables (OJET_* prefix)
//! 4. CLI options (handled by caller)

use crate::error::{Error, Result};
use crate::utils::get_ojet_dir;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const EMBEDDED_DEFAULTS: &str = include_str!("../../embedded/settings-defaults.yaml");

/// User config file name inside ~/.ojet
pub const SETTINGS_FILE_NAME: &str = "config.yaml";

/// Resolved ojet settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OjetSettings {
    pub exchange: ExchangeSettings,
    pub tooling: ToolingSettings,
    /// Package installer (npm or yarn)
    pub installer: String,
}

/// Component exchange client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// Fallback exchange URL when the project does not configure one
    pub url: Option<String>,
    pub http_timeout_secs: u64,
}

/// External tooling executables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolingSettings {
    /// npm package implementing build and serve
    pub package: String,
    pub node: String,
    pub cordova: String,
}

/// Settings loader
pub struct SettingsLoader {
    config_dir: PathBuf,
}

impl SettingsLoader {
    /// Create a loader reading from ~/.ojet
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_dir: get_ojet_dir()?,
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Load settings with full precedence applied
    pub fn load(&self) -> Result<OjetSettings> {
        let mut merged: Value = serde_yaml_ng::from_str(EMBEDDED_DEFAULTS)
            .map_err(|e| Error::invalid_config(format!("Invalid embedded defaults: {}", e)))?;

        let user_path = self.config_dir.join(SETTINGS_FILE_NAME);
        if user_path.is_file() {
            debug!("Loading user settings from {}", user_path.display());
            let overlay = Self::load_yaml_file(&user_path)?;
            merge_values(&mut merged, overlay);
        }

        let settings: OjetSettings = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Invalid settings: {}", e)))?;

        Self::apply_env_overrides(settings)
    }

    fn load_yaml_file(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    fn apply_env_overrides(mut settings: OjetSettings) -> Result<OjetSettings> {
        if let Ok(val) = env::var("OJET_EXCHANGE_URL") {
            settings.exchange.url = Some(val);
        }

        if let Ok(val) = env::var("OJET_HTTP_TIMEOUT_SECS") {
            settings.exchange.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("OJET_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("OJET_TOOLING_PACKAGE") {
            settings.tooling.package = val;
        }

        if let Ok(val) = env::var("OJET_NODE") {
            settings.tooling.node = val;
        }

        if let Ok(val) = env::var("OJET_CORDOVA") {
            settings.tooling.cordova = val;
        }

        if let Ok(val) = env::var("OJET_INSTALLER") {
            settings.installer = val;
        }

        Ok(settings)
    }
}

impl Default for OjetSettings {
    fn default() -> Self {
        serde_yaml_ng::from_str(EMBEDDED_DEFAULTS).expect("Embedded settings defaults are invalid")
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
