//! Project configuration (`oraclejetconfig.json`) loading and saving
//!
//! The file is read-modify-write: keys this crate does not model are kept in
//! `extra` and written back untouched.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "oraclejetconfig.json";

/// Contents of `oraclejetconfig.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_browser: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_version: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub typescript: bool,

    /// Package installer used by `create` and `restore` (npm or yarn)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer: Option<String>,

    /// Component exchange (catalog) base URL
    #[serde(
        rename = "exchange-url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exchange_url: Option<String>,

    /// First-level exchange components declared by this project (name -> version)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub composites: BTreeMap<String, String>,

    /// Keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `paths` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub source: SourcePaths,
    pub staging: StagingPaths,
}

/// `paths.source` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourcePaths {
    pub common: String,
    pub javascript: String,
    pub typescript: String,
    pub styles: String,
    pub themes: String,
    pub components: String,
    pub exchange_components: String,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            common: "src".to_string(),
            javascript: "js".to_string(),
            typescript: "ts".to_string(),
            styles: "css".to_string(),
            themes: "themes".to_string(),
            components: "jet-composites".to_string(),
            exchange_components: "jet_components".to_string(),
        }
    }
}

/// `paths.staging` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingPaths {
    pub web: String,
    pub hybrid: String,
    pub themes: String,
}

impl Default for StagingPaths {
    fn default() -> Self {
        Self {
            web: "web".to_string(),
            hybrid: "hybrid".to_string(),
            themes: "themes".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Parse from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize to pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// A JET project on disk: its root directory and loaded configuration
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Create a project handle without touching the filesystem
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Check whether `root` contains an oraclejetconfig.json
    pub fn is_jet_app(root: &Path) -> bool {
        root.join(CONFIG_FILE_NAME).is_file()
    }

    /// Open the project rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let path = root.join(CONFIG_FILE_NAME);

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_a_jet_app(root.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;

        let config = ProjectConfig::from_json(&content).map_err(|e| {
            Error::invalid_config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        debug!("Loaded project config from {}", path.display());
        Ok(Self { root, config })
    }

    /// Write the configuration back to oraclejetconfig.json
    pub async fn save(&self) -> Result<()> {
        let path = self.config_path();
        tokio::fs::write(&path, self.config.to_json()?).await?;
        debug!("Saved project config to {}", path.display());
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ProjectConfig {
        &mut self.config
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Source root (`src`)
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.source.common)
    }

    /// Script directory, `src/ts` for TypeScript projects and `src/js` otherwise
    pub fn script_dir(&self) -> PathBuf {
        let source = &self.config.paths.source;
        let dir = if self.config.typescript {
            &source.typescript
        } else {
            &source.javascript
        };
        self.source_dir().join(dir)
    }

    /// Directory holding components authored in this project
    pub fn components_dir(&self) -> PathBuf {
        self.script_dir().join(&self.config.paths.source.components)
    }

    /// Directory holding components installed from the exchange
    pub fn exchange_components_dir(&self) -> PathBuf {
        self.root
            .join(&self.config.paths.source.exchange_components)
    }

    /// Theme sources (`src/themes`)
    pub fn themes_dir(&self) -> PathBuf {
        self.source_dir().join(&self.config.paths.source.themes)
    }

    /// Web staging directory (`web`)
    pub fn staging_web_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.staging.web)
    }

    /// Cordova project directory (`hybrid`)
    pub fn hybrid_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.staging.hybrid)
    }

    pub fn is_hybrid(&self) -> bool {
        self.hybrid_dir().join("config.xml").is_file()
    }

    pub fn tsconfig_path(&self) -> PathBuf {
        self.root.join("tsconfig.json")
    }
}
