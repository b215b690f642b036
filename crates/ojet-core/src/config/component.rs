//! `component.json` model shared by authored and exchange components

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Metadata file present in every component and pack directory
pub const COMPONENT_FILE_NAME: &str = "component.json";

/// Contents of `component.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentJson {
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jet_version: Option<String>,

    /// `composite`, `pack`, `resource`, ...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,

    /// Owning pack for pack members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComponentJson {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn is_pack(&self) -> bool {
        self.component_type.as_deref() == Some("pack")
    }

    /// Full custom element name (`<pack>-<name>` for pack members)
    pub fn full_name(&self) -> String {
        match &self.pack {
            Some(pack) => format!("{}-{}", pack, self.name),
            None => self.name.clone(),
        }
    }

    /// Read `component.json` from a component directory
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(COMPONENT_FILE_NAME);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&path, &content)
    }

    /// Async variant of [`ComponentJson::load`]
    pub async fn load_async(dir: &Path) -> Result<Self> {
        let path = dir.join(COMPONENT_FILE_NAME);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&path, &content)
    }

    /// Write `component.json` into a component directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(dir.join(COMPONENT_FILE_NAME), content)?;
        Ok(())
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            Error::invalid_config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_full_name_for_pack_member() {
        let mut comp = ComponentJson::new("card", "1.0.0");
        assert_eq!(comp.full_name(), "card");
        comp.pack = Some("acme".to_string());
        assert_eq!(comp.full_name(), "acme-card");
    }

    #[test]
    fn test_save_and_load_preserves_extra_keys() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(COMPONENT_FILE_NAME),
            r#"{"name": "demo-card", "version": "1.2.0", "type": "pack", "properties": {"x": 1}}"#,
        )
        .unwrap();

        let comp = ComponentJson::load(temp.path()).unwrap();
        assert!(comp.is_pack());
        assert_eq!(comp.version, "1.2.0");

        comp.save(temp.path()).unwrap();
        let raw = std::fs::read_to_string(temp.path().join(COMPONENT_FILE_NAME)).unwrap();
        assert!(raw.contains("properties"));
    }

    #[tokio::test]
    async fn test_load_async_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ComponentJson::load_async(temp.path()).await.unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
