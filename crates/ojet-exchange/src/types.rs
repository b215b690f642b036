//! Wire types exchanged with the component catalog

use crate::error::Result;
use crate::ident::ComponentIdent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog metadata for one component version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub name: String,
    pub version: String,

    /// Absolute or catalog-relative URL of the zip bundle
    pub code_url: String,

    #[serde(default)]
    pub resolved_dependencies: BTreeMap<String, ResolvedDependency>,
}

/// A dependency entry as resolved by the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,
}

impl ResolvedDependency {
    /// Identifier to install: available version first, then required, else unpinned
    pub fn ident(&self, name: &str) -> Result<ComponentIdent> {
        ComponentIdent::validate_name(name)?;
        let ident = match self
            .available_version
            .as_deref()
            .or(self.required_version.as_deref())
        {
            Some(version) => ComponentIdent::pinned(name, version),
            None => ComponentIdent::new(name),
        };
        Ok(ident)
    }
}

/// Body of `compositeDependencies`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    #[serde(default)]
    pub resolved_dependencies: BTreeMap<String, ResolvedDependency>,
}

impl DependencyReport {
    /// Dependency identifiers in name order
    pub fn idents(&self) -> Result<Vec<ComponentIdent>> {
        self.resolved_dependencies
            .iter()
            .map(|(name, dep)| dep.ident(name))
            .collect()
    }
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `GET /components?q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub items: Vec<ComponentSummary>,
}

/// Catalog login
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_ident_prefers_available_version() {
        let dep = ResolvedDependency {
            available_version: Some("2.0.1".into()),
            required_version: Some("^2.0.0".into()),
        };
        assert_eq!(dep.ident("demo-b").unwrap().to_string(), "demo-b@2.0.1");

        let dep = ResolvedDependency {
            available_version: None,
            required_version: Some("^2.0.0".into()),
        };
        assert_eq!(dep.ident("demo-b").unwrap().to_string(), "demo-b@^2.0.0");

        assert_eq!(
            ResolvedDependency::default().ident("demo-b").unwrap().to_string(),
            "demo-b"
        );
    }

    #[test]
    fn test_dependency_names_must_be_plain_segments() {
        let report: DependencyReport = serde_json::from_str(
            r#"{"resolvedDependencies": {"../../victim": {"availableVersion": "1.0.0"}}}"#,
        )
        .unwrap();
        let err = report.idents().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidComponentName { .. }));
    }

    #[test]
    fn test_metadata_from_catalog_json() {
        let meta: ComponentMetadata = serde_json::from_str(
            r#"{
                "name": "demo-a",
                "version": "1.0.0",
                "codeUrl": "https://cdn.example.com/demo-a-1.0.0.zip",
                "resolvedDependencies": {"demo-b": {"availableVersion": "1.1.0"}}
            }"#,
        )
        .unwrap();
        assert_eq!(meta.resolved_dependencies.len(), 1);
        assert_eq!(
            meta.resolved_dependencies["demo-b"].available_version.as_deref(),
            Some("1.1.0")
        );
    }
}
