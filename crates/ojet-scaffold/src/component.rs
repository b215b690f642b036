//! `create component` generator

use crate::engine::{TemplateEngine, TemplateSource};
use crate::error::{Error, Result};
use crate::tokens::TokenSet;
use crate::tsconfig;
use ojet_core::naming::{validate_component_name, validate_pack_name};
use ojet_core::{ComponentJson, Project};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Kind of component to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComponentType {
    #[default]
    Composite,
    Resource,
}

impl FromStr for ComponentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "composite" => Ok(Self::Composite),
            "resource" => Ok(Self::Resource),
            other => Err(Error::InvalidComponentType {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite => write!(f, "composite"),
            Self::Resource => write!(f, "resource"),
        }
    }
}

/// Options for `create component`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentOptions {
    pub name: String,
    /// Create the component as a member of this pack
    pub pack: Option<String>,
    pub component_type: ComponentType,
}

impl ComponentOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        match &self.pack {
            Some(pack) => format!("{}-{}", pack, self.name),
            None => self.name.clone(),
        }
    }
}

/// Generate a component under the project's components directory and return its path
pub async fn create_component(project: &Project, options: &ComponentOptions) -> Result<PathBuf> {
    let full_name = options.full_name();

    let (dir, pack_dir) = match &options.pack {
        Some(pack) => {
            validate_pack_name(&options.name)?;
            validate_component_name(&full_name)?;

            let pack_dir = project.components_dir().join(pack);
            let is_pack = ComponentJson::load_async(&pack_dir)
                .await
                .map(|c| c.is_pack())
                .unwrap_or(false);
            if !is_pack {
                return Err(Error::PackNotFound { name: pack.clone() });
            }
            (pack_dir.join(&options.name), Some(pack_dir))
        }
        None => {
            validate_component_name(&options.name)?;
            (project.components_dir().join(&options.name), None)
        }
    };

    if tokio::fs::try_exists(&dir).await? {
        return Err(Error::already_exists(&full_name, dir.display().to_string()));
    }

    let template = match (options.component_type, project.config().typescript) {
        (ComponentType::Resource, _) => "component/resource",
        (ComponentType::Composite, true) => "component/composite-ts",
        (ComponentType::Composite, false) => "component/composite",
    };
    let engine = TemplateEngine::new(TokenSet::for_component(&options.name, options.pack.as_deref()));
    engine.render(&TemplateSource::Embedded(template.to_string()), &dir)?;

    let mut component = ComponentJson::load_async(&dir).await?;
    if let Some(pack_dir) = &pack_dir {
        component.pack = options.pack.clone();
        component.save(&dir)?;
        register_with_pack(pack_dir, &full_name, &component.version).await?;
    }

    tsconfig::add_path_mapping(project, &full_name, &dir)?;

    info!("Created {} component '{}'", options.component_type, full_name);
    Ok(dir)
}

async fn register_with_pack(pack_dir: &std::path::Path, member: &str, version: &str) -> Result<()> {
    let mut pack = ComponentJson::load_async(pack_dir).await?;
    pack.dependencies
        .insert(member.to_string(), version.to_string());
    pack.save(pack_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_parse() {
        assert_eq!("resource".parse::<ComponentType>().unwrap(), ComponentType::Resource);
        assert!(matches!(
            "widget".parse::<ComponentType>(),
            Err(Error::InvalidComponentType { .. })
        ));
    }

    #[test]
    fn test_full_name() {
        let mut options = ComponentOptions::new("card");
        assert_eq!(options.full_name(), "card");
        options.pack = Some("acme".into());
        assert_eq!(options.full_name(), "acme-card");
    }
}
