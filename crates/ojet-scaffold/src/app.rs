//! `create app` generator

use crate::engine::{CopyReport, TemplateEngine, TemplateSource};
use crate::error::{Error, Result};
use crate::tokens::TokenSet;
use crate::tsconfig;
use ojet_core::naming::validate_app_name;
use ojet_core::{Project, ProjectConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Built-in app templates
pub const BUILTIN_TEMPLATES: &[&str] = &["blank", "basic"];

const DEFAULT_THEME: &str = "redwood";
const DEFAULT_BROWSER: &str = "chrome";
const ARCHITECTURE: &str = "mvvm";

/// Options for `create app`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// `blank`, `basic`, a directory, or a `.zip` file
    pub template: String,
    pub typescript: bool,
    /// npm or yarn; recorded in oraclejetconfig.json
    pub installer: Option<String>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            template: "blank".to_string(),
            typescript: false,
            installer: None,
        }
    }
}

/// Result of `create app`
#[derive(Debug)]
pub struct CreatedApp {
    pub name: String,
    pub project: Project,
    pub report: CopyReport,
}

impl CreatedApp {
    pub fn root(&self) -> &Path {
        self.project.root()
    }
}

/// Resolve `--template` to a template source
pub fn resolve_template(template: &str) -> Result<TemplateSource> {
    let embedded = format!("app/{}", template);
    if BUILTIN_TEMPLATES.contains(&template) && TemplateSource::embedded_exists(&embedded) {
        return Ok(TemplateSource::Embedded(embedded));
    }

    let path = PathBuf::from(template);
    if path.is_dir() {
        return Ok(TemplateSource::Directory(path));
    }
    if path.is_file() && path.extension().is_some_and(|ext| ext == "zip") {
        return Ok(TemplateSource::Zip(path));
    }

    Err(Error::TemplateNotFound {
        name: template.to_string(),
    })
}

async fn ensure_empty_target(target: &Path) -> Result<()> {
    if !tokio::fs::try_exists(target).await? {
        return Ok(());
    }

    let not_empty = || Error::DirectoryNotEmpty {
        path: target.display().to_string(),
    };
    if !tokio::fs::metadata(target).await?.is_dir() {
        return Err(not_empty());
    }
    let mut entries = tokio::fs::read_dir(target).await?;
    if entries.next_entry().await?.is_some() {
        return Err(not_empty());
    }
    Ok(())
}

/// Scaffold a new app into `target`; the app name is the last path segment
pub async fn create_app(target: &Path, options: &AppOptions) -> Result<CreatedApp> {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    validate_app_name(&name)?;
    ensure_empty_target(target).await?;

    let source = resolve_template(&options.template)?;
    tokio::fs::create_dir_all(target).await?;

    let report = TemplateEngine::new(TokenSet::for_app(&name)).render(&source, target)?;
    debug!("Wrote {} template files", report.written.len());

    let mut project = if Project::is_jet_app(target) {
        Project::open(target).await?
    } else {
        Project::new(target, ProjectConfig::default())
    };

    let config = project.config_mut();
    config.generator_version = Some(env!("CARGO_PKG_VERSION").to_string());
    config.typescript = options.typescript;
    config
        .default_theme
        .get_or_insert_with(|| DEFAULT_THEME.to_string());
    config
        .default_browser
        .get_or_insert_with(|| DEFAULT_BROWSER.to_string());
    config
        .architecture
        .get_or_insert_with(|| ARCHITECTURE.to_string());
    if let Some(installer) = &options.installer {
        config.installer = Some(installer.clone());
    }
    project.save().await?;

    if options.typescript {
        convert_to_typescript(&project).await?;
    }

    info!("Created app '{}' at {}", name, target.display());
    Ok(CreatedApp {
        name,
        project,
        report,
    })
}

async fn convert_to_typescript(project: &Project) -> Result<()> {
    let source = &project.config().paths.source;
    let js_dir = project.source_dir().join(&source.javascript);
    let ts_dir = project.script_dir();

    if tokio::fs::try_exists(&js_dir).await? && !tokio::fs::try_exists(&ts_dir).await? {
        tokio::fs::rename(&js_dir, &ts_dir).await?;
    }
    tokio::fs::create_dir_all(&ts_dir).await?;

    tsconfig::write(&project.tsconfig_path(), &tsconfig::initial(project))?;
    Ok(())
}
