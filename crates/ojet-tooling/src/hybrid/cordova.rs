//! Cordova command wrapper

use super::config_xml::ConfigXml;
use crate::error::{Error, Result};
use crate::options::Platform;
use crate::process::{CommandSpec, ProcessRunner};
use ojet_core::{OjetSettings, Project};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Preferences written into a freshly created `config.xml`
pub const DEFAULT_PREFERENCES: [(&str, &str); 3] = [
    ("DisallowOverscroll", "true"),
    ("Orientation", "default"),
    ("AndroidXEnabled", "true"),
];

/// What `list` enumerates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Platform,
    Plugin,
}

impl ListKind {
    fn subcommand(self) -> &'static str {
        match self {
            ListKind::Platform => "platform",
            ListKind::Plugin => "plugin",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// Drives the `cordova` CLI inside the project's hybrid directory
pub struct HybridWrapper {
    runner: Arc<dyn ProcessRunner>,
    cordova: String,
}

impl HybridWrapper {
    pub fn new(runner: Arc<dyn ProcessRunner>, cordova: impl Into<String>) -> Self {
        Self {
            runner,
            cordova: cordova.into(),
        }
    }

    pub fn from_settings(runner: Arc<dyn ProcessRunner>, settings: &OjetSettings) -> Self {
        Self::new(runner, &settings.tooling.cordova)
    }

    fn cordova(&self, project: &Project) -> CommandSpec {
        CommandSpec::new(&self.cordova).current_dir(project.hybrid_dir())
    }

    fn ensure_hybrid(project: &Project) -> Result<()> {
        if project.is_hybrid() {
            Ok(())
        } else {
            Err(Error::NotHybrid)
        }
    }

    fn hybrid_platforms(platforms: &[Platform], operation: &str) -> Result<()> {
        match platforms.iter().find(|p| !p.is_hybrid()) {
            Some(p) => Err(Error::UnsupportedPlatform {
                platform: p.to_string(),
                operation: operation.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn config_xml_path(project: &Project) -> PathBuf {
        project.hybrid_dir().join("config.xml")
    }

    /// `add hybrid`: create the Cordova project, patch config.xml, and add platforms
    pub async fn add_hybrid(
        &self,
        project: &mut Project,
        app_id: &str,
        app_name: &str,
        platforms: &[Platform],
    ) -> Result<()> {
        let hybrid_dir = project.hybrid_dir();
        if project.is_hybrid() {
            return Err(Error::AlreadyHybrid {
                path: hybrid_dir.display().to_string(),
            });
        }
        Self::hybrid_platforms(platforms, "add hybrid")?;

        let create = CommandSpec::new(&self.cordova)
            .args(["create"])
            .arg(hybrid_dir.display().to_string())
            .arg(app_id)
            .arg(app_name)
            .current_dir(project.root());
        info!("Creating Cordova project in {}", hybrid_dir.display());
        self.runner.run(&create).await?;

        let config_path = Self::config_xml_path(project);
        let mut config = ConfigXml::load(&config_path).await?;
        config.set_widget_id(app_id);
        config.set_name(app_name);
        config.ensure_content_src("index.html");
        for (name, value) in DEFAULT_PREFERENCES {
            config.set_preference(name, value);
        }
        config.save(&config_path).await?;
        debug!("Patched {}", config_path.display());

        tokio::fs::create_dir_all(hybrid_dir.join("www")).await?;

        if !platforms.is_empty() {
            self.add_platforms(project, platforms).await?;
        }

        if project.config().default_platform.is_none() {
            if let Some(first) = platforms.first() {
                project.config_mut().default_platform = Some(first.to_string());
            }
        }
        project.save().await?;
        Ok(())
    }

    /// `add platform <name>...`
    pub async fn add_platforms(&self, project: &Project, platforms: &[Platform]) -> Result<()> {
        Self::ensure_hybrid(project)?;
        Self::hybrid_platforms(platforms, "add platform")?;
        let spec = self
            .cordova(project)
            .args(["platform", "add"])
            .args(platforms.iter().map(|p| p.to_string()));
        info!("Adding platforms: {}", join(platforms));
        self.runner.run(&spec).await
    }

    /// `remove platform <name>...`
    pub async fn remove_platforms(&self, project: &Project, platforms: &[Platform]) -> Result<()> {
        Self::ensure_hybrid(project)?;
        Self::hybrid_platforms(platforms, "remove platform")?;
        let spec = self
            .cordova(project)
            .args(["platform", "remove"])
            .args(platforms.iter().map(|p| p.to_string()));
        info!("Removing platforms: {}", join(platforms));
        self.runner.run(&spec).await
    }

    /// `add plugin <id>...`
    pub async fn add_plugins(&self, project: &Project, plugins: &[String]) -> Result<()> {
        Self::ensure_hybrid(project)?;
        let spec = self
            .cordova(project)
            .args(["plugin", "add"])
            .args(plugins.iter().cloned());
        self.runner.run(&spec).await
    }

    /// `remove plugin <id>...`
    pub async fn remove_plugins(&self, project: &Project, plugins: &[String]) -> Result<()> {
        Self::ensure_hybrid(project)?;
        let spec = self
            .cordova(project)
            .args(["plugin", "remove"])
            .args(plugins.iter().cloned());
        self.runner.run(&spec).await
    }

    /// Installed platforms or plugins, one entry per non-empty output line
    pub async fn list(&self, project: &Project, kind: ListKind) -> Result<Vec<String>> {
        Self::ensure_hybrid(project)?;
        let spec = self.cordova(project).args([kind.subcommand(), "list"]);
        let output = self.runner.output(&spec).await?;
        Ok(parse_list(&output.stdout, kind))
    }

    /// `clean platform <name>`
    pub async fn clean(&self, project: &Project, platform: Platform) -> Result<()> {
        Self::ensure_hybrid(project)?;
        Self::hybrid_platforms(&[platform], "clean")?;
        let spec = self.cordova(project).arg("clean").arg(platform.to_string());
        self.runner.run(&spec).await
    }

    /// `cordova prepare`, used by `restore` to reinstall platforms and plugins
    pub async fn prepare(&self, project: &Project) -> Result<()> {
        Self::ensure_hybrid(project)?;
        let spec = self.cordova(project).arg("prepare");
        info!("Restoring Cordova platforms and plugins");
        self.runner.run(&spec).await
    }
}

fn join(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Keep the installed section of `cordova platform|plugin list` output
fn parse_list(stdout: &str, kind: ListKind) -> Vec<String> {
    let mut entries = Vec::new();
    for line in stdout.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if kind == ListKind::Platform && line.starts_with("Available platforms") {
            break;
        }
        if line.ends_with(':') {
            continue;
        }
        entries.push(line.to_string());
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_list() {
        let stdout = "Installed platforms:\n  android 12.0.1\n  ios 7.1.0\nAvailable platforms: \n  browser ^7.0.0\n";
        assert_eq!(
            parse_list(stdout, ListKind::Platform),
            vec!["android 12.0.1", "ios 7.1.0"]
        );
    }

    #[test]
    fn test_parse_plugin_list() {
        let stdout = "cordova-plugin-device 2.1.0 \"Device\"\n\ncordova-plugin-camera 7.0.0 \"Camera\"\n";
        assert_eq!(parse_list(stdout, ListKind::Plugin).len(), 2);
    }
}
