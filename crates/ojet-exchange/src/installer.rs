//! Dependency-aware component installation
//!
//! Components are installed one at a time. Each first-level request starts a
//! fresh [`ParentChain`] which is threaded through the recursion so a
//! component that (transitively) depends on itself is detected before its
//! archive is fetched a second time.

use crate::archive;
use crate::client::ExchangeClient;
use crate::error::{Error, Result};
use crate::ident::ComponentIdent;
use crate::resolver::{ConflictResolver, Decision};
use ojet_core::{ComponentJson, Project};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tracing::{debug, info, warn};

type InstallFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// Names of the components on the current install path, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentChain(Vec<String>);

impl ParentChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `a -> b -> <next>` for error messages
    pub fn describe(&self, next: &str) -> String {
        let mut parts: Vec<&str> = self.0.iter().map(String::as_str).collect();
        parts.push(next);
        parts.join(" -> ")
    }
}

/// A component that could not be installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedInstall {
    pub ident: String,
    pub error: String,
}

/// Summary of an `add` or `restore` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// `name@version` of every component written to disk
    pub installed: Vec<String>,
    /// Already installed at the requested version
    pub skipped: Vec<String>,
    /// Version conflicts resolved in favour of the local copy
    pub kept: Vec<String>,
    pub failed: Vec<FailedInstall>,
}

impl InstallReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Summary of a `remove` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveReport {
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
}

/// A row of `list component`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledComponent {
    pub name: String,
    /// Version from the installed `component.json`, `None` when missing on disk
    pub installed_version: Option<String>,
    /// Version recorded in `composites`, `None` for transitive dependencies
    pub declared_version: Option<String>,
    pub is_pack: bool,
}

/// Installs, removes and lists exchange components of one project
pub struct ComponentInstaller {
    project: Project,
    client: Option<ExchangeClient>,
    resolver: Box<dyn ConflictResolver>,
}

impl ComponentInstaller {
    pub fn new(
        project: Project,
        client: Option<ExchangeClient>,
        resolver: Box<dyn ConflictResolver>,
    ) -> Self {
        Self {
            project,
            client,
            resolver,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    fn client(&self) -> Result<ExchangeClient> {
        self.client.clone().ok_or(Error::ExchangeUrlNotConfigured)
    }

    fn component_dir(&self, name: &str) -> Result<PathBuf> {
        ComponentIdent::validate_name(name)?;
        Ok(self.project.exchange_components_dir().join(name))
    }

    /// Install the named components (`name` or `name@version`) and their dependencies
    pub async fn add(&mut self, names: &[String]) -> Result<InstallReport> {
        let idents = names
            .iter()
            .map(|n| ComponentIdent::parse(n))
            .collect::<Result<Vec<_>>>()?;

        let client = self.client()?;
        tokio::fs::create_dir_all(self.project.exchange_components_dir()).await?;

        let mut report = InstallReport::default();
        for ident in &idents {
            self.install_first_level(&client, ident, &mut report)
                .await?;
        }
        Ok(report)
    }

    /// Reinstall every declared component whose directory is missing
    pub async fn restore(&mut self) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        let mut missing = Vec::new();
        for (name, version) in &self.project.config().composites {
            if !tokio::fs::try_exists(self.component_dir(name)?).await? {
                missing.push(ComponentIdent::pinned(name, version));
            }
        }

        if missing.is_empty() {
            debug!("All declared exchange components are present");
            return Ok(report);
        }

        let client = self.client()?;
        tokio::fs::create_dir_all(self.project.exchange_components_dir()).await?;
        for ident in &missing {
            self.install_first_level(&client, ident, &mut report)
                .await?;
        }
        Ok(report)
    }

    async fn install_first_level(
        &mut self,
        client: &ExchangeClient,
        ident: &ComponentIdent,
        report: &mut InstallReport,
    ) -> Result<()> {
        let mut chain = ParentChain::new();
        match self.install(client, ident, true, &mut chain, report).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Failed to install {}: {}", ident, e);
                report.failed.push(FailedInstall {
                    ident: ident.to_string(),
                    error: e.to_string(),
                });
                Ok(())
            }
        }
    }

    fn install<'a>(
        &'a mut self,
        client: &'a ExchangeClient,
        ident: &'a ComponentIdent,
        first_level: bool,
        chain: &'a mut ParentChain,
        report: &'a mut InstallReport,
    ) -> InstallFuture<'a> {
        Box::pin(async move {
            let name = ident.name.as_str();

            if !first_level && chain.contains(name) {
                return Err(Error::circular_dependency(name, chain.describe(name)));
            }

            let dir = self.component_dir(name)?;
            let present = tokio::fs::try_exists(&dir).await?;
            let metadata = client
                .component_metadata(name, ident.version.as_deref())
                .await?;

            let unconditional = (first_level && ident.is_pinned()) || !present;
            if !unconditional {
                let local = ComponentJson::load_async(&dir)
                    .await
                    .ok()
                    .map(|c| c.version);

                match local {
                    Some(local) if local == metadata.version => {
                        info!("Component '{}' {} is already installed", name, local);
                        report.skipped.push(format!("{}@{}", name, local));
                        if first_level {
                            self.record(name, &local).await?;
                        }
                        return Ok(());
                    }
                    Some(local) => {
                        match self.resolver.resolve(name, &local, &metadata.version)? {
                            Decision::KeepLocal => {
                                info!("Keeping installed '{}' {}", name, local);
                                report.kept.push(format!("{}@{}", name, local));
                                if first_level {
                                    self.record(name, &local).await?;
                                }
                                return Ok(());
                            }
                            Decision::Overwrite => {
                                debug!("Overwriting '{}' {} with {}", name, local, metadata.version)
                            }
                            Decision::Cancel => {
                                return Err(Error::InstallCancelled {
                                    name: name.to_string(),
                                })
                            }
                        }
                    }
                    None => debug!("No readable component.json in {}, reinstalling", dir.display()),
                }
            }

            let bytes = client.download_archive(&metadata.code_url).await?;
            archive::replace_dir_with_archive(bytes, dir).await?;
            info!("Installed component '{}' {}", name, metadata.version);
            report
                .installed
                .push(format!("{}@{}", name, metadata.version));

            if first_level {
                self.record(name, &metadata.version).await?;
            }

            let dependencies = client.dependencies(name, &metadata.version).await?;
            let idents = dependencies.idents()?;
            if idents.is_empty() {
                return Ok(());
            }

            chain.push(name);
            for dep in &idents {
                if let Err(e) = self.install(client, dep, false, chain, report).await {
                    if e.is_fatal() {
                        chain.pop();
                        return Err(e);
                    }
                    warn!("Failed to install dependency {} of '{}': {}", dep, name, e);
                    report.failed.push(FailedInstall {
                        ident: dep.to_string(),
                        error: e.to_string(),
                    });
                }
            }
            chain.pop();

            Ok(())
        })
    }

    async fn record(&mut self, name: &str, version: &str) -> Result<()> {
        let composites = &mut self.project.config_mut().composites;
        if composites.get(name).map(String::as_str) == Some(version) {
            return Ok(());
        }
        composites.insert(name.to_string(), version.to_string());
        self.project.save().await?;
        Ok(())
    }

    /// Delete installed components and their `composites` entries
    pub async fn remove(&mut self, names: &[String]) -> Result<RemoveReport> {
        let mut report = RemoveReport::default();
        let mut changed = false;

        for raw in names {
            let name = ComponentIdent::parse(raw)?.name;
            let mut found = false;

            if self.project.config_mut().composites.remove(&name).is_some() {
                changed = true;
                found = true;
            }

            for dir in [self.component_dir(&name)?, self.project.components_dir().join(&name)] {
                if tokio::fs::try_exists(&dir).await? {
                    tokio::fs::remove_dir_all(&dir).await?;
                    debug!("Removed {}", dir.display());
                    found = true;
                }
            }

            if found {
                info!("Removed component '{}'", name);
                report.removed.push(name);
            } else {
                warn!("Component '{}' is not installed", name);
                report.not_found.push(name);
            }
        }

        if changed {
            self.project.save().await?;
        }
        Ok(report)
    }

    /// Installed and declared exchange components, sorted by name
    pub async fn list(&self) -> Result<Vec<InstalledComponent>> {
        let composites = &self.project.config().composites;
        let mut rows = Vec::new();

        let root = self.project.exchange_components_dir();
        if tokio::fs::try_exists(&root).await? {
            let mut entries = tokio::fs::read_dir(&root).await?;
            while let Some(entry) = entries.next_entry().await? {
                if !entry.file_type().await?.is_dir() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                let component = ComponentJson::load_async(&entry.path()).await.ok();
                rows.push(InstalledComponent {
                    declared_version: composites.get(&name).cloned(),
                    installed_version: component.as_ref().map(|c| c.version.clone()),
                    is_pack: component.as_ref().is_some_and(ComponentJson::is_pack),
                    name,
                });
            }
        }

        for (name, version) in composites {
            if !rows.iter().any(|r| &r.name == name) {
                rows.push(InstalledComponent {
                    name: name.clone(),
                    installed_version: None,
                    declared_version: Some(version.clone()),
                    is_pack: false,
                });
            }
        }

        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
