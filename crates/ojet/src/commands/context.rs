//! Shared state for command handlers

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Password};
use ojet_core::{OjetSettings, Project, ProjectConfig, SettingsLoader};
use ojet_exchange::{Credentials, ExchangeClient};
use ojet_tooling::{HybridWrapper, ProcessRunner, TokioProcessRunner};
use std::path::PathBuf;
use std::sync::Arc;

use crate::router::Invocation;

/// Settings, working directory, and process runner for one CLI run
pub struct Context {
    pub settings: OjetSettings,
    pub cwd: PathBuf,
    pub runner: Arc<dyn ProcessRunner>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let settings = SettingsLoader::new()
            .and_then(|loader| loader.load())
            .context("Failed to load ojet settings")?;
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self {
            settings,
            cwd,
            runner: Arc::new(TokioProcessRunner::new()),
        })
    }

    /// The JET app in the current directory
    pub async fn project(&self) -> Result<Project> {
        Ok(Project::open(&self.cwd).await?)
    }

    /// The current app if there is one, otherwise an empty stand-in
    pub async fn project_or_default(&self) -> Result<Project> {
        if Project::is_jet_app(&self.cwd) {
            self.project().await
        } else {
            Ok(Project::new(&self.cwd, ProjectConfig::default()))
        }
    }

    /// Exchange client configured by the project or user settings
    pub fn exchange_client(&self, project: &Project) -> Result<Option<ExchangeClient>> {
        Ok(ExchangeClient::from_config(project, &self.settings)?)
    }

    /// Like [`Self::exchange_client`] but a missing URL is an error
    pub fn require_exchange_client(&self, project: &Project) -> Result<ExchangeClient> {
        match self.exchange_client(project)? {
            Some(client) => Ok(client),
            None => Err(ojet_exchange::Error::ExchangeUrlNotConfigured.into()),
        }
    }

    pub fn hybrid(&self) -> HybridWrapper {
        HybridWrapper::from_settings(self.runner.clone(), &self.settings)
    }

    /// npm or yarn, from the option, the project, then user settings
    pub fn installer(&self, project: Option<&Project>, inv: &Invocation) -> String {
        inv.option("installer")
            .map(str::to_string)
            .or_else(|| project.and_then(|p| p.config().installer.clone()))
            .unwrap_or_else(|| self.settings.installer.clone())
    }

    /// Credentials from `--username`/`--password`, prompting for whatever is missing
    pub fn credentials(&self, inv: &Invocation) -> Result<Credentials> {
        let username = match inv.option("username") {
            Some(u) => u.to_string(),
            None => Input::<String>::new()
                .with_prompt("Exchange username")
                .interact_text()?,
        };
        let password = match inv.option("password") {
            Some(p) => p.to_string(),
            None => Password::new().with_prompt("Exchange password").interact()?,
        };
        if username.trim().is_empty() {
            bail!("Exchange username must not be empty");
        }
        Ok(Credentials { username, password })
    }
}
