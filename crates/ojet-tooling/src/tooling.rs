//! Delegation of `build` and `serve` to the external tooling package

use crate::error::{Error, Result};
use crate::options::{BuildConfig, RawOptions, ServeConfig};
use crate::process::{CommandSpec, ProcessRunner};
use async_trait::async_trait;
use ojet_core::{OjetSettings, Project};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable carrying the tooling package name into the node script
pub const ENV_PACKAGE: &str = "OJET_TOOLING_PACKAGE";
/// Environment variable carrying the task (`build` or `serve`)
pub const ENV_TASK: &str = "OJET_TOOLING_TASK";
/// Environment variable carrying the JSON-serialized options
pub const ENV_OPTIONS: &str = "OJET_TOOLING_OPTIONS";

const NODE_SCRIPT: &str = r#"
const tooling = require(process.env.OJET_TOOLING_PACKAGE);
const task = process.env.OJET_TOOLING_TASK;
const options = JSON.parse(process.env.OJET_TOOLING_OPTIONS);
Promise.resolve(tooling[task](options.platform, options)).catch((err) => {
  console.error(err && err.message ? err.message : err);
  process.exit(1);
});
"#;

/// Performs the actual compilation and dev-server work
#[async_trait]
pub trait ToolingBackend: Send + Sync {
    async fn build(&self, project_root: &Path, config: &BuildConfig) -> Result<()>;
    async fn serve(&self, project_root: &Path, config: &ServeConfig) -> Result<()>;
}

/// Runs the configured npm tooling package through `node`
pub struct NodeTooling {
    runner: Arc<dyn ProcessRunner>,
    node: String,
    package: String,
}

impl NodeTooling {
    pub fn new(runner: Arc<dyn ProcessRunner>, node: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            runner,
            node: node.into(),
            package: package.into(),
        }
    }

    pub fn from_settings(runner: Arc<dyn ProcessRunner>, settings: &OjetSettings) -> Self {
        Self::new(runner, &settings.tooling.node, &settings.tooling.package)
    }

    /// Command that runs `task` with `options` in `project_root`
    pub fn command<T: serde::Serialize>(
        &self,
        project_root: &Path,
        task: &str,
        options: &T,
    ) -> Result<CommandSpec> {
        Ok(CommandSpec::new(&self.node)
            .args(["-e", NODE_SCRIPT])
            .current_dir(project_root)
            .env(ENV_PACKAGE, &self.package)
            .env(ENV_TASK, task)
            .env(ENV_OPTIONS, serde_json::to_string(options)?))
    }

    async fn ensure_installed(&self, project_root: &Path) -> Result<()> {
        let package_dir = self
            .package
            .split('/')
            .fold(project_root.join("node_modules"), |dir, part| dir.join(part));
        if !tokio::fs::try_exists(&package_dir).await? {
            return Err(Error::ToolingNotInstalled {
                package: self.package.clone(),
            });
        }
        Ok(())
    }

    async fn invoke<T: serde::Serialize + Sync>(
        &self,
        project_root: &Path,
        task: &str,
        options: &T,
    ) -> Result<()> {
        self.ensure_installed(project_root).await?;
        let spec = self.command(project_root, task, options)?;
        debug!("Delegating '{}' to {}", task, self.package);
        self.runner.run(&spec).await
    }
}

#[async_trait]
impl ToolingBackend for NodeTooling {
    async fn build(&self, project_root: &Path, config: &BuildConfig) -> Result<()> {
        self.invoke(project_root, "build", config).await
    }

    async fn serve(&self, project_root: &Path, config: &ServeConfig) -> Result<()> {
        self.invoke(project_root, "serve", config).await
    }
}

/// Normalizes options and forwards them to a [`ToolingBackend`]
pub struct BuildServeDelegate {
    backend: Box<dyn ToolingBackend>,
}

impl BuildServeDelegate {
    pub fn new(backend: Box<dyn ToolingBackend>) -> Self {
        Self { backend }
    }

    /// `build app` / `build component <name>`
    pub async fn build(
        &self,
        project: &Project,
        component: Option<String>,
        options: &RawOptions,
    ) -> Result<BuildConfig> {
        let config = BuildConfig::from_options(project, component, options)?;
        info!(
            "Building for {} ({:?})",
            config.platform, config.build_type
        );
        self.backend.build(project.root(), &config).await?;
        Ok(config)
    }

    pub async fn serve(&self, project: &Project, options: &RawOptions) -> Result<ServeConfig> {
        let config = ServeConfig::from_options(project, options)?;
        info!(
            "Serving {} on port {}",
            config.build.platform, config.server_port
        );
        self.backend.serve(project.root(), &config).await?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::CommandOutput;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<CommandSpec>>);

    #[async_trait]
    impl ProcessRunner for Recorder {
        async fn run(&self, spec: &CommandSpec) -> Result<()> {
            self.0.lock().unwrap().push(spec.clone());
            Ok(())
        }

        async fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            self.run(spec).await?;
            Ok(CommandOutput::default())
        }
    }

    #[tokio::test]
    async fn test_node_tooling_requires_installed_package() {
        let temp = TempDir::new().unwrap();
        let tooling = NodeTooling::new(Arc::new(Recorder::default()), "node", "@oracle/oraclejet-tooling");
        let err = tooling
            .build(temp.path(), &BuildConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolingNotInstalled { .. }));
    }

    #[tokio::test]
    async fn test_node_tooling_passes_options_as_json() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("node_modules/@oracle/oraclejet-tooling")).unwrap();

        let recorder = Arc::new(Recorder::default());
        let tooling = NodeTooling::new(recorder.clone(), "node", "@oracle/oraclejet-tooling");
        tooling
            .build(temp.path(), &BuildConfig::default())
            .await
            .unwrap();

        let specs = recorder.0.lock().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].program, "node");
        assert_eq!(specs[0].cwd.as_deref(), Some(temp.path()));
        assert_eq!(specs[0].env[ENV_TASK], "build");
        let options: serde_json::Value = serde_json::from_str(&specs[0].env[ENV_OPTIONS]).unwrap();
        assert_eq!(options["buildType"], "dev");
    }
}
