//! Integration tests for build/serve delegation, package installs, and staging cleanup

mod common;

use async_trait::async_trait;
use common::*;
use ojet_tooling::staging::{clean_staging, strip};
use ojet_tooling::tooling::{ENV_OPTIONS, ENV_PACKAGE, ENV_TASK};
use ojet_tooling::{
    install_packages, BuildConfig, BuildServeDelegate, BuildType, Error, NodeTooling, Platform,
    RawOptions, Result, ServeConfig, ToolingBackend,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

const TOOLING: &str = "@oracle/oraclejet-tooling";

#[derive(Clone, Default)]
struct CapturingBackend {
    builds: Arc<Mutex<Vec<BuildConfig>>>,
    serves: Arc<Mutex<Vec<ServeConfig>>>,
}

#[async_trait]
impl ToolingBackend for CapturingBackend {
    async fn build(&self, _root: &Path, config: &BuildConfig) -> Result<()> {
        self.builds.lock().unwrap().push(config.clone());
        Ok(())
    }

    async fn serve(&self, _root: &Path, config: &ServeConfig) -> Result<()> {
        self.serves.lock().unwrap().push(config.clone());
        Ok(())
    }
}

fn options(pairs: &[(&str, &str)]) -> RawOptions {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_build_forwards_normalized_config() {
    let (_temp, project) = new_project().await;
    let backend = CapturingBackend::default();
    let delegate = BuildServeDelegate::new(Box::new(backend.clone()));

    let config = delegate
        .build(
            &project,
            Some("demo-card".into()),
            &options(&[("release", "true"), ("themes", "a,b")]),
        )
        .await
        .unwrap();

    assert_eq!(config.build_type, BuildType::Release);
    assert_eq!(config.component.as_deref(), Some("demo-card"));
    assert_eq!(backend.builds.lock().unwrap().as_slice(), &[config]);
}

#[tokio::test]
async fn test_invalid_options_never_reach_backend() {
    let (_temp, project) = new_project().await;
    let backend = CapturingBackend::default();
    let delegate = BuildServeDelegate::new(Box::new(backend.clone()));

    let err = delegate
        .serve(&project, &options(&[("server-port", "abc")]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOption { .. }));
    assert!(backend.serves.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_node_tooling_serve_handoff() {
    let (_temp, project) = new_project().await;
    install_tooling(&project, TOOLING);
    let runner = shared(RecordingRunner::new());
    let delegate = BuildServeDelegate::new(Box::new(NodeTooling::new(
        runner.clone(),
        "node",
        TOOLING,
    )));

    delegate
        .serve(
            &project,
            &options(&[("platform", "android"), ("server-port", "9000")]),
        )
        .await
        .unwrap();

    let invocations = runner.invocations();
    assert_eq!(invocations.len(), 1);
    let spec = &invocations[0];
    assert_eq!(spec.program, "node");
    assert_eq!(spec.args[0], "-e");
    assert_eq!(spec.env[ENV_PACKAGE], TOOLING);
    assert_eq!(spec.env[ENV_TASK], "serve");

    let handoff: serde_json::Value = serde_json::from_str(&spec.env[ENV_OPTIONS]).unwrap();
    assert_eq!(handoff["platform"], "android");
    assert_eq!(handoff["serverPort"], 9000);
    assert_eq!(handoff["theme"]["name"], "redwood");
}

#[tokio::test]
async fn test_tooling_failure_propagates() {
    let (_temp, project) = new_project().await;
    install_tooling(&project, TOOLING);
    let runner = shared(RecordingRunner::new());
    runner.mock_failure("node", "Build failed", 1);
    let delegate = BuildServeDelegate::new(Box::new(NodeTooling::new(
        runner.clone(),
        "node",
        TOOLING,
    )));

    let err = delegate
        .build(&project, None, &RawOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::CommandFailed { code: Some(1), .. }));
}

#[tokio::test]
async fn test_install_packages_runs_in_project_root() {
    let (_temp, project) = new_project().await;
    let runner = RecordingRunner::new();

    install_packages(&runner, project.root(), "npm").await.unwrap();

    let invocations = runner.invocations();
    assert_eq!(invocations[0].command_line(), "npm install");
    assert_eq!(invocations[0].cwd.as_deref(), Some(project.root()));
}

#[tokio::test]
async fn test_clean_and_strip() {
    let (_temp, project) = new_project().await;
    std::fs::create_dir_all(project.staging_web_dir().join("css")).unwrap();
    std::fs::create_dir_all(project.exchange_components_dir().join("demo-a")).unwrap();

    assert!(clean_staging(&project).await.unwrap());
    let removed = strip(&project).await.unwrap();
    assert_eq!(removed, vec!["jet_components"]);
    assert!(project.config_path().is_file());
}

#[test]
fn test_platform_parse_is_case_insensitive() {
    assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
}
