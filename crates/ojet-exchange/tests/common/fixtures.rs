//! On-disk fixtures: scratch projects and zipped components

use ojet_core::{ComponentJson, Project};
use ojet_exchange::archive;
use ojet_exchange::{ComponentInstaller, ConflictResolver, ExchangeClient};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Marker written into every fixture bundle so tests can tell versions apart
pub const VERSION_FILE: &str = "version.txt";

/// Build a zip bundle for `name@version` in memory
pub fn zip_component(name: &str, version: &str) -> Vec<u8> {
    let temp = TempDir::new().unwrap();
    ComponentJson::new(name, version).save(temp.path()).unwrap();
    std::fs::write(temp.path().join("loader.js"), "define([], function () {});").unwrap();
    std::fs::write(temp.path().join(VERSION_FILE), version).unwrap();
    archive::pack_dir(temp.path()).unwrap()
}

/// A scratch JET app whose `exchange-url` points at `exchange_url`
pub async fn new_project(exchange_url: Option<&str>) -> (TempDir, Project) {
    let temp = TempDir::new().unwrap();
    let config = match exchange_url {
        Some(url) => serde_json::json!({ "exchange-url": url }),
        None => serde_json::json!({}),
    };
    std::fs::write(
        temp.path().join("oraclejetconfig.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    let project = Project::open(temp.path()).await.unwrap();
    (temp, project)
}

/// Pretend `name@version` is already installed from the exchange
pub fn install_locally(project: &Project, name: &str, version: &str) {
    let dir = project.exchange_components_dir().join(name);
    std::fs::create_dir_all(&dir).unwrap();
    ComponentJson::new(name, version).save(&dir).unwrap();
    std::fs::write(dir.join(VERSION_FILE), version).unwrap();
}

pub fn installed_version(project: &Project, name: &str) -> Option<String> {
    let dir = project.exchange_components_dir().join(name);
    ComponentJson::load(&dir).ok().map(|c| c.version)
}

pub fn component_dir_exists(project: &Project, name: &str) -> bool {
    project.exchange_components_dir().join(name).is_dir()
}

/// Installer wired to the project's configured exchange
pub fn installer(project: Project, resolver: Box<dyn ConflictResolver>) -> ComponentInstaller {
    let client = project
        .config()
        .exchange_url
        .as_deref()
        .map(|url| ExchangeClient::new(url, Duration::from_secs(5)).unwrap());
    ComponentInstaller::new(project, client, resolver)
}

pub fn read_config(root: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(root.join("oraclejetconfig.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}
