//! Scratch project fixtures

use ojet_core::{Project, ProjectConfig};
use ojet_tooling::CommandSpec;
use tempfile::TempDir;

pub const CORDOVA_CONFIG_XML: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="io.cordova.hellocordova" version="1.0.0" xmlns="http://www.w3.org/ns/widgets">
    <name>HelloCordova</name>
    <content src="index.html" />
</widget>
"#;

/// Saved project in a fresh temp directory
pub async fn new_project() -> (TempDir, Project) {
    let temp = TempDir::new().unwrap();
    let mut config = ProjectConfig::default();
    config.default_theme = Some("redwood".into());
    let project = Project::new(temp.path(), config);
    project.save().await.unwrap();
    (temp, project)
}

/// Project that already has a Cordova project
pub async fn new_hybrid_project() -> (TempDir, Project) {
    let (temp, project) = new_project().await;
    std::fs::create_dir_all(project.hybrid_dir()).unwrap();
    std::fs::write(project.hybrid_dir().join("config.xml"), CORDOVA_CONFIG_XML).unwrap();
    (temp, project)
}

/// Hook that writes the config.xml `cordova create <dir> ...` would produce
pub fn fake_cordova_create(spec: &CommandSpec) {
    if spec.args.first().map(String::as_str) == Some("create") {
        let dir = std::path::Path::new(&spec.args[1]);
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("config.xml"), CORDOVA_CONFIG_XML).unwrap();
    }
}

/// Pretend the tooling package is installed
pub fn install_tooling(project: &Project, package: &str) {
    std::fs::create_dir_all(project.root().join("node_modules").join(package)).unwrap();
}
