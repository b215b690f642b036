//! npm / yarn dependency installation

use crate::error::{Error, Result};
use crate::process::{CommandSpec, ProcessRunner};
use std::path::Path;
use tracing::info;

/// Package managers `create app` and `restore` know how to drive
pub const SUPPORTED_INSTALLERS: [&str; 2] = ["npm", "yarn"];

/// Command that installs the dependencies declared in `package.json`
pub fn install_command(project_root: &Path, installer: &str) -> Result<CommandSpec> {
    if !SUPPORTED_INSTALLERS.contains(&installer) {
        return Err(Error::invalid_option(
            "installer",
            installer,
            "expected npm or yarn",
        ));
    }
    Ok(CommandSpec::new(installer)
        .arg("install")
        .current_dir(project_root))
}

/// Run `npm install` or `yarn install` in `project_root`
pub async fn install_packages(
    runner: &dyn ProcessRunner,
    project_root: &Path,
    installer: &str,
) -> Result<()> {
    let spec = install_command(project_root, installer)?;
    info!("Installing packages with {}", installer);
    runner.run(&spec).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command() {
        let spec = install_command(Path::new("/tmp/app"), "yarn").unwrap();
        assert_eq!(spec.to_string(), "yarn install");
        assert_eq!(spec.cwd.as_deref(), Some(Path::new("/tmp/app")));
    }

    #[test]
    fn test_unknown_installer() {
        let err = install_command(Path::new("/tmp/app"), "pnpm").unwrap_err();
        assert!(err.to_string().contains("--installer"));
    }
}
