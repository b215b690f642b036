//! Zip packing and unpacking of component bundles

use crate::error::Result;
use ojet_core::ComponentJson;
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Extract a zip bundle held in memory into `dest`
pub fn unpack(bytes: &[u8], dest: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    debug!("Extracting {} entries into {}", archive.len(), dest.display());
    archive.extract(dest)?;
    Ok(())
}

/// Replace `dest` with the contents of a zip bundle.
///
/// An existing directory is removed first so files dropped in the new
/// version do not linger.
pub async fn replace_dir_with_archive(bytes: Vec<u8>, dest: PathBuf) -> Result<()> {
    if tokio::fs::try_exists(&dest).await? {
        tokio::fs::remove_dir_all(&dest).await?;
    }
    tokio::fs::create_dir_all(&dest).await?;

    tokio::task::spawn_blocking(move || unpack(&bytes, &dest))
        .await
        .map_err(std::io::Error::other)?
}

/// Zip a directory tree into memory; entry names are relative to `src`
pub fn pack_dir(src: &Path) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut buffer = Vec::new();

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = match entry.path().strip_prefix(src) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            writer.add_directory(format!("{}/", name), options)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options)?;
            buffer.clear();
            File::open(entry.path())?.read_to_end(&mut buffer)?;
            writer.write_all(&buffer)?;
        }
    }

    Ok(writer.finish()?.into_inner())
}

/// `<name>_<version with dots replaced by dashes>.zip`
pub fn package_file_name(name: &str, version: &str) -> String {
    format!("{}_{}.zip", name, version.replace('.', "-"))
}

/// Zip a component or pack directory into `out_dir` and return the archive path
pub async fn package(component_dir: &Path, out_dir: &Path) -> Result<PathBuf> {
    let component = ComponentJson::load_async(component_dir).await?;
    let file_name = package_file_name(&component.full_name(), &component.version);

    let src = component_dir.to_path_buf();
    let bytes = tokio::task::spawn_blocking(move || pack_dir(&src))
        .await
        .map_err(std::io::Error::other)??;

    tokio::fs::create_dir_all(out_dir).await?;
    let path = out_dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    debug!("Wrote package {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_component(dir: &Path) {
        std::fs::create_dir_all(dir.join("resources/nls")).unwrap();
        std::fs::write(
            dir.join("component.json"),
            r#"{"name": "demo-card", "version": "1.2.0"}"#,
        )
        .unwrap();
        std::fs::write(dir.join("loader.js"), "define([], function () {});").unwrap();
        std::fs::write(dir.join("resources/nls/strings.js"), "define({});").unwrap();
    }

    #[test]
    fn test_package_file_name() {
        assert_eq!(package_file_name("demo-card", "1.2.0"), "demo-card_1-2-0.zip");
    }

    #[test]
    fn test_pack_then_unpack_preserves_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write_component(&src);

        let bytes = pack_dir(&src).unwrap();
        let dest = temp.path().join("dest");
        std::fs::create_dir_all(&dest).unwrap();
        unpack(&bytes, &dest).unwrap();

        assert!(dest.join("component.json").is_file());
        assert_eq!(
            std::fs::read_to_string(dest.join("resources/nls/strings.js")).unwrap(),
            "define({});"
        );
    }

    #[tokio::test]
    async fn test_replace_dir_removes_stale_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write_component(&src);
        let bytes = pack_dir(&src).unwrap();

        let dest = temp.path().join("installed");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("stale.js"), "old").unwrap();

        replace_dir_with_archive(bytes, dest.clone()).await.unwrap();
        assert!(!dest.join("stale.js").exists());
        assert!(dest.join("loader.js").is_file());
    }

    #[tokio::test]
    async fn test_package_writes_named_zip() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("demo-card");
        write_component(&src);

        let path = package(&src, &temp.path().join("dist")).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "demo-card_1-2-0.zip");
        assert!(path.is_file());
    }
}
