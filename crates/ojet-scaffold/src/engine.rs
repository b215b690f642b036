//! Template tree copying with token substitution
//!
//! Handles:
//! - Template trees embedded in the binary, on disk, or in a zip file
//! - Token substitution in relative paths and UTF-8 file contents
//! - Verbatim copies of binary files
//! - Per-call overwrite policy for files that already exist

use crate::error::{Error, Result};
use crate::tokens::TokenSet;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Built-in templates
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct Templates;

/// Where a template tree comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Subtree of the built-in templates, e.g. `app/blank`
    Embedded(String),
    Directory(PathBuf),
    Zip(PathBuf),
}

impl TemplateSource {
    /// Check whether a built-in template tree exists
    pub fn embedded_exists(prefix: &str) -> bool {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        Templates::iter().any(|f| f.starts_with(&prefix))
    }
}

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    #[default]
    Skip,
    Replace,
}

/// Files touched by one copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Copies template trees into a destination directory
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    tokens: TokenSet,
    overwrite: Overwrite,
}

impl TemplateEngine {
    pub fn new(tokens: TokenSet) -> Self {
        Self {
            tokens,
            overwrite: Overwrite::default(),
        }
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Copy a whole template tree into `dest`
    pub fn render(&self, source: &TemplateSource, dest: &Path) -> Result<CopyReport> {
        debug!("Rendering template {:?} into {}", source, dest.display());
        let mut report = CopyReport::default();

        match source {
            TemplateSource::Embedded(prefix) => self.copy_embedded(prefix, dest, &mut report)?,
            TemplateSource::Directory(dir) => self.copy_dir(dir, dest, &mut report)?,
            TemplateSource::Zip(file) => self.copy_zip(file, dest, &mut report)?,
        }

        Ok(report)
    }

    fn copy_embedded(&self, prefix: &str, dest: &Path, report: &mut CopyReport) -> Result<()> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let mut found = false;

        for file in Templates::iter() {
            let Some(rel) = file.strip_prefix(&prefix) else {
                continue;
            };
            if let Some(content) = Templates::get(&file) {
                found = true;
                self.write_file(Utf8Path::new(rel), &content.data, dest, report)?;
            }
        }

        if !found {
            return Err(Error::EmptyTemplate {
                name: prefix.trim_end_matches('/').to_string(),
            });
        }
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dest: &Path, report: &mut CopyReport) -> Result<()> {
        if !src.is_dir() {
            return Err(Error::TemplateNotFound {
                name: src.display().to_string(),
            });
        }

        for entry in WalkDir::new(src).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(src) else {
                continue;
            };
            let Some(rel) = Utf8Path::from_path(rel) else {
                warn!("Skipping non UTF-8 template path {}", rel.display());
                continue;
            };
            let bytes = std::fs::read(entry.path())?;
            self.write_file(rel, &bytes, dest, report)?;
        }
        Ok(())
    }

    fn copy_zip(&self, file: &Path, dest: &Path, report: &mut CopyReport) -> Result<()> {
        let reader = File::open(file).map_err(|_| Error::TemplateNotFound {
            name: file.display().to_string(),
        })?;
        let mut archive = ZipArchive::new(reader)?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let Some(rel) = entry.enclosed_name() else {
                warn!("Skipping unsafe zip entry {}", entry.name());
                continue;
            };
            let Ok(rel) = Utf8PathBuf::from_path_buf(rel) else {
                continue;
            };
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            self.write_file(&rel, &bytes, dest, report)?;
        }
        Ok(())
    }

    fn write_file(
        &self,
        rel: &Utf8Path,
        bytes: &[u8],
        dest: &Path,
        report: &mut CopyReport,
    ) -> Result<()> {
        let target = dest.join(self.tokens.apply(rel.as_str()));

        if target.exists() && self.overwrite == Overwrite::Skip {
            debug!("Keeping existing {}", target.display());
            report.skipped.push(target);
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match std::str::from_utf8(bytes) {
            Ok(text) => std::fs::write(&target, self.tokens.apply(text))?,
            Err(_) => std::fs::write(&target, bytes)?,
        }

        report.written.push(target);
        Ok(())
    }
}
