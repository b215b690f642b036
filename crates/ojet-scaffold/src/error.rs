//! Error types for ojet-scaffold

use thiserror::Error;

/// Result type alias using ojet-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Target directory exists and has content
    #[error("Directory already exists and is not empty: {path}")]
    DirectoryNotEmpty { path: String },

    /// Component, pack, or theme directory already exists
    #[error("'{name}' already exists at {path}")]
    AlreadyExists { name: String, path: String },

    /// Pack referenced by `--pack` does not exist
    #[error("Pack '{name}' not found. Create it first with 'ojet create pack {name}'")]
    PackNotFound { name: String },

    /// Template is neither built in nor a readable directory or zip file
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Embedded template tree is empty
    #[error("Embedded template '{name}' has no files")]
    EmptyTemplate { name: String },

    /// Unknown `--type`
    #[error("Invalid component type '{value}'. Use composite or resource")]
    InvalidComponentType { value: String },

    /// Zip template error
    #[error("Template archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error(transparent)]
    Core(#[from] ojet_core::Error),
}

impl Error {
    pub fn already_exists(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::AlreadyExists {
            name: name.into(),
            path: path.into(),
        }
    }
}
