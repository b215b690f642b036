//! Error types for ojet-core

use thiserror::Error;

/// Result type alias using ojet-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for ojet
#[derive(Error, Debug)]
pub enum Error {
    /// The directory does not contain an oraclejetconfig.json
    #[error("Not a JET app: no oraclejetconfig.json found in {path}")]
    NotAJetApp { path: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid app, pack, or component name
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Name reserved by the HTML standard or the framework
    #[error("'{name}' is a reserved name and cannot be used")]
    ReservedName { name: String },

    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,
}

impl Error {
    /// Create a not-a-JET-app error
    pub fn not_a_jet_app(path: impl Into<String>) -> Self {
        Self::NotAJetApp { path: path.into() }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a reserved name error
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }
}
