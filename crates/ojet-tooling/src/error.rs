//! Error types for ojet-tooling

use thiserror::Error;

/// Result type alias using ojet-tooling's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Tooling error types
#[derive(Error, Debug)]
pub enum Error {
    /// Executable could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Child process exited unsuccessfully
    #[error("Command '{command}' failed with exit code {}{}", exit_code_text(.code), stderr_text(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Option value rejected during normalization
    #[error("Invalid value '{value}' for option --{option}: {reason}")]
    InvalidOption {
        option: String,
        value: String,
        reason: String,
    },

    /// Tooling package missing from node_modules
    #[error("Tooling package '{package}' is not installed. Run 'ojet restore' first")]
    ToolingNotInstalled { package: String },

    /// Hybrid command on a web-only app
    #[error("This app has no hybrid (Cordova) project. Run 'ojet add hybrid' first")]
    NotHybrid,

    /// `add hybrid` on an app that already has one
    #[error("Hybrid project already exists at {path}")]
    AlreadyHybrid { path: String },

    /// Platform not valid for the requested operation
    #[error("Platform '{platform}' is not supported for {operation}")]
    UnsupportedPlatform { platform: String, operation: String },

    /// Malformed config.xml
    #[error("Invalid config.xml: {message}")]
    InvalidConfigXml { message: String },

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

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

fn stderr_text(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl Error {
    pub fn invalid_option(
        option: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            option: option.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_has_exit_code() {
        let err = Error::CommandFailed {
            command: "cordova platform add ios".into(),
            code: Some(2),
            stderr: "Requirements check failed\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "Command 'cordova platform add ios' failed with exit code 2: Requirements check failed"
        );
    }
}
