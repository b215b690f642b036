//! Error types for ojet-exchange

use thiserror::Error;

/// Result type alias using ojet-exchange's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Exchange and installer error types
#[derive(Error, Debug)]
pub enum Error {
    /// More than one `@` in a component identifier
    #[error("Wrong version specification: '{ident}'. Use <component-name>@<version>")]
    WrongVersionSpecification { ident: String },

    /// Identifier without a name part
    #[error("Missing component name in '{ident}'")]
    MissingComponentName { ident: String },

    /// Name that would escape the components directory
    #[error("Invalid component name '{name}': must be a single path segment")]
    InvalidComponentName { name: String },

    /// No exchange URL in project config, settings, or environment
    #[error(
        "Exchange URL is not configured. Please run 'ojet configure --exchange-url=<url>'"
    )]
    ExchangeUrlNotConfigured,

    /// Exchange URL could not be parsed
    #[error("Invalid exchange URL '{url}': {reason}")]
    InvalidExchangeUrl { url: String, reason: String },

    /// Component already appears on the current install path
    #[error("Circular dependency detected: '{name}' is already being installed via {chain}")]
    CircularDependency { name: String, chain: String },

    /// User chose to cancel at a conflict prompt
    #[error("Installation of '{name}' was cancelled")]
    InstallCancelled { name: String },

    /// Component directory or component.json missing
    #[error("Component '{name}' not found at {path}")]
    ComponentNotFound { name: String, path: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the exchange
    #[error("Request to {url} failed with HTTP {status}{}", format_body(.body))]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// Zip archive error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Interactive prompt failure
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error(transparent)]
    Core(#[from] ojet_core::Error),
}

fn format_body(body: &str) -> String {
    if body.trim().is_empty() {
        String::new()
    } else {
        format!(": {}", body.trim())
    }
}

impl Error {
    /// Errors that abort the whole command rather than a single dependency branch
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::WrongVersionSpecification { .. }
                | Error::MissingComponentName { .. }
                | Error::InvalidComponentName { .. }
                | Error::ExchangeUrlNotConfigured
                | Error::CircularDependency { .. }
                | Error::InstallCancelled { .. }
        )
    }

    pub fn circular_dependency(name: impl Into<String>, chain: impl Into<String>) -> Self {
        Self::CircularDependency {
            name: name.into(),
            chain: chain.into(),
        }
    }

    pub fn component_not_found(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::ComponentNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn malformed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::circular_dependency("a", "a -> b").is_fatal());
        assert!(Error::InstallCancelled { name: "a".into() }.is_fatal());
        assert!(!Error::Status {
            url: "http://x".into(),
            status: 404,
            body: String::new()
        }
        .is_fatal());
    }

    #[test]
    fn test_status_message_includes_body() {
        let err = Error::Status {
            url: "http://x/components/a".into(),
            status: 404,
            body: "not found\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request to http://x/components/a failed with HTTP 404: not found"
        );
    }
}
