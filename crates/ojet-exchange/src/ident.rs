//! Component identifiers of the form `name[@version]`

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed component identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIdent {
    pub name: String,
    pub version: Option<String>,
}

impl ComponentIdent {
    /// Unpinned identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Identifier pinned to a version
    pub fn pinned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Reject names that are not a single plain path segment
    pub fn validate_name(name: &str) -> Result<()> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if plain {
            Ok(())
        } else {
            Err(Error::InvalidComponentName {
                name: name.to_string(),
            })
        }
    }

    /// Parse `name` or `name@version`
    pub fn parse(ident: &str) -> Result<Self> {
        let parts: Vec<&str> = ident.split('@').collect();

        if parts.len() > 2 {
            return Err(Error::WrongVersionSpecification {
                ident: ident.to_string(),
            });
        }

        let name = parts[0].trim();
        if name.is_empty() {
            return Err(Error::MissingComponentName {
                ident: ident.to_string(),
            });
        }

        Self::validate_name(name)?;

        let version = match parts.get(1) {
            Some(v) if v.trim().is_empty() => {
                return Err(Error::WrongVersionSpecification {
                    ident: ident.to_string(),
                })
            }
            Some(v) => Some(v.trim().to_string()),
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            version,
        })
    }

    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }
}

impl FromStr for ComponentIdent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ComponentIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        let ident = ComponentIdent::parse("demo-card").unwrap();
        assert_eq!(ident.name, "demo-card");
        assert!(!ident.is_pinned());
    }

    #[test]
    fn test_parse_pinned() {
        let ident: ComponentIdent = "demo-card@1.2.0".parse().unwrap();
        assert_eq!(ident, ComponentIdent::pinned("demo-card", "1.2.0"));
        assert_eq!(ident.to_string(), "demo-card@1.2.0");
    }

    #[test]
    fn test_two_at_signs_is_wrong_version_specification() {
        let err = ComponentIdent::parse("demo-card@1.0.0@2.0.0").unwrap_err();
        assert!(matches!(err, Error::WrongVersionSpecification { .. }));
        assert!(err.to_string().contains("Wrong version specification"));
    }

    #[test]
    fn test_leading_at_is_missing_name() {
        let err = ComponentIdent::parse("@1.0.0").unwrap_err();
        assert!(matches!(err, Error::MissingComponentName { .. }));
        assert!(err.to_string().contains("Missing component name"));
    }

    #[test]
    fn test_path_like_names_are_rejected() {
        for ident in ["..", ".", "../src", "a/b", "a\\b", "../../victim@1.0.0"] {
            let err = ComponentIdent::parse(ident).unwrap_err();
            assert!(
                matches!(err, Error::InvalidComponentName { .. }),
                "{ident} should be rejected"
            );
            assert!(err.is_fatal());
        }
        assert!(ComponentIdent::parse("demo.card").is_ok());
    }

    #[test]
    fn test_trailing_at_is_wrong_version_specification() {
        let err = ComponentIdent::parse("demo-card@").unwrap_err();
        assert!(matches!(err, Error::WrongVersionSpecification { .. }));
    }
}
