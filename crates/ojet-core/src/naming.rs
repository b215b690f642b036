//! Naming rules for apps, packs, and components
//!
//! Custom element names must be lowercase, start with a letter, and contain a
//! hyphen. A handful of hyphenated names are reserved by the HTML standard.

use crate::error::{Error, Result};

/// Hyphenated names the HTML standard reserves for its own elements
pub const RESERVED_ELEMENT_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Prefix reserved for the framework's own components
pub const RESERVED_PREFIX: &str = "oj-";

/// Validate a component name (used as a custom element tag)
pub fn validate_component_name(name: &str) -> Result<()> {
    validate_identifier(name)?;

    if !name.contains('-') {
        return Err(Error::invalid_name(name, "component names must contain a hyphen"));
    }
    if name.ends_with('-') {
        return Err(Error::invalid_name(name, "component names cannot end with a hyphen"));
    }
    if RESERVED_ELEMENT_NAMES.contains(&name) || name.starts_with(RESERVED_PREFIX) {
        return Err(Error::reserved_name(name));
    }

    Ok(())
}

/// Validate a pack name
///
/// Packs follow the identifier rules but do not need a hyphen.
pub fn validate_pack_name(name: &str) -> Result<()> {
    validate_identifier(name)?;
    if name.starts_with(RESERVED_PREFIX) {
        return Err(Error::reserved_name(name));
    }
    Ok(())
}

/// Validate an app name, which becomes a directory name
pub fn validate_app_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "app name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(Error::invalid_name(name, "app name cannot be a relative path"));
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(Error::invalid_name(
            name,
            "app name cannot contain path separators or whitespace",
        ));
    }
    Ok(())
}

fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(Error::invalid_name(name, "name cannot be empty")),
        Some(c) if !c.is_ascii_lowercase() => {
            return Err(Error::invalid_name(
                name,
                "name must start with a lowercase letter",
            ))
        }
        Some(_) => {}
    }

    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(Error::invalid_name(
            name,
            "only lowercase letters, digits, and hyphens are allowed",
        ));
    }

    if name.contains("--") {
        return Err(Error::invalid_name(name, "consecutive hyphens are not allowed"));
    }

    Ok(())
}

/// Convert a hyphenated name to lower camel case (`demo-card` -> `demoCard`)
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_component_names() {
        assert!(validate_component_name("demo-card").is_ok());
        assert!(validate_component_name("acme-chart-2").is_ok());
    }

    #[test]
    fn test_component_name_requires_hyphen() {
        let err = validate_component_name("democard").unwrap_err();
        assert!(err.to_string().contains("hyphen"));
    }

    #[test]
    fn test_component_name_rejects_uppercase_and_symbols() {
        assert!(validate_component_name("Demo-card").is_err());
        assert!(validate_component_name("demo_card").is_err());
        assert!(validate_component_name("1demo-card").is_err());
        assert!(validate_component_name("demo--card").is_err());
        assert!(validate_component_name("demo-").is_err());
    }

    #[test]
    fn test_reserved_component_names() {
        assert!(matches!(
            validate_component_name("font-face"),
            Err(Error::ReservedName { .. })
        ));
        assert!(matches!(
            validate_component_name("oj-button"),
            Err(Error::ReservedName { .. })
        ));
    }

    #[test]
    fn test_pack_names() {
        assert!(validate_pack_name("acme").is_ok());
        assert!(validate_pack_name("acme-pack").is_ok());
        assert!(validate_pack_name("oj-pack").is_err());
    }

    #[test]
    fn test_app_names() {
        assert!(validate_app_name("my-app").is_ok());
        assert!(validate_app_name("MyApp").is_ok());
        assert!(validate_app_name("").is_err());
        assert!(validate_app_name("..").is_err());
        assert!(validate_app_name("a/b").is_err());
        assert!(validate_app_name("my app").is_err());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("demo-card"), "demoCard");
        assert_eq!(camel_case("acme-big-chart"), "acmeBigChart");
        assert_eq!(camel_case("plain"), "plain");
    }
}
