//! `@token@` substitution for template names and contents

use ojet_core::naming::camel_case;

pub const COMPONENT_NAME: &str = "@component-name@";
pub const FULL_COMPONENT_NAME: &str = "@full-component-name@";
pub const CAMEL_COMPONENT_NAME: &str = "@camelcasecomponent-name@";
pub const PACK_NAME: &str = "@pack-name@";
pub const APP_NAME: &str = "@app-name@";
pub const THEME_NAME: &str = "@theme-name@";
pub const JET_VERSION: &str = "@jet-version@";

/// Filename placeholder replaced by the full component name
pub const COMPONENT_FILE: &str = "@component@";
/// Filename placeholder replaced by the theme name
pub const THEME_FILE: &str = "@theme@";

/// Framework version written into generated `component.json` and `package.json`
pub const DEFAULT_JET_VERSION: &str = "17.0.0";

/// Ordered token/value pairs applied to paths and UTF-8 contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    pairs: Vec<(String, String)>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a token
    pub fn with(mut self, token: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.pairs.iter_mut().find(|(t, _)| t == token) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((token.to_string(), value)),
        }
        self
    }

    /// Tokens for an app named `name`
    pub fn for_app(name: &str) -> Self {
        Self::new()
            .with(APP_NAME, name)
            .with(JET_VERSION, DEFAULT_JET_VERSION)
    }

    /// Tokens for a component, optionally a member of `pack`
    pub fn for_component(name: &str, pack: Option<&str>) -> Self {
        let full = match pack {
            Some(pack) => format!("{}-{}", pack, name),
            None => name.to_string(),
        };
        Self::new()
            .with(COMPONENT_NAME, name)
            .with(FULL_COMPONENT_NAME, full.as_str())
            .with(CAMEL_COMPONENT_NAME, camel_case(&full))
            .with(PACK_NAME, pack.unwrap_or_default())
            .with(COMPONENT_FILE, full.as_str())
            .with(JET_VERSION, DEFAULT_JET_VERSION)
    }

    /// Tokens for a pack
    pub fn for_pack(name: &str) -> Self {
        Self::new()
            .with(PACK_NAME, name)
            .with(JET_VERSION, DEFAULT_JET_VERSION)
    }

    /// Tokens for a theme
    pub fn for_theme(name: &str) -> Self {
        Self::new()
            .with(THEME_NAME, name)
            .with(THEME_FILE, name)
            .with(JET_VERSION, DEFAULT_JET_VERSION)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    /// Replace every known token in `input`
    pub fn apply(&self, input: &str) -> String {
        let mut out = input.to_string();
        for (token, value) in &self.pairs {
            if out.contains(token.as_str()) {
                out = out.replace(token.as_str(), value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_tokens() {
        let tokens = TokenSet::for_component("demo-card", None);
        assert_eq!(
            tokens.apply("<@full-component-name@> @camelcasecomponent-name@"),
            "<demo-card> demoCard"
        );
        assert_eq!(tokens.apply("@component@-viewModel.js"), "demo-card-viewModel.js");
    }

    #[test]
    fn test_pack_member_tokens() {
        let tokens = TokenSet::for_component("card", Some("acme"));
        assert_eq!(tokens.get(COMPONENT_NAME), Some("card"));
        assert_eq!(tokens.get(FULL_COMPONENT_NAME), Some("acme-card"));
        assert_eq!(tokens.get(CAMEL_COMPONENT_NAME), Some("acmeCard"));
        assert_eq!(tokens.apply("\"pack\": \"@pack-name@\""), "\"pack\": \"acme\"");
    }

    #[test]
    fn test_unknown_tokens_left_alone() {
        let tokens = TokenSet::for_app("my-app");
        assert_eq!(tokens.apply("@app-name@ @user@"), "my-app @user@");
    }

    #[test]
    fn test_with_replaces_existing_value() {
        let tokens = TokenSet::for_app("a").with(APP_NAME, "b");
        assert_eq!(tokens.apply("@app-name@"), "b");
    }
}
