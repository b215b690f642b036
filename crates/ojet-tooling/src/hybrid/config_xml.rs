//! Minimal in-place editing of Cordova's `config.xml`
//!
//! Edits are textual so comments, ordering, and formatting of everything the
//! wrapper does not touch survive unchanged.

use crate::error::{Error, Result};
use regex::{NoExpand, Regex};
use std::path::Path;
use std::str::FromStr;

/// Cordova project descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigXml {
    content: String,
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn pattern(source: &str) -> Regex {
    // Patterns are built from escaped literals and are always valid
    Regex::new(source).unwrap_or_else(|e| unreachable!("invalid config.xml pattern: {e}"))
}

impl ConfigXml {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        content.parse()
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, &self.content).await?;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Insert `element` on its own line before `</widget>`
    fn append(&mut self, element: &str) {
        if let Some(pos) = self.content.rfind("</widget>") {
            self.content.insert_str(pos, &format!("    {}\n", element));
        }
    }

    /// Value of `<preference name="..." value="..."/>`, if present
    pub fn preference(&self, name: &str) -> Option<String> {
        let re = pattern(&format!(
            r#"<preference\s+name="{}"\s+value="([^"]*)"\s*/>"#,
            regex::escape(&escape(name))
        ));
        re.captures(&self.content).map(|c| c[1].to_string())
    }

    /// Set or replace a `<preference>` entry
    pub fn set_preference(&mut self, name: &str, value: &str) {
        let re = pattern(&format!(
            r#"<preference\s+name="{}"[^>]*/>"#,
            regex::escape(&escape(name))
        ));
        let element = format!(
            r#"<preference name="{}" value="{}" />"#,
            escape(name),
            escape(value)
        );
        if re.is_match(&self.content) {
            self.content = re.replace(&self.content, NoExpand(&element)).into_owned();
        } else {
            self.append(&element);
        }
    }

    /// The `id` attribute of the root `<widget>` element
    pub fn widget_id(&self) -> Option<String> {
        pattern(r#"<widget\b[^>]*?\sid="([^"]*)""#)
            .captures(&self.content)
            .map(|c| c[1].to_string())
    }

    pub fn set_widget_id(&mut self, id: &str) {
        let re = pattern(r#"(<widget\b[^>]*?\sid=")[^"]*(")"#);
        let replacement = format!("${{1}}{}${{2}}", escape(id).replace('$', "$$"));
        self.content = re.replace(&self.content, replacement.as_str()).into_owned();
    }

    pub fn name(&self) -> Option<String> {
        pattern(r"<name>([^<]*)</name>")
            .captures(&self.content)
            .map(|c| c[1].to_string())
    }

    /// Set the app display `<name>`
    pub fn set_name(&mut self, name: &str) {
        let re = pattern(r"<name>[^<]*</name>");
        let element = format!("<name>{}</name>", escape(name));
        if re.is_match(&self.content) {
            self.content = re.replace(&self.content, NoExpand(&element)).into_owned();
        } else {
            self.append(&element);
        }
    }

    /// Point `<content src>` at `src`, adding the element when missing
    pub fn ensure_content_src(&mut self, src: &str) {
        let re = pattern(r#"<content\s+src="[^"]*"\s*/>"#);
        let element = format!(r#"<content src="{}" />"#, escape(src));
        if re.is_match(&self.content) {
            self.content = re.replace(&self.content, NoExpand(&element)).into_owned();
        } else {
            self.append(&element);
        }
    }
}

impl FromStr for ConfigXml {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !s.contains("<widget") {
            return Err(Error::InvalidConfigXml {
                message: "missing <widget> root element".to_string(),
            });
        }
        if !s.contains("</widget>") {
            return Err(Error::InvalidConfigXml {
                message: "missing closing </widget> tag".to_string(),
            });
        }
        Ok(Self {
            content: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="io.cordova.hellocordova" version="1.0.0" xmlns="http://www.w3.org/ns/widgets">
    <name>HelloCordova</name>
    <!-- keep me -->
    <content src="index.html" />
    <preference name="Orientation" value="portrait" />
</widget>
"#;

    #[test]
    fn test_rejects_non_widget_documents() {
        assert!(matches!(
            "<plugin></plugin>".parse::<ConfigXml>(),
            Err(Error::InvalidConfigXml { .. })
        ));
    }

    #[test]
    fn test_set_preference_replaces_and_appends() {
        let mut xml: ConfigXml = SAMPLE.parse().unwrap();
        xml.set_preference("Orientation", "default");
        xml.set_preference("DisallowOverscroll", "true");

        assert_eq!(xml.preference("Orientation").as_deref(), Some("default"));
        assert_eq!(xml.preference("DisallowOverscroll").as_deref(), Some("true"));
        assert_eq!(xml.as_str().matches("name=\"Orientation\"").count(), 1);
        assert!(xml.as_str().trim_end().ends_with("</widget>"));
        assert!(xml.as_str().contains("<!-- keep me -->"));
    }

    #[test]
    fn test_widget_id_and_name() {
        let mut xml: ConfigXml = SAMPLE.parse().unwrap();
        xml.set_widget_id("org.example.app");
        xml.set_name("My <App>");

        assert_eq!(xml.widget_id().as_deref(), Some("org.example.app"));
        assert_eq!(xml.name().as_deref(), Some("My &lt;App&gt;"));
        assert!(xml.as_str().contains(r#"version="1.0.0""#));
    }

    #[test]
    fn test_ensure_content_src() {
        let mut xml: ConfigXml = SAMPLE.parse().unwrap();
        xml.ensure_content_src("main.html");
        assert!(xml.as_str().contains(r#"<content src="main.html" />"#));
        assert!(!xml.as_str().contains("index.html"));

        let mut bare: ConfigXml = "<widget id=\"a\">\n</widget>\n".parse().unwrap();
        bare.ensure_content_src("index.html");
        assert!(bare.as_str().contains(r#"<content src="index.html" />"#));
    }
}
