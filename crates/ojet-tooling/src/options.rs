//! Build and serve option normalization
//!
//! Raw `--name[=value]` options from the command line are turned into typed
//! [`BuildConfig`] / [`ServeConfig`] values, filling defaults from the
//! project configuration. Flags arrive with the value `"true"`.

use crate::error::{Error, Result};
use ojet_core::Project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Options as parsed by the command router
pub type RawOptions = BTreeMap<String, String>;

pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_LIVERELOAD_PORT: u16 = 35729;

/// Build target platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Android,
    Ios,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Web,
        Platform::Android,
        Platform::Ios,
        Platform::Windows,
    ];

    /// Cordova platforms
    pub fn is_hybrid(self) -> bool {
        !matches!(self, Platform::Web)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Windows => "windows",
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                Error::invalid_option("platform", s, "expected web, android, ios or windows")
            })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[default]
    Dev,
    Release,
}

/// `--theme=name[:platform]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSpec {
    pub name: String,
    pub platform: Option<Platform>,
}

impl FromStr for ThemeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, platform) = match s.split_once(':') {
            Some((name, platform)) => (name, Some(platform.parse::<Platform>()?)),
            None => (s, None),
        };
        if name.trim().is_empty() {
            return Err(Error::invalid_option("theme", s, "theme name is empty"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            platform,
        })
    }
}

/// Normalized options handed to the tooling backend for `build`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub platform: Platform,
    pub build_type: BuildType,
    pub theme: Option<ThemeSpec>,
    /// Additional themes to compile; `["all"]` compiles every theme
    pub themes: Vec<String>,
    pub sass_compile: bool,
    pub pcss_compile: bool,
    /// Hybrid destination (`device`, `emulator`, `browser`, ...)
    pub destination: Option<String>,
    /// Build a single component instead of the app
    pub component: Option<String>,
    pub user_options: Option<String>,
}

/// Normalized options handed to the tooling backend for `serve`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServeConfig {
    #[serde(flatten)]
    pub build: BuildConfig,
    pub server_port: u16,
    pub livereload_port: u16,
    pub livereload: bool,
    pub server_only: bool,
    /// Skip the build step and serve the existing staging directory
    pub skip_build: bool,
    pub browser: Option<String>,
}

fn flag(options: &RawOptions, name: &str, default: bool) -> Result<bool> {
    match options.get(name).map(String::as_str) {
        None => Ok(default),
        Some("" | "true" | "yes") => Ok(true),
        Some("false" | "no") => Ok(false),
        Some(other) => Err(Error::invalid_option(name, other, "expected true or false")),
    }
}

fn port(options: &RawOptions, name: &str, default: u16) -> Result<u16> {
    match options.get(name) {
        None => Ok(default),
        Some(value) => match value.parse::<u16>() {
            Ok(0) | Err(_) => Err(Error::invalid_option(
                name,
                value,
                "expected a port number between 1 and 65535",
            )),
            Ok(port) => Ok(port),
        },
    }
}

fn non_empty(options: &RawOptions, name: &str) -> Option<String> {
    options
        .get(name)
        .filter(|v| !v.trim().is_empty() && v.as_str() != "true")
        .cloned()
}

impl BuildConfig {
    /// Normalize `build` options; `component` comes from `build component <name>`
    pub fn from_options(
        project: &Project,
        component: Option<String>,
        options: &RawOptions,
    ) -> Result<Self> {
        let platform = match options
            .get("platform")
            .or(project.config().default_platform.as_ref())
        {
            Some(p) => p.parse()?,
            None => Platform::Web,
        };

        let build_type = if flag(options, "release", false)? {
            BuildType::Release
        } else {
            BuildType::Dev
        };

        let theme = match non_empty(options, "theme").or(project.config().default_theme.clone()) {
            Some(t) => Some(t.parse::<ThemeSpec>()?),
            None => None,
        };
        if let Some(ThemeSpec {
            platform: Some(theme_platform),
            ..
        }) = &theme
        {
            if *theme_platform != platform && *theme_platform != Platform::Web {
                return Err(Error::invalid_option(
                    "theme",
                    options.get("theme").cloned().unwrap_or_default(),
                    format!("theme platform does not match build platform {}", platform),
                ));
            }
        }

        let themes = match non_empty(options, "themes") {
            Some(list) if list.split(',').any(|t| t.trim() == "all") => vec!["all".to_string()],
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        let destination = non_empty(options, "destination").or_else(|| {
            ["device", "emulator"]
                .into_iter()
                .find(|d| flag(options, d, false).unwrap_or(false))
                .map(str::to_string)
        });
        if destination.is_some() && !platform.is_hybrid() {
            return Err(Error::invalid_option(
                "destination",
                destination.unwrap_or_default(),
                "destinations apply only to hybrid platforms",
            ));
        }

        Ok(Self {
            platform,
            build_type,
            theme,
            themes,
            sass_compile: flag(options, "sass", true)?,
            pcss_compile: flag(options, "pcss", true)?,
            destination,
            component,
            user_options: non_empty(options, "user-options"),
        })
    }
}

impl ServeConfig {
    /// Normalize `serve` options
    pub fn from_options(project: &Project, options: &RawOptions) -> Result<Self> {
        let build = BuildConfig::from_options(project, None, options)?;

        let server_port = port(options, "server-port", DEFAULT_SERVER_PORT)?;
        let livereload_port = port(options, "livereload-port", DEFAULT_LIVERELOAD_PORT)?;
        if server_port == livereload_port {
            return Err(Error::invalid_option(
                "livereload-port",
                livereload_port.to_string(),
                "must differ from the server port",
            ));
        }

        Ok(Self {
            build,
            server_port,
            livereload_port,
            livereload: flag(options, "livereload", true)?,
            server_only: flag(options, "server-only", false)?,
            skip_build: !flag(options, "build", true)?,
            browser: non_empty(options, "browser").or(project.config().default_browser.clone()),
        })
    }
}
