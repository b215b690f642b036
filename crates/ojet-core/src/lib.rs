//! # ojet-core
//!
//! Core library for the ojet CLI providing:
//! - Project configuration (`oraclejetconfig.json`) and `component.json` models
//! - User settings with layered precedence (embedded defaults, file, environment)
//! - Naming rules for apps, packs, and components

pub mod config;
pub mod error;
pub mod naming;
pub mod utils;

pub use config::{ComponentJson, OjetSettings, Project, ProjectConfig, SettingsLoader};
pub use error::{Error, Result};
pub use utils::get_home_dir;
