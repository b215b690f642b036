//! Configuration module

pub mod component;
pub mod project;
pub mod settings;

pub use component::ComponentJson;
pub use project::{PathsConfig, Project, ProjectConfig, SourcePaths, StagingPaths};
pub use settings::{ExchangeSettings, OjetSettings, SettingsLoader, ToolingSettings};
