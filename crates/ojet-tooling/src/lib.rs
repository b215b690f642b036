//! External tooling integration for ojet
//!
//! This crate provides:
//! - A child-process runner abstraction
//! - Build and serve option normalization with an injectable tooling backend
//! - npm/yarn package installation
//! - A Cordova wrapper for hybrid mobile apps, including `config.xml` patching
//! - Staging cleanup (`clean`, `strip`)

pub mod error;
pub mod hybrid;
pub mod options;
pub mod packages;
pub mod process;
pub mod staging;
pub mod tooling;

pub use error::{Error, Result};
pub use hybrid::{ConfigXml, HybridWrapper, ListKind};
pub use options::{BuildConfig, BuildType, Platform, RawOptions, ServeConfig, ThemeSpec};
pub use packages::install_packages;
pub use process::{CommandOutput, CommandSpec, ProcessRunner, TokioProcessRunner};
pub use tooling::{BuildServeDelegate, NodeTooling, ToolingBackend};
