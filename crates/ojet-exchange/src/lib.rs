//! Component exchange support for ojet
//!
//! This crate handles:
//! - Catalog HTTP access (metadata, archives, dependency lists, search, publish)
//! - Component identifiers (`name[@version]`)
//! - Recursive component installation with cycle detection
//! - Version conflict resolution through an injectable resolver
//! - Zip packaging and unpacking of component bundles

pub mod archive;
pub mod client;
pub mod error;
pub mod ident;
pub mod installer;
pub mod publish;
pub mod resolver;
pub mod types;

pub use client::ExchangeClient;
pub use error::{Error, Result};
pub use ident::ComponentIdent;
pub use installer::{
    ComponentInstaller, FailedInstall, InstallReport, InstalledComponent, ParentChain, RemoveReport,
};
pub use publish::{label_component, publish_component, Published};
pub use resolver::{ConflictResolver, Decision, FixedResolver, PromptResolver, ScriptedResolver};
pub use types::{
    ComponentMetadata, ComponentSummary, Credentials, DependencyReport, ResolvedDependency,
};
