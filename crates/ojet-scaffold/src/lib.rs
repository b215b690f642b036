//! Project scaffolding for ojet
//!
//! This crate provides:
//! - A template engine that copies embedded or on-disk trees with token substitution
//! - Generators for apps, components, packs, and themes

pub mod app;
pub mod component;
pub mod engine;
pub mod error;
pub mod pack;
pub mod theme;
pub mod tokens;
mod tsconfig;

pub use app::{create_app, AppOptions, CreatedApp};
pub use component::{create_component, ComponentOptions, ComponentType};
pub use engine::{CopyReport, Overwrite, TemplateEngine, TemplateSource};
pub use error::{Error, Result};
pub use pack::create_pack;
pub use theme::create_theme;
pub use tokens::TokenSet;
