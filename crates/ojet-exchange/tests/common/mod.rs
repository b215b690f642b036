//! Common test utilities for ojet-exchange
//!
//! - Project and component fixtures on disk
//! - A wiremock-backed component catalog

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mock_catalog;

pub use fixtures::*;
pub use mock_catalog::*;
