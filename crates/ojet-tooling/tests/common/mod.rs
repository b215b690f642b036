//! Common test utilities for ojet-tooling
//!
//! - A recording [`ProcessRunner`] with per-command responses
//! - Scratch project fixtures

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
