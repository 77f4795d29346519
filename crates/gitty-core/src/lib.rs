//! # gitty-core
//!
//! Core library for the gitty CLI providing:
//! - Runtime configuration types (network, release index, update behaviour)
//! - Hierarchical configuration loading (embedded defaults, user file, environment)
//! - The shared error type

pub mod config;
pub mod error;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::RuntimeConfig;
