//! Type definitions shared across gitty crates

mod runtime_config;

pub use runtime_config::*;
