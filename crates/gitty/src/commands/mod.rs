//! CLI command implementations

pub mod update;
pub mod version;
