//! Common test infrastructure for gitty-update tests
//!
//! # Modules
//!
//! - `constants`: Version strings, platforms, binary contents
//! - `builders`: Fluent builders for release documents and configs
//! - `mock_server`: Wiremock setup helpers for the release index and downloads

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod constants;
pub mod mock_server;

pub use builders::*;
pub use constants::*;
pub use mock_server::*;
