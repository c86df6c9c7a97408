//! # keyward-core
//!
//! Shared plumbing for the Keyward crates:
//!
//! - **Configuration**: Loading, validation, and persistence of the JSON5 config file
//! - **Paths**: Resolution of the Keyward home directory and config file
//! - **Environment**: `KEYWARD_*` variable helpers

pub mod config;
pub mod env;
pub mod error;
pub mod paths;

// Re-exports for convenience
pub use config::{BackendKind, Config, StoreConfig};
pub use error::ConfigError;
