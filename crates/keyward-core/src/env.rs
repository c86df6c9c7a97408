//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Common environment variable names.
pub mod vars {
    /// Keyward home directory override.
    pub const KEYWARD_HOME: &str = "KEYWARD_HOME";

    /// Keyward config file override.
    pub const KEYWARD_CONFIG: &str = "KEYWARD_CONFIG";

    /// Log filter directive for the CLI.
    pub const KEYWARD_LOG: &str = "KEYWARD_LOG";

    /// Backend used by the default store (`native` or `memory`).
    pub const KEYWARD_BACKEND: &str = "KEYWARD_BACKEND";
}
