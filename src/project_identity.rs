//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const DISPLAY_NAME: &str = "Quarry";
pub const BINARY_NAME: &str = "quarry";
pub const ENV_PREFIX: &str = "QUARRY";
pub const USER_AGENT: &str = concat!("quarry/", env!("CARGO_PKG_VERSION"));

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}
