//! # Parent Portal Config
//!
//! Configuration types for the Parent Portal API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//! - [`database`]: Connection URL, pool size and startup retry delay
//!
//! Each struct exposes `from_env()` plus a `from_lookup()` variant that reads
//! from any key/value source, which keeps the parsing testable.
//!
//! # Example
//!
//! ```ignore
//! use parent_portal_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}
