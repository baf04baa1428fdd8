use std::time::Duration;

use crate::{ConfigError, env_lookup, parse_or};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Delay between attempts while waiting for the database at startup.
    pub retry_delay: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            retry_delay: Duration::from_secs(parse_or(&lookup, "DATABASE_RETRY_DELAY_SECS", 5)),
        })
    }
}
