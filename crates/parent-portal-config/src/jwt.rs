use crate::{env_lookup, parse_or};

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds. Negative or unparsable values fall back
    /// to the default.
    pub access_token_expiry: u64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET is not set, using the development default");
            DEFAULT_JWT_SECRET.to_string()
        });

        Self {
            secret,
            access_token_expiry: parse_or(&lookup, "JWT_ACCESS_EXPIRY", 86400), // 24 hours
        }
    }
}
