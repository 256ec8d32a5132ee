//! Social service configuration from environment variables

use crate::config::{bind_addr, env_lookup, parse_or, required, validate_base_url, ConfigError};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub bind_addr: SocketAddr,

    /// Token clients must present; also forwarded to the upstream API
    pub bearer_token: String,

    /// Social media API base URL
    pub api_url: String,

    /// Time budget for each upstream call
    pub fetch_timeout: Duration,
}

impl SocialConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 3000)
    /// - `BEARER_TOKEN` (required)
    /// - `API_URL` (required)
    /// - `FETCH_TIMEOUT_MS` (default: 5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = bind_addr(&lookup, DEFAULT_PORT)?;
        let bearer_token = required(&lookup, "BEARER_TOKEN")?;
        let api_url = validate_base_url("API_URL", &required(&lookup, "API_URL")?)?;
        let fetch_timeout = Duration::from_millis(parse_or(
            &lookup,
            "FETCH_TIMEOUT_MS",
            DEFAULT_FETCH_TIMEOUT_MS,
        )?);

        Ok(Self {
            bind_addr,
            bearer_token,
            api_url,
            fetch_timeout,
        })
    }
}
