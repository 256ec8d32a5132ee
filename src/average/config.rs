//! Average service configuration from environment variables

use crate::config::{bind_addr, env_lookup, optional, parse_or, validate_base_url, ConfigError};
use crate::window::DEFAULT_WINDOW_SIZE;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 9876;
pub const DEFAULT_NUMBERS_API_URL: &str = "http://20.244.56.144/evaluation-service";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct AverageConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Bearer token for the number generators (header omitted when unset)
    pub token: Option<String>,

    /// Base URL the generator paths are appended to
    pub numbers_api_url: String,

    /// Time budget for a single generator call
    pub fetch_timeout: Duration,

    /// Window capacity
    pub window_size: NonZeroUsize,
}

impl AverageConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 9876)
    /// - `TOKEN` (optional)
    /// - `NUMBERS_API_URL` (default: http://20.244.56.144/evaluation-service)
    /// - `FETCH_TIMEOUT_MS` (default: 500)
    /// - `WINDOW_SIZE` (default: 10, must be > 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = bind_addr(&lookup, DEFAULT_PORT)?;

        let token = optional(&lookup, "TOKEN");

        let numbers_api_url = validate_base_url(
            "NUMBERS_API_URL",
            &optional(&lookup, "NUMBERS_API_URL")
                .unwrap_or_else(|| DEFAULT_NUMBERS_API_URL.to_string()),
        )?;

        let fetch_timeout = Duration::from_millis(parse_or(
            &lookup,
            "FETCH_TIMEOUT_MS",
            DEFAULT_FETCH_TIMEOUT_MS,
        )?);

        let window_size = parse_or(&lookup, "WINDOW_SIZE", DEFAULT_WINDOW_SIZE)?;
        let window_size = NonZeroUsize::new(window_size).ok_or_else(|| {
            ConfigError::InvalidValue("WINDOW_SIZE must be greater than 0".to_string())
        })?;

        Ok(Self {
            bind_addr,
            token,
            numbers_api_url,
            fetch_timeout,
            window_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::vars;

    #[test]
    fn test_default_config() {
        let config = AverageConfig::from_lookup(vars(&[])).unwrap();

        assert_eq!(config.bind_addr.port(), 9876);
        assert_eq!(config.token, None);
        assert_eq!(config.numbers_api_url, DEFAULT_NUMBERS_API_URL);
        assert_eq!(config.fetch_timeout, Duration::from_millis(500));
        assert_eq!(config.window_size.get(), 10);
    }

    #[test]
    fn test_custom_config() {
        let config = AverageConfig::from_lookup(vars(&[
            ("PORT", "8000"),
            ("TOKEN", "secret"),
            ("NUMBERS_API_URL", "http://localhost:4000/test/"),
            ("FETCH_TIMEOUT_MS", "250"),
            ("WINDOW_SIZE", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.numbers_api_url, "http://localhost:4000/test");
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
        assert_eq!(config.window_size.get(), 3);
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = AverageConfig::from_lookup(vars(&[("WINDOW_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = AverageConfig::from_lookup(vars(&[("FETCH_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
