//! Shared configuration helpers
//!
//! Both services read their settings from environment variables (after
//! `dotenv` has loaded `.env`). Parsing goes through a lookup closure so the
//! same code path can be driven from a map in tests.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Process environment as a lookup function
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read a required, non-empty variable
pub fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingVariable(key.to_string()))
}

/// Read an optional variable; empty values count as unset
pub fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when it is unset
///
/// A value that is set but does not parse is an error rather than a silent
/// fallback.
pub fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("{}={:?}", key, raw))),
        None => Ok(default),
    }
}

/// `HOST` + `PORT` as a socket address
pub fn bind_addr<F>(lookup: &F, default_port: u16) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let host: IpAddr = parse_or(lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?;
    let port: u16 = parse_or(lookup, "PORT", default_port)?;
    Ok(SocketAddr::new(host, port))
}

/// Reject base URLs that reqwest would refuse later
pub fn validate_base_url(key: &str, url: &str) -> Result<String, ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue(format!(
            "{} must start with http:// or https://",
            key
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    /// Lookup closure backed by a fixed set of variables
    pub fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }
}
