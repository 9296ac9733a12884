use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rpc_url: String,
    pub rpc_timeout: Duration,
    pub rpc_token: Option<String>,
    pub session_ttl: Duration,
    pub mock_enabled: bool,
    pub dev_info: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            rpc_url: "http://localhost:2222".to_string(),
            rpc_timeout: Duration::from_millis(5000),
            rpc_token: None,
            session_ttl: Duration::from_secs(60 * 60),
            mock_enabled: false,
            dev_info: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            rpc_url: try_load("REGISTER_RPC_URL", "http://localhost:2222")?,
            rpc_timeout: Duration::from_millis(try_load("RPC_TIMEOUT_MS", "5000")?),
            rpc_token: read_secret("REGISTER_RPC_TOKEN"),
            session_ttl: Duration::from_secs(try_load("SESSION_TTL_SECS", "3600")?),
            mock_enabled: try_load("MOCK_ENABLED", "false")?,
            dev_info: try_load("DEV_INFO", "false")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
}

/// Docker secret first, then the environment.
fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("Secret {secret_name} not readable from file: {e}");
        })
        .ok()
        .or_else(|| var(secret_name))
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_when_unset() {
        let port: u16 = try_load("REGISTER_TEST_UNSET_PORT", "1111").unwrap();
        assert_eq!(port, 1111);
    }

    #[test]
    fn invalid_value_is_an_error() {
        let err = try_load::<u16>("REGISTER_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(err.to_string().starts_with("Invalid REGISTER_TEST_UNSET_PORT value"));
    }

    #[test]
    fn missing_secret_is_none() {
        assert_eq!(read_secret("REGISTER_TEST_MISSING_SECRET"), None);
    }
}
