//! Server configuration from the environment (and an optional `.env` file).

use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    /// How often the cleanup task runs.
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl ServerConfig {
    /// Read HOST, PORT, INACTIVITY_TIMEOUT_SECS and CLEANUP_INTERVAL_SECS. Unset
    /// variables keep their defaults; set but unparseable ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        if let Some(0) = parse_var::<u64>("CLEANUP_INTERVAL_SECS")? {
            return Err(ConfigError::Invalid {
                key: "CLEANUP_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            inactivity_timeout: parse_var("INACTIVITY_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.inactivity_timeout),
            cleanup_interval: parse_var("CLEANUP_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cleanup_interval),
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(None),
    }
}
