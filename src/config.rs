//! Server configuration
//!
//! Host/port settings with validation. Values come from the command line;
//! anything left unset falls back to the defaults below.

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 6379;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Validated listen settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    /// Build a configuration, using defaults for missing values
    pub fn new(host: Option<String>, port: Option<u16>) -> Result<Self, ConfigError> {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port.unwrap_or(DEFAULT_PORT);

        if host.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "host cannot be empty".to_string(),
            ));
        }

        if host.chars().all(char::is_whitespace) {
            return Err(ConfigError::InvalidConfiguration(
                "host name cannot be whitespace".to_string(),
            ));
        }

        if port == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "port number is not valid".to_string(),
            ));
        }

        Ok(ServerConfig { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Listen address in `host:port` form
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
