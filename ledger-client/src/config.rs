//! Configuration for the ledger client

use crate::codec::DEFAULT_NUMERIC_PRECISION;
use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ledger client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Ledger API address, `host:port` or a full URI
    pub ledger_address: String,

    /// Application id sent with every submission
    pub application_id: String,

    /// Connection timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Fractional digits for encoded numerics
    pub numeric_precision: u32,

    /// Retry configuration
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ledger_address: "localhost:6865".to_string(),
            application_id: "default".to_string(),
            connect_timeout_ms: 10_000, // 10 seconds
            numeric_precision: DEFAULT_NUMERIC_PRECISION,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = ClientConfig::default();

        if let Ok(addr) = std::env::var("LEDGER_ADDRESS") {
            config.ledger_address = addr;
        }

        if let Ok(application_id) = std::env::var("LEDGER_APPLICATION_ID") {
            config.application_id = application_id;
        }

        if let Ok(attempts) = std::env::var("LEDGER_RETRY_ATTEMPTS") {
            config.retry.attempt_limit = parse_var("LEDGER_RETRY_ATTEMPTS", &attempts)?;
        }

        if let Ok(delay) = std::env::var("LEDGER_RETRY_DELAY_MS") {
            config.retry.delay_ms = parse_var("LEDGER_RETRY_DELAY_MS", &delay)?;
        }

        Ok(config)
    }

    /// Connection timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> crate::Result<T> {
    value
        .parse()
        .map_err(|_| crate::Error::Config(format!("Invalid value for {}: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.ledger_address, "localhost:6865");
        assert_eq!(config.application_id, "default");
        assert_eq!(config.numeric_precision, 10);
        assert_eq!(config.retry.attempt_limit, 3);
        assert_eq!(config.retry.delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
ledger_address = "participant:5011"
application_id = "asset-app"

[retry]
attempt_limit = 5
"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ledger_address, "participant:5011");
        assert_eq!(config.application_id, "asset-app");
        assert_eq!(config.retry.attempt_limit, 5);
        assert_eq!(config.retry.delay_ms, 2000);
        assert_eq!(config.connect_timeout_ms, 10_000);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ledger_address = ").unwrap();
        assert!(matches!(
            ClientConfig::from_file(file.path()),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<u32>("X", "4").unwrap(), 4);
        assert!(parse_var::<u32>("X", "four").is_err());
    }
}
