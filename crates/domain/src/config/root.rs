use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use crate::dns_message::HEADER_LEN;

const LOCAL_CONFIG_FILE: &str = "ferrous-stub.toml";

/// Main configuration structure for the stub resolver
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Upstream resolver and transport settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-stub.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.resolver.server = server;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if let Some(attempts) = overrides.attempts {
            self.resolver.attempts = attempts;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.port == 0 {
            return Err(ConfigError::Validation(
                "Resolver port cannot be 0".to_string(),
            ));
        }

        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.resolver.attempts == 0 {
            return Err(ConfigError::Validation(
                "At least one attempt is required".to_string(),
            ));
        }

        if self.resolver.recv_buffer_size < HEADER_LEN {
            return Err(ConfigError::Validation(format!(
                "Receive buffer of {} bytes cannot hold a DNS header",
                self.resolver.recv_buffer_size
            )));
        }

        self.resolver.server_addr()?;

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub timeout_ms: Option<u64>,
    pub attempts: Option<u32>,
    pub log_level: Option<String>,
}
