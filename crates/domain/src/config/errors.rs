#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// The resolver must be an IP literal; there is nothing to resolve a hostname with.
    #[error("Invalid resolver address '{server}': {reason}")]
    InvalidServer { server: String, reason: String },

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
