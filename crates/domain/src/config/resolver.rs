use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Recursive resolver to query (IPv4 or IPv6 literal).
    #[serde(default = "default_server")]
    pub server: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Send attempts; only timeouts are retried.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,
}

impl ResolverConfig {
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .server
            .trim()
            .parse()
            .map_err(|e: AddrParseError| ConfigError::InvalidServer {
                server: self.server.clone(),
                reason: e.to_string(),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            timeout_ms: default_timeout_ms(),
            attempts: default_attempts(),
            recv_buffer_size: default_recv_buffer_size(),
        }
    }
}

fn default_server() -> String {
    "8.8.8.8".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_attempts() -> u32 {
    1
}

fn default_recv_buffer_size() -> usize {
    1024
}
