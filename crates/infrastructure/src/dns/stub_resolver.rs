//! Stub resolver: encode one query, hand it to a transport, decode the reply.
//!
//! Timeouts are retried up to the configured number of attempts; every other
//! failure is returned as-is. The reply is not matched against the query.

use super::transport::{DnsTransport, TransportResponse, UdpTransport};
use super::wire::{MessageDecoder, QueryEncoder, MAX_LABEL_LEN};
use ferrous_stub_domain::config::ResolverConfig;
use ferrous_stub_domain::{DomainError, Message};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single resolution.
#[derive(Debug, Clone)]
pub struct Lookup {
    /// ID written into the query header.
    pub query_id: u16,
    /// Transport that carried the reply.
    pub protocol: &'static str,
    pub message: Message,
}

pub struct StubResolver<T: DnsTransport> {
    transport: T,
    timeout: Duration,
    attempts: u32,
}

impl StubResolver<UdpTransport> {
    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        let server_addr = config
            .server_addr()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;
        let transport = UdpTransport::with_buffer_size(server_addr, config.recv_buffer_size);

        Ok(Self::new(transport, config.timeout(), config.attempts))
    }
}

impl<T: DnsTransport> StubResolver<T> {
    pub fn new(transport: T, timeout: Duration, attempts: u32) -> Self {
        Self {
            transport,
            timeout,
            attempts: attempts.max(1),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn resolve(&self, domain: &str, record_type: u16) -> Result<Lookup, DomainError> {
        validate_domain(domain)?;

        let (query_id, query) = QueryEncoder::encode_query_with_id(domain, record_type);
        debug!(
            domain = %domain,
            record_type = record_type,
            id = query_id,
            bytes = query.len(),
            protocol = self.transport.protocol_name(),
            "Sending DNS query"
        );

        let response = self.send_with_retry(&query).await?;
        debug!(
            id = query_id,
            bytes = response.bytes.len(),
            protocol = response.protocol_used,
            "DNS response received"
        );
        let message = MessageDecoder::new(&response.bytes).parse_message()?;

        Ok(Lookup {
            query_id,
            protocol: response.protocol_used,
            message,
        })
    }

    async fn send_with_retry(&self, query: &[u8]) -> Result<TransportResponse, DomainError> {
        let mut attempt = 1;
        loop {
            match self.transport.send(query, self.timeout).await {
                Err(DomainError::TransportTimeout { server }) if attempt < self.attempts => {
                    warn!(
                        server = %server,
                        attempt = attempt,
                        max_attempts = self.attempts,
                        "DNS query timed out, retrying"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

/// Enforces the encoder's preconditions: a non-empty name whose labels are
/// 1-63 bytes. A single trailing dot is accepted.
fn validate_domain(domain: &str) -> Result<(), DomainError> {
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain name is empty".to_string(),
        ));
    }

    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty label in '{}'",
                domain
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' is {} bytes, maximum is {}",
                label,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain_accepts_common_forms() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain("example.com.").is_ok());
        assert!(validate_domain("localhost").is_ok());
        assert!(validate_domain(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_validate_domain_rejects_bad_names() {
        for bad in ["", ".", "a..b", ".example.com"] {
            assert!(
                matches!(validate_domain(bad), Err(DomainError::InvalidDomainName(_))),
                "{:?} should be rejected",
                bad
            );
        }
        let long = format!("{}.com", "a".repeat(64));
        assert!(validate_domain(&long).is_err());
    }

    #[test]
    fn test_from_config_uses_configured_server() {
        let config = ResolverConfig {
            server: "127.0.0.1".to_string(),
            port: 5353,
            ..ResolverConfig::default()
        };
        let resolver = StubResolver::from_config(&config).unwrap();
        assert_eq!(
            resolver.transport().server_addr(),
            "127.0.0.1:5353".parse::<std::net::SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_from_config_rejects_bad_server() {
        let config = ResolverConfig {
            server: "resolver.invalid".to_string(),
            ..ResolverConfig::default()
        };
        assert!(matches!(
            StubResolver::from_config(&config),
            Err(DomainError::ConfigError(_))
        ));
    }
}
