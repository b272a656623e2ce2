pub mod udp;

use async_trait::async_trait;
use ferrous_stub_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    /// The received datagram, untouched.
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// Sends one encoded query and hands back the raw reply.
///
/// Implementations must report an expired `timeout` as
/// [`DomainError::TransportTimeout`]; that is the only error the resolver
/// retries.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
