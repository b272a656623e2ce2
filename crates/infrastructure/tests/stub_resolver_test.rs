use async_trait::async_trait;
use ferrous_stub_domain::{DomainError, RecordType};
use ferrous_stub_infrastructure::dns::transport::{DnsTransport, TransportResponse, UdpTransport};
use ferrous_stub_infrastructure::dns::StubResolver;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

mod helpers;
use helpers::{MockBehavior, MockDnsServer};

fn resolver_for(server: &MockDnsServer, attempts: u32) -> StubResolver<UdpTransport> {
    StubResolver::new(
        UdpTransport::new(server.addr()),
        Duration::from_millis(200),
        attempts,
    )
}

#[tokio::test]
async fn test_resolve_a_record_over_udp() {
    let server = MockDnsServer::start(MockBehavior::Answer {
        address: [93, 184, 216, 34],
        ttl: 0x50CD,
    })
    .await
    .unwrap();
    let resolver = resolver_for(&server, 1);

    let lookup = resolver
        .resolve("www.example.com", RecordType::A.to_u16())
        .await
        .unwrap();

    let message = &lookup.message;
    assert_eq!(lookup.protocol, "UDP");
    assert_eq!(message.header.query_id, lookup.query_id);
    assert_eq!(message.header.flags, 0x8180);
    assert_eq!(message.question.domain_name, b"www.example.com");
    assert_eq!(message.question.record_type, 1);
    assert_eq!(message.answers.len(), 1);

    let answer = &message.answers[0];
    assert_eq!(answer.name, b"www.example.com");
    assert_eq!(answer.ttl, 0x50CD);
    assert_eq!(answer.ipv4(), Some(Ipv4Addr::new(93, 184, 216, 34)));
    assert_eq!(server.queries_received(), 1);
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let server = MockDnsServer::start(MockBehavior::DropFirst {
        n: 1,
        address: [10, 0, 0, 1],
    })
    .await
    .unwrap();
    let resolver = resolver_for(&server, 2);

    let lookup = resolver.resolve("retry.test", 1).await.unwrap();

    assert_eq!(
        lookup.message.answers[0].ipv4(),
        Some(Ipv4Addr::new(10, 0, 0, 1))
    );
    assert_eq!(server.queries_received(), 2);
}

#[tokio::test]
async fn test_timeout_after_all_attempts() {
    let server = MockDnsServer::start(MockBehavior::DropFirst {
        n: 10,
        address: [10, 0, 0, 1],
    })
    .await
    .unwrap();
    let resolver = resolver_for(&server, 2);

    let result = resolver.resolve("silent.test", 1).await;

    assert!(matches!(result, Err(DomainError::TransportTimeout { .. })));
    assert_eq!(server.queries_received(), 2);
}

#[tokio::test]
async fn test_truncated_reply_is_decode_error() {
    let server = MockDnsServer::start(MockBehavior::Truncate { len: 20 })
        .await
        .unwrap();
    let resolver = resolver_for(&server, 1);

    let result = resolver.resolve("www.example.com", 1).await;

    match result {
        Err(DomainError::InvalidDnsResponse(err)) => assert!(err.is_insufficient_data()),
        other => panic!("expected decode error, got {:?}", other.map(|l| l.query_id)),
    }
}

#[tokio::test]
async fn test_invalid_domain_is_rejected_before_sending() {
    let server = MockDnsServer::start(MockBehavior::Answer {
        address: [127, 0, 0, 1],
        ttl: 60,
    })
    .await
    .unwrap();
    let resolver = resolver_for(&server, 1);

    let long_label = format!("{}.com", "x".repeat(64));
    for bad in ["", "a..b", long_label.as_str()] {
        let result = resolver.resolve(bad, 1).await;
        assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    }

    assert_eq!(server.queries_received(), 0);
}

struct FailingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl DnsTransport for FailingTransport {
    async fn send(
        &self,
        _message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::IoError("network unreachable".to_string()))
    }

    fn protocol_name(&self) -> &'static str {
        "FAILING"
    }
}

#[tokio::test]
async fn test_non_timeout_errors_are_not_retried() {
    let resolver = StubResolver::new(
        FailingTransport {
            calls: AtomicUsize::new(0),
        },
        Duration::from_millis(50),
        5,
    );

    let result = resolver.resolve("example.com", 1).await;

    assert!(matches!(result, Err(DomainError::IoError(_))));
    assert_eq!(resolver.transport().calls.load(Ordering::SeqCst), 1);
}

struct EchoTransport;

#[async_trait]
impl DnsTransport for EchoTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        // A query is itself a well-formed message with one question.
        Ok(TransportResponse {
            bytes: message_bytes.to_vec(),
            protocol_used: "ECHO",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "ECHO"
    }
}

#[tokio::test]
async fn test_lookup_reports_transport_protocol() {
    let resolver = StubResolver::new(EchoTransport, Duration::from_millis(50), 1);

    let lookup = resolver.resolve("echo.test", 28).await.unwrap();

    assert_eq!(lookup.protocol, "ECHO");
    assert_eq!(lookup.message.header.query_id, lookup.query_id);
    assert_eq!(lookup.message.question.domain_name, b"echo.test");
    assert_eq!(lookup.message.question.record_type, 28);
    assert!(lookup.message.answers.is_empty());
}
