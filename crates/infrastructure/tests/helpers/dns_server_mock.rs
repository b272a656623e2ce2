#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// What the mock does with each incoming query.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Echo the question and add one compressed A record.
    Answer { address: [u8; 4], ttl: u32 },
    /// Drop the first `n` queries, then answer like `Answer`.
    DropFirst { n: usize, address: [u8; 4] },
    /// Reply with the first `len` bytes of the normal answer.
    Truncate { len: usize },
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Binds an ephemeral loopback port and starts serving.
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let counter = received.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let seen = counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::respond(&behavior, &buf[..len], seen) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries_received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    fn respond(behavior: &MockBehavior, query: &[u8], seen: usize) -> Option<Vec<u8>> {
        match behavior {
            MockBehavior::Answer { address, ttl } => Some(Self::build_response(query, *address, *ttl)),
            MockBehavior::DropFirst { n, address } => {
                (seen >= *n).then(|| Self::build_response(query, *address, 60))
            }
            MockBehavior::Truncate { len } => {
                let mut response = Self::build_response(query, [127, 0, 0, 1], 60);
                response.truncate(*len);
                Some(response)
            }
        }
    }

    fn build_response(query: &[u8], address: [u8; 4], ttl: u32) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);

        response.push(0x81);
        response.push(0x80);

        response.extend_from_slice(&query[4..6]);

        response.extend_from_slice(&[0x00, 0x01]);

        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&[0x00, 0x00]);

        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        response.extend_from_slice(&[
            0xc0, 0x0c,
            0x00, 0x01,
            0x00, 0x01,
        ]);
        response.extend_from_slice(&ttl.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x04]);
        response.extend_from_slice(&address);

        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
