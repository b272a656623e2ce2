pub mod stub_resolver;
pub mod transport;
pub mod wire;

pub use stub_resolver::{Lookup, StubResolver};
pub use transport::{DnsTransport, TransportResponse};
pub use wire::{MessageDecoder, QueryEncoder};
