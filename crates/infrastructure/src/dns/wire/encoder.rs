//! DNS Query Encoder
//!
//! Serializes a single-question recursive query (RFC 1035 §4.1) into wire
//! format. Encoding cannot fail: every field is fixed-width and the name is
//! copied label by label.
//!
//! Labels must be 1-63 bytes. That limit is a caller contract; the
//! [`StubResolver`](crate::dns::stub_resolver::StubResolver) checks it before
//! calling in here.

use ferrous_stub_domain::{Header, CLASS_IN, HEADER_LEN};

pub const MAX_LABEL_LEN: usize = 63;

const TYPE_AND_CLASS_LEN: usize = 4;

/// Builds DNS query messages in wire format
pub struct QueryEncoder;

impl QueryEncoder {
    /// Build a query with a random ID.
    ///
    /// Layout: header (12 bytes) ∥ encoded name ∥ type (2) ∥ class IN (2).
    /// The header carries RD and a question count of one; every other count
    /// is zero.
    pub fn encode_query(domain: &str, record_type: u16) -> Vec<u8> {
        Self::encode_query_with_id(domain, record_type).1
    }

    /// Like [`encode_query`](Self::encode_query), also returning the ID that
    /// was drawn so the caller can log or match it.
    pub fn encode_query_with_id(domain: &str, record_type: u16) -> (u16, Vec<u8>) {
        let id = fastrand::u16(..);
        (id, Self::encode_query_for_id(id, domain, record_type))
    }

    /// Deterministic variant with a caller-supplied ID.
    pub fn encode_query_for_id(query_id: u16, domain: &str, record_type: u16) -> Vec<u8> {
        let mut buf =
            Vec::with_capacity(HEADER_LEN + encoded_name_len(domain) + TYPE_AND_CLASS_LEN);

        Header::query(query_id).write_to(&mut buf);
        encode_name(domain, &mut buf);
        buf.extend_from_slice(&record_type.to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());

        buf
    }
}

/// Appends `domain` as length-prefixed labels followed by the zero byte.
///
/// Empty segments are skipped, so `""` encodes as a lone terminator and a
/// trailing dot (`"example.com."`) is harmless.
pub fn encode_name(domain: &str, buf: &mut Vec<u8>) {
    for label in labels(domain) {
        debug_assert!(
            label.len() <= MAX_LABEL_LEN,
            "label '{}' exceeds {} bytes",
            label,
            MAX_LABEL_LEN
        );
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
}

/// Wire size of `domain` once encoded, terminator included.
pub fn encoded_name_len(domain: &str) -> usize {
    labels(domain).map(|label| 1 + label.len()).sum::<usize>() + 1
}

fn labels(domain: &str) -> impl Iterator<Item = &str> {
    domain.split('.').filter(|label| !label.is_empty())
}
