use std::borrow::Cow;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::record_type::RecordType;

/// Size of the fixed DNS header on the wire.
pub const HEADER_LEN: usize = 12;

/// RD bit in the flags word.
pub const FLAG_RECURSION_DESIRED: u16 = 0x0100;

const FLAG_RESPONSE: u16 = 0x8000;
const FLAG_TRUNCATED: u16 = 0x0200;
const FLAG_RECURSION_AVAILABLE: u16 = 0x0080;

/// The 12-byte message header: six big-endian `u16` fields in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub query_id: u16,
    pub flags: u16,
    pub num_questions: u16,
    pub num_answers: u16,
    pub num_authorities: u16,
    pub num_additionals: u16,
}

impl Header {
    /// Header of a single-question recursive query.
    pub fn query(query_id: u16) -> Self {
        Self {
            query_id,
            flags: FLAG_RECURSION_DESIRED,
            num_questions: 1,
            ..Self::default()
        }
    }

    /// Appends the header in wire order.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        for field in [
            self.query_id,
            self.flags,
            self.num_questions,
            self.num_answers,
            self.num_authorities,
            self.num_additionals,
        ] {
            buf.extend_from_slice(&field.to_be_bytes());
        }
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags >> 11) & 0x0F) as u8
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & FLAG_TRUNCATED != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RECURSION_DESIRED != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RECURSION_AVAILABLE != 0
    }

    /// RCODE, the low four bits of the flags word.
    pub fn response_code(&self) -> u8 {
        (self.flags & 0x000F) as u8
    }

    /// Total number of resource records announced across all sections.
    pub fn record_count(&self) -> usize {
        self.num_answers as usize + self.num_authorities as usize + self.num_additionals as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dot-joined labels, e.g. `b"www.example.com"`.
    pub domain_name: Vec<u8>,
    pub record_type: u16,
    pub record_class: u16,
}

impl Question {
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.domain_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Vec<u8>,
    pub record_type: u16,
    pub class: u16,
    pub ttl: u32,
    pub data_length: u16,
    /// Raw RDATA, exactly `data_length` bytes, never type-interpreted.
    pub data: Vec<u8>,
}

impl ResourceRecord {
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn kind(&self) -> RecordType {
        RecordType::from_u16(self.record_type)
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.kind() != RecordType::A {
            return None;
        }
        let octets: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }

    pub fn ipv6(&self) -> Option<Ipv6Addr> {
        if self.kind() != RecordType::AAAA {
            return None;
        }
        let octets: [u8; 16] = self.data.as_slice().try_into().ok()?;
        Some(Ipv6Addr::from(octets))
    }
}

/// A fully decoded response: header, the single question, and every record
/// the header announces, split by section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}
