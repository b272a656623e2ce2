//! Ferrous Stub domain layer: message model, record types, errors, config.
pub mod config;
pub mod dns_message;
pub mod errors;
pub mod record_type;

pub use config::{CliOverrides, Config};
pub use dns_message::{
    Header, Message, Question, ResourceRecord, FLAG_RECURSION_DESIRED, HEADER_LEN,
};
pub use errors::{DomainError, WireError};
pub use record_type::{RecordType, CLASS_IN};
