//! RFC 1035 wire codec: query encoding and response decoding.
pub mod decoder;
pub mod encoder;

pub use decoder::{MessageDecoder, MAX_POINTER_HOPS};
pub use encoder::{encode_name, encoded_name_len, QueryEncoder, MAX_LABEL_LEN};
