//! DNS Response Decoder
//!
//! [`MessageDecoder`] is a cursor over a borrowed response buffer. Every
//! `parse_*` call reads from the current offset and advances it, so calls
//! must be made in message order: header, question, then records.
//!
//! Names may end in a compression pointer (RFC 1035 §4.1.4). A pointer must
//! target an offset strictly before the start of the segment it ends, that is
//! the name's start or the previous jump target. Jump targets therefore
//! strictly decrease and no chain can revisit a byte. Chains are additionally
//! capped at [`MAX_POINTER_HOPS`] jumps.

use ferrous_stub_domain::{Header, Message, Question, ResourceRecord, WireError, HEADER_LEN};
use smallvec::SmallVec;
use tracing::{debug, trace};

const POINTER_TAG: u8 = 0xC0;

pub const MAX_POINTER_HOPS: usize = 128;

pub struct MessageDecoder<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> MessageDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the cursor; offsets past the end are allowed and make every
    /// subsequent read fail with `InsufficientData`.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Reads the fixed 12-byte header. Nothing is consumed on failure.
    pub fn parse_header(&mut self) -> Result<Header, WireError> {
        self.ensure(HEADER_LEN)?;

        Ok(Header {
            query_id: self.read_u16()?,
            flags: self.read_u16()?,
            num_questions: self.read_u16()?,
            num_answers: self.read_u16()?,
            num_authorities: self.read_u16()?,
            num_additionals: self.read_u16()?,
        })
    }

    /// Reads one question. On failure the cursor is left where it started and
    /// the cause is wrapped in [`WireError::Question`].
    pub fn parse_question(&mut self) -> Result<Question, WireError> {
        let start = self.offset;
        self.read_question().map_err(|e| {
            self.offset = start;
            WireError::question(e)
        })
    }

    /// Reads one resource record. On failure the cursor is left where it
    /// started and the cause is wrapped in [`WireError::Record`].
    pub fn parse_record(&mut self) -> Result<ResourceRecord, WireError> {
        let start = self.offset;
        self.read_record().map_err(|e| {
            self.offset = start;
            WireError::record(e)
        })
    }

    /// Reads a possibly compressed name and returns its labels joined by `.`.
    ///
    /// When the name ends in a pointer the cursor finishes just past that
    /// two-byte pointer, however far back the chain jumped. On failure the
    /// cursor is restored and the cause is wrapped in
    /// [`WireError::DomainName`].
    pub fn parse_domain_name(&mut self) -> Result<Vec<u8>, WireError> {
        let start = self.offset;
        self.read_name().map_err(|e| {
            self.offset = start;
            WireError::domain_name(e)
        })
    }

    /// Header, the single question, then every record the header counts.
    ///
    /// Exactly one question is read whatever `num_questions` says.
    pub fn parse_message(&mut self) -> Result<Message, WireError> {
        let header = self.parse_header()?;
        let question = self.parse_question()?;
        let answers = self.parse_records(header.num_answers)?;
        let authorities = self.parse_records(header.num_authorities)?;
        let additionals = self.parse_records(header.num_additionals)?;

        debug!(
            id = header.query_id,
            rcode = header.response_code(),
            answers = answers.len(),
            authorities = authorities.len(),
            additionals = additionals.len(),
            trailing = self.remaining(),
            "DNS response decoded"
        );

        Ok(Message {
            header,
            question,
            answers,
            authorities,
            additionals,
        })
    }

    fn parse_records(&mut self, count: u16) -> Result<Vec<ResourceRecord>, WireError> {
        (0..count).map(|_| self.parse_record()).collect()
    }

    fn read_question(&mut self) -> Result<Question, WireError> {
        let domain_name = self.parse_domain_name()?;
        let record_type = self.read_u16()?;
        let record_class = self.read_u16()?;

        Ok(Question {
            domain_name,
            record_type,
            record_class,
        })
    }

    fn read_record(&mut self) -> Result<ResourceRecord, WireError> {
        let name = self.parse_domain_name()?;
        let record_type = self.read_u16()?;
        let class = self.read_u16()?;
        let ttl = self.read_u32()?;
        let data_length = self.read_u16()?;
        let data = self.take(data_length as usize)?.to_vec();

        Ok(ResourceRecord {
            name,
            record_type,
            class,
            ttl,
            data_length,
            data,
        })
    }

    fn read_name(&mut self) -> Result<Vec<u8>, WireError> {
        let mut labels: SmallVec<[&'a [u8]; 8]> = SmallVec::new();
        // Offset just past the first pointer; where the cursor must end up.
        let mut resume_at: Option<usize> = None;
        let mut hops = 0usize;
        // Start of the run of labels being read; every jump must land before it.
        let mut segment_start = self.offset;

        loop {
            let at = self.offset;
            let len = self.read_u8()?;

            if len & POINTER_TAG == POINTER_TAG {
                let low = self.read_u8()?;
                let target = (usize::from(len & !POINTER_TAG) << 8) | usize::from(low);

                if target >= segment_start {
                    return Err(WireError::ForwardPointer { at, target });
                }
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(WireError::PointerChainTooLong {
                        limit: MAX_POINTER_HOPS,
                    });
                }

                trace!(at, target, "following compression pointer");
                resume_at.get_or_insert(self.offset);
                self.offset = target;
                segment_start = target;
                continue;
            }

            if len == 0 {
                break;
            }

            labels.push(self.take(usize::from(len))?);
        }

        if let Some(resume_at) = resume_at {
            self.offset = resume_at;
        }

        Ok(labels.join(&b'.'))
    }

    fn ensure(&self, needed: usize) -> Result<(), WireError> {
        let available = self.remaining();
        if needed > available || self.offset > self.bytes.len() {
            return Err(WireError::InsufficientData {
                offset: self.offset,
                needed,
                available,
            });
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        self.ensure(n)?;
        let bytes: &'a [u8] = self.bytes;
        let slice = &bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, WireError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, WireError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
