use thiserror::Error;

/// Failures raised while decoding a DNS message from wire format.
///
/// The context variants (`DomainName`, `Question`, `Record`) wrap the
/// underlying cause; use [`WireError::root_cause`] to inspect it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("insufficient data to fill buffer: needed {needed} bytes at offset {offset}, {available} available")]
    InsufficientData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("compression pointer at offset {at} targets offset {target}, which is not before the labels it ends")]
    ForwardPointer { at: usize, target: usize },

    #[error("compression pointer chain longer than {limit} hops")]
    PointerChainTooLong { limit: usize },

    #[error("domain name parsing failed: {0}")]
    DomainName(#[source] Box<WireError>),

    #[error("question parsing failed: {0}")]
    Question(#[source] Box<WireError>),

    #[error("record parsing failed: {0}")]
    Record(#[source] Box<WireError>),
}

impl WireError {
    pub fn domain_name(cause: WireError) -> Self {
        Self::DomainName(Box::new(cause))
    }

    pub fn question(cause: WireError) -> Self {
        Self::Question(Box::new(cause))
    }

    pub fn record(cause: WireError) -> Self {
        Self::Record(Box::new(cause))
    }

    /// Innermost error once all context wrappers are stripped.
    pub fn root_cause(&self) -> &WireError {
        let mut current = self;
        while let Self::DomainName(inner) | Self::Question(inner) | Self::Record(inner) = current {
            current = inner.as_ref();
        }
        current
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self.root_cause(), Self::InsufficientData { .. })
    }
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(#[from] WireError),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
