use thiserror::Error;

/// Rejected input on the encoding side.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("domain name is empty")]
    EmptyName,

    #[error("label {label:?} exceeds 63 bytes")]
    LabelTooLong { label: String },
}

/// A response that could not be decoded. The decode is abandoned as a
/// whole; no partial message is ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("message ended before the field being read")]
    Truncated,

    #[error("invalid or cyclic compression pointer")]
    MalformedCompression,

    #[error("malformed field")]
    Malformed,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no response within the deadline")]
    Timeout,
}

/// Why a resolution attempt stopped without producing a result.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("response had no answer and no referral to follow")]
    NoPath,

    #[error("gave up after too many delegation hops")]
    HopLimit,

    #[error("nameserver lookups nested too deeply")]
    RecursionLimit,
}
