use std::io::Cursor;

mod error;
pub use error::{DecodeError, EncodeError, ResolveError, TransportError};

mod header;
pub use header::{Flags, Header};

mod name;
pub use name::Name;

mod record_type;
pub use record_type::RecordType;

mod question;
pub use question::{Question, CLASS_IN};

mod record;
pub use record::{Record, RecordData};

mod message;
pub use message::Message;

mod transport;
pub use transport::{Transport, UdpTransport};

mod resolver;
pub use resolver::{Resolved, Resolver, ROOT_SERVER};

/// Conversion between a domain type and its wire-format bytes.
///
/// Decoding reads from a cursor over the *whole* message, because
/// compression pointers seek back into earlier bytes of it.
pub trait Wire: Sized {
    fn to_bytes(&self) -> Vec<u8>;

    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DecodeError>;
}
