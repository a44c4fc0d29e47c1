use std::io::Cursor;

use bytes::Buf;
use tracing::instrument;

use crate::{DecodeError, Name, RecordType, Wire};

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: Name,
    pub type_: RecordType,
    pub class: u16,
}

impl Question {
    pub fn new(name: Name, type_: RecordType) -> Self {
        Self {
            name,
            type_,
            class: CLASS_IN,
        }
    }
}

impl Wire for Question {
    #[instrument(level = "trace", skip_all)]
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = self.name.to_bytes();
        ret.extend_from_slice(&u16::from(self.type_).to_be_bytes());
        ret.extend_from_slice(&self.class.to_be_bytes());

        ret
    }

    #[instrument(level = "trace", skip_all)]
    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let name = Name::from_bytes(bytes)?;

        if bytes.remaining() < 4 {
            return Err(DecodeError::Truncated);
        }
        let type_ = RecordType::from(bytes.get_u16());
        let class = bytes.get_u16();

        Ok(Self { name, type_, class })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let question = Question::new("example.com".parse().unwrap(), RecordType::Ns);

        let bytes = question.to_bytes();
        let decoded = Question::from_bytes(&mut Cursor::new(&bytes[..])).unwrap();

        assert_eq!(decoded, question);
        assert_eq!(decoded.class, CLASS_IN);
    }
}
