use std::fmt::Display;
use std::io::Cursor;
use std::str::FromStr;

use bytes::Buf;

use crate::{DecodeError, EncodeError, Wire};

/// Longest chain of compression pointers we are willing to chase while
/// decoding one name. Real messages stay in the low single digits; a
/// chain this long is a cycle or a hostile message.
const MAX_POINTER_HOPS: u8 = 8;

const MAX_LABEL_LEN: usize = 63;

const POINTER_MASK: u8 = 0b1100_0000;

/// A domain name as an ordered sequence of labels, e.g.
/// `["www", "example", "com"]` for `www.example.com`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl FromStr for Name {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A single trailing dot is the root and carries no label.
        let s = s.strip_suffix('.').unwrap_or(s);

        if s.is_empty() {
            return Err(EncodeError::EmptyName);
        }

        let labels: Vec<String> = s.split('.').map(str::to_owned).collect();
        for label in &labels {
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodeError::LabelTooLong {
                    label: label.clone(),
                });
            }
        }

        Ok(Self { labels })
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.labels.join("."))
    }
}

impl Wire for Name {
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = Vec::new();

        for label in &self.labels {
            ret.push(label.len() as u8);
            ret.extend_from_slice(label.as_bytes());
        }

        ret.push(0);

        ret
    }

    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let labels = decode_labels(bytes, 0)?;

        Ok(Self { labels })
    }
}

/// Reads one control byte at a time: zero terminates the name, a byte
/// with the top two bits set is a 14-bit pointer into the whole message
/// (and also terminates the name), anything else is a label length.
fn decode_labels(bytes: &mut Cursor<&[u8]>, hops: u8) -> Result<Vec<String>, DecodeError> {
    let mut labels = Vec::new();

    loop {
        if bytes.remaining() < 1 {
            return Err(DecodeError::Truncated);
        }
        let len = bytes.get_u8();

        if len == 0 {
            break;
        }

        if len & POINTER_MASK == POINTER_MASK {
            if hops >= MAX_POINTER_HOPS {
                return Err(DecodeError::MalformedCompression);
            }

            if bytes.remaining() < 1 {
                return Err(DecodeError::Truncated);
            }
            let offset = (((len & !POINTER_MASK) as u64) << 8) | bytes.get_u8() as u64;

            let position = bytes.position();
            bytes.set_position(offset);
            let mut tail = decode_labels(bytes, hops + 1)?;
            bytes.set_position(position);

            labels.append(&mut tail);
            break;
        }

        // Plain label of `len` bytes.
        if bytes.remaining() < len as usize {
            return Err(DecodeError::Truncated);
        }
        let raw = bytes.copy_to_bytes(len as usize);
        let label = std::str::from_utf8(&raw).or(Err(DecodeError::Malformed))?;
        labels.push(label.to_owned());
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8], at: u64) -> Result<Name, DecodeError> {
        let mut cursor = Cursor::new(bytes);
        cursor.set_position(at);
        Name::from_bytes(&mut cursor)
    }

    #[test]
    fn encodes_length_prefixed_labels() {
        let name: Name = "www.example.com".parse().unwrap();
        assert_eq!(name.to_bytes(), b"\x03www\x07example\x03com\x00");
    }

    #[test]
    fn decode_reverses_encode() {
        let name: Name = "www.example.com".parse().unwrap();
        let decoded = decode(&name.to_bytes(), 0).unwrap();
        assert_eq!(decoded.to_string(), "www.example.com");
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!("".parse::<Name>().unwrap_err(), EncodeError::EmptyName);
        assert_eq!(".".parse::<Name>().unwrap_err(), EncodeError::EmptyName);
    }

    #[test]
    fn rejects_oversized_label() {
        let long = "a".repeat(64);
        let err = format!("{long}.com").parse::<Name>().unwrap_err();
        assert!(matches!(err, EncodeError::LabelTooLong { .. }));
    }

    #[test]
    fn trailing_dot_is_absolute_form() {
        let name: Name = "example.com.".parse().unwrap();
        assert_eq!(name.labels(), ["example", "com"]);
    }

    #[test]
    fn follows_pointer_into_earlier_bytes() {
        // 12 filler bytes standing in for a header, the name at offset
        // 12, then a pointer back to it.
        let mut message = vec![0u8; 12];
        message.extend_from_slice(b"\x07example\x03com\x00");
        let pointer_at = message.len() as u64;
        message.extend_from_slice(&[0xC0, 0x0C]);

        let decoded = decode(&message, pointer_at).unwrap();
        assert_eq!(decoded.to_string(), "example.com");
    }

    #[test]
    fn pointer_may_follow_labels() {
        let mut message = vec![0u8; 12];
        message.extend_from_slice(b"\x07example\x03com\x00");
        let pointer_at = message.len() as u64;
        message.extend_from_slice(b"\x03www\xC0\x0C");

        let decoded = decode(&message, pointer_at).unwrap();
        assert_eq!(decoded.to_string(), "www.example.com");
    }

    #[test]
    fn self_pointer_fails_closed() {
        let mut message = vec![0u8; 12];
        // Pointer at offset 12 whose target is offset 12.
        message.extend_from_slice(&[0xC0, 0x0C]);

        let err = decode(&message, 12).unwrap_err();
        assert_eq!(err, DecodeError::MalformedCompression);
    }

    #[test]
    fn pointer_cycle_fails_closed() {
        let mut message = vec![0u8; 12];
        message.extend_from_slice(&[0xC0, 0x0E]); // 12 -> 14
        message.extend_from_slice(&[0xC0, 0x0C]); // 14 -> 12

        let err = decode(&message, 12).unwrap_err();
        assert_eq!(err, DecodeError::MalformedCompression);
    }

    #[test]
    fn pointer_past_the_message_is_truncated() {
        let message = [0xC0u8, 0x7F];
        let err = decode(&message, 0).unwrap_err();
        assert_eq!(err, DecodeError::Truncated);
    }

    #[test]
    fn label_running_past_the_message_is_truncated() {
        let err = decode(b"\x0bexam", 0).unwrap_err();
        assert_eq!(err, DecodeError::Truncated);
    }
}
