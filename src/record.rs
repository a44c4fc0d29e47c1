use std::io::Cursor;
use std::net::Ipv4Addr;

use bytes::{Buf, Bytes};
use tracing::{instrument, trace};

use crate::{DecodeError, Name, RecordType, Wire};

/// RDATA, interpreted by record type. A and NS are the only types this
/// resolver acts on; anything else is carried as the raw bytes the
/// server sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Ns(Name),
    Other(Bytes),
}

impl RecordData {
    fn from_bytes(
        type_: RecordType,
        rd_length: u16,
        bytes: &mut Cursor<&[u8]>,
    ) -> Result<Self, DecodeError> {
        match type_ {
            RecordType::A => {
                if rd_length != 4 {
                    return Err(DecodeError::Malformed);
                }
                if bytes.remaining() < 4 {
                    return Err(DecodeError::Truncated);
                }

                Ok(Self::A(bytes.get_u32().into()))
            }

            // An NS name may be compressed, so its wire length is not
            // its decoded length: the name decoder owns the cursor here
            // and RDLENGTH is not consulted.
            RecordType::Ns => Ok(Self::Ns(Name::from_bytes(bytes)?)),

            other => {
                trace!(?other, rd_length, "uninterpreted record data");
                if bytes.remaining() < rd_length as usize {
                    return Err(DecodeError::Truncated);
                }

                Ok(Self::Other(bytes.copy_to_bytes(rd_length as usize)))
            }
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::A(addr) => u32::from(*addr).to_be_bytes().to_vec(),
            Self::Ns(name) => name.to_bytes(),
            Self::Other(data) => data.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: Name,
    pub type_: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl Wire for Record {
    #[instrument(level = "trace", skip_all)]
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = self.name.to_bytes();
        ret.extend_from_slice(&u16::from(self.type_).to_be_bytes());
        ret.extend_from_slice(&self.class.to_be_bytes());
        ret.extend_from_slice(&self.ttl.to_be_bytes());

        let data = self.data.to_bytes();
        ret.extend_from_slice(&(data.len() as u16).to_be_bytes());
        ret.extend_from_slice(&data);

        ret
    }

    #[instrument(level = "trace", skip_all)]
    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let name = Name::from_bytes(bytes)?;

        if bytes.remaining() < 10 {
            return Err(DecodeError::Truncated);
        }
        let type_ = RecordType::from(bytes.get_u16());
        let class = bytes.get_u16();
        let ttl = bytes.get_u32();
        let rd_length = bytes.get_u16();

        let data = RecordData::from_bytes(type_, rd_length, bytes)?;

        Ok(Self {
            name,
            type_,
            class,
            ttl,
            data,
        })
    }
}
