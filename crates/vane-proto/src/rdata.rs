//! Typed views of resource record data.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use bytes::{Bytes, BytesMut};
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Decoded RDATA for the record types this codec interprets.
///
/// Types outside the interpreted set are carried as [`RData::Unknown`] with
/// their bytes untouched, so records of any type survive a decode/encode
/// round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RData {
    /// An IPv4 host address (type A).
    A(Ipv4Addr),

    /// An authoritative name server (type NS).
    NS(Name),

    /// An IPv6 host address (type AAAA).
    AAAA(Ipv6Addr),

    /// RDATA of a type this codec does not interpret, kept verbatim.
    Unknown {
        /// The wire type code.
        rtype: u16,
        /// The raw RDATA bytes.
        data: Bytes,
    },
}

impl RData {
    /// Parses RDATA of the given type from `message`.
    ///
    /// The RDATA occupies `message[offset..offset + rdlength]`. The full
    /// message is required because NS RDATA may contain a compressed name
    /// whose pointer refers outside the RDATA itself.
    pub fn parse(message: &[u8], offset: usize, rdlength: usize, rtype: Type) -> Result<Self> {
        let end = offset + rdlength;
        if end > message.len() {
            return Err(Error::unexpected_eof(end));
        }
        let data = &message[offset..end];

        match rtype.as_known() {
            Some(RecordType::A) => {
                let octets: [u8; 4] = data.try_into().map_err(|_| Error::RDataLengthMismatch {
                    rtype: "A",
                    expected: 4,
                    actual: rdlength,
                })?;
                Ok(Self::A(Ipv4Addr::from(octets)))
            }
            Some(RecordType::AAAA) => {
                let octets: [u8; 16] = data.try_into().map_err(|_| Error::RDataLengthMismatch {
                    rtype: "AAAA",
                    expected: 16,
                    actual: rdlength,
                })?;
                Ok(Self::AAAA(Ipv6Addr::from(octets)))
            }
            Some(RecordType::NS) => {
                let (name, _) = NameParser::new(message).parse_name(offset)?;
                Ok(Self::NS(name))
            }
            None => Ok(Self::Unknown {
                rtype: rtype.to_u16(),
                data: Bytes::copy_from_slice(data),
            }),
        }
    }

    /// Returns the wire type code this RDATA belongs to.
    pub fn rtype(&self) -> Type {
        match self {
            Self::A(_) => RecordType::A.into(),
            Self::NS(_) => RecordType::NS.into(),
            Self::AAAA(_) => RecordType::AAAA.into(),
            Self::Unknown { rtype, .. } => Type::from_u16(*rtype),
        }
    }

    /// Returns the number of bytes this RDATA occupies on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::A(_) => 4,
            Self::NS(name) => name.wire_len(),
            Self::AAAA(_) => 16,
            Self::Unknown { data, .. } => data.len(),
        }
    }

    /// Writes the RDATA in wire format to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        match self {
            Self::A(addr) => buf.extend_from_slice(&addr.octets()),
            Self::NS(name) => name.write_wire(buf),
            Self::AAAA(addr) => buf.extend_from_slice(&addr.octets()),
            Self::Unknown { data, .. } => buf.extend_from_slice(data),
        }
    }

    /// Returns the address if this is an A record.
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            Self::A(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Returns the address if this is an AAAA record.
    pub fn as_ipv6(&self) -> Option<Ipv6Addr> {
        match self {
            Self::AAAA(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Returns the name server if this is an NS record.
    pub fn as_ns(&self) -> Option<&Name> {
        match self {
            Self::NS(name) => Some(name),
            _ => None,
        }
    }
}

impl From<Ipv4Addr> for RData {
    fn from(addr: Ipv4Addr) -> Self {
        Self::A(addr)
    }
}

impl From<Ipv6Addr> for RData {
    fn from(addr: Ipv6Addr) -> Self {
        Self::AAAA(addr)
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(addr) => write!(f, "{addr}"),
            Self::NS(name) => write!(f, "{name}"),
            Self::AAAA(addr) => write!(f, "{addr}"),
            // RFC 3597 generic presentation.
            Self::Unknown { data, .. } => {
                write!(f, "\\# {} {}", data.len(), HEXLOWER.encode(data))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_a_rdata() {
        let message = [93, 184, 216, 34];
        let rdata = RData::parse(&message, 0, 4, Type::from_u16(1)).unwrap();
        assert_eq!(rdata, RData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(rdata.to_string(), "93.184.216.34");
    }

    #[test]
    fn parse_aaaa_rdata() {
        let message = [
            0x26, 0x06, 0x28, 0x00, 0x02, 0x20, 0x00, 0x01, 0x02, 0x48, 0x18, 0x93, 0x25, 0xc8,
            0x19, 0x46,
        ];
        let rdata = RData::parse(&message, 0, 16, Type::from_u16(28)).unwrap();
        assert_eq!(
            rdata.as_ipv6(),
            Some(Ipv6Addr::from_str("2606:2800:220:1:248:1893:25c8:1946").unwrap())
        );
    }

    #[test]
    fn a_rdata_length_mismatch() {
        let message = [1, 2, 3, 4, 5];
        let result = RData::parse(&message, 0, 5, Type::from_u16(1));
        assert!(matches!(
            result,
            Err(Error::RDataLengthMismatch { rtype: "A", expected: 4, actual: 5 })
        ));
    }

    #[test]
    fn parse_ns_rdata_with_compression() {
        // example.com. at offset 0; NS rdata "ns1.<ptr 0>" at offset 13.
        let mut message = Name::from_str("example.com").unwrap().as_wire().to_vec();
        message.extend_from_slice(&[3, b'n', b's', b'1', 0xC0, 0x00]);

        let rdata = RData::parse(&message, 13, 6, Type::from_u16(2)).unwrap();
        assert_eq!(
            rdata.as_ns(),
            Some(&Name::from_str("ns1.example.com").unwrap())
        );
    }

    #[test]
    fn unknown_rdata_preserved() {
        let message = [0xDE, 0xAD, 0xBE, 0xEF];
        let rdata = RData::parse(&message, 0, 4, Type::from_u16(99)).unwrap();

        assert_eq!(rdata.rtype(), Type::Unknown(99));
        assert_eq!(rdata.wire_len(), 4);
        assert_eq!(rdata.to_string(), "\\# 4 deadbeef");

        let mut buf = BytesMut::new();
        rdata.write_wire(&mut buf);
        assert_eq!(buf.as_ref(), &message);
    }

    #[test]
    fn rdata_past_end_rejected() {
        let message = [1, 2];
        assert!(matches!(
            RData::parse(&message, 0, 4, Type::from_u16(1)),
            Err(Error::UnexpectedEof { .. })
        ));
    }
}
