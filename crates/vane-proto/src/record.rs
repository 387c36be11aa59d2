//! DNS resource records.

use crate::class::{Class, RecordClass};
use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::RData;
use crate::rtype::Type;
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the fixed fields between the owner name and the RDATA:
/// TYPE (2) + CLASS (2) + TTL (4) + RDLENGTH (2).
const FIXED_FIELDS_SIZE: usize = 10;

/// A DNS resource record.
///
/// # Wire Format
///
/// ```text
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                                               |
/// /                      NAME                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     CLASS                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      TTL                      |
/// |                                               |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                   RDLENGTH                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// /                     RDATA                     /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// A parsed record keeps its raw RDATA bytes next to the typed [`RData`]
/// view. On encode the raw bytes are written back, so any embedded
/// compression pointers are reproduced and the record round-trips
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The owner name of the record.
    pub name: Name,

    /// The record type.
    pub rtype: Type,

    /// The record class.
    pub class: Class,

    /// Time to live in seconds.
    pub ttl: u32,

    /// The decoded RDATA view.
    pub rdata: RData,

    /// The RDATA exactly as it appeared on the wire.
    raw_rdata: Bytes,
}

impl ResourceRecord {
    /// Creates a record from a typed RDATA value.
    ///
    /// The raw form is derived by serializing the RDATA, so constructed and
    /// parsed records encode the same way.
    pub fn new(name: Name, class: Class, ttl: u32, rdata: RData) -> Self {
        let mut raw = BytesMut::with_capacity(rdata.wire_len());
        rdata.write_wire(&mut raw);

        Self {
            name,
            rtype: rdata.rtype(),
            class,
            ttl,
            rdata,
            raw_rdata: raw.freeze(),
        }
    }

    /// Creates an IN-class record from a typed RDATA value.
    pub fn in_class(name: Name, ttl: u32, rdata: RData) -> Self {
        Self::new(name, RecordClass::IN.into(), ttl, rdata)
    }

    /// Parses a resource record from `message` starting at `offset`.
    ///
    /// `message` must be the complete DNS message so that compression
    /// pointers in the owner name and in NS RDATA can be resolved. Returns
    /// the record and the number of bytes consumed from `offset`.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(message);
        let (name, name_len) = parser.parse_name(offset)?;

        let fields = offset + name_len;
        if fields + FIXED_FIELDS_SIZE > message.len() {
            return Err(Error::unexpected_eof(fields + FIXED_FIELDS_SIZE));
        }

        let rtype = Type::from_u16(u16::from_be_bytes([message[fields], message[fields + 1]]));
        let class = Class::from_u16(u16::from_be_bytes([
            message[fields + 2],
            message[fields + 3],
        ]));
        let ttl = u32::from_be_bytes([
            message[fields + 4],
            message[fields + 5],
            message[fields + 6],
            message[fields + 7],
        ]);
        let rdlength = u16::from_be_bytes([message[fields + 8], message[fields + 9]]) as usize;

        let rdata_start = fields + FIXED_FIELDS_SIZE;
        let rdata_end = rdata_start + rdlength;
        if rdata_end > message.len() {
            return Err(Error::unexpected_eof(rdata_end));
        }

        let rdata = RData::parse(message, rdata_start, rdlength, rtype)?;
        let raw_rdata = Bytes::copy_from_slice(&message[rdata_start..rdata_end]);

        let record = Self {
            name,
            rtype,
            class,
            ttl,
            rdata,
            raw_rdata,
        };

        Ok((record, name_len + FIXED_FIELDS_SIZE + rdlength))
    }

    /// Returns the RDATA exactly as it appeared on the wire.
    #[inline]
    pub fn raw_rdata(&self) -> &Bytes {
        &self.raw_rdata
    }

    /// Returns the number of bytes this record occupies on the wire.
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + FIXED_FIELDS_SIZE + self.raw_rdata.len()
    }

    /// Writes the record in wire format to a buffer.
    ///
    /// The owner name and the RDATA are emitted verbatim, preserving any
    /// compression the record was parsed with.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        self.name.write_wire(buf);
        buf.extend_from_slice(&self.rtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.class.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&(self.raw_rdata.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.raw_rdata);
    }

    /// Serializes the record to a standalone byte vector.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_wire(&mut buf);
        buf.to_vec()
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.ttl, self.class, self.rtype, self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn a_record_wire() -> Vec<u8> {
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        wire.extend_from_slice(&[
            0x00, 0x01, // type A
            0x00, 0x01, // class IN
            0x00, 0x00, 0x0E, 0x10, // ttl 3600
            0x00, 0x04, // rdlength
            93, 184, 216, 34,
        ]);
        wire
    }

    #[test]
    fn parse_a_record() {
        let wire = a_record_wire();
        let (record, consumed) = ResourceRecord::parse(&wire, 0).unwrap();

        assert_eq!(consumed, wire.len());
        assert_eq!(record.name, Name::from_str("example.com").unwrap());
        assert_eq!(record.ttl, 3600);
        assert_eq!(record.rdata.as_ipv4(), Some(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(record.to_wire(), wire);
    }

    #[test]
    fn constructed_record_matches_parsed() {
        let record = ResourceRecord::in_class(
            Name::from_str("example.com").unwrap(),
            3600,
            RData::A(Ipv4Addr::new(93, 184, 216, 34)),
        );
        assert_eq!(record.to_wire(), a_record_wire());
    }

    #[test]
    fn parse_record_with_compressed_owner_name() {
        // Owner name is a bare pointer to a name earlier in the message.
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        let record_offset = wire.len();
        wire.extend_from_slice(&[0xC0, 0x00]); // owner name pointer
        wire.extend_from_slice(&[
            0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x04, 1, 2, 3, 4,
        ]);

        let (record, consumed) = ResourceRecord::parse(&wire, record_offset).unwrap();

        // 2 pointer bytes + 10 fixed bytes + 4 rdata bytes.
        assert_eq!(consumed, 16);
        assert_eq!(record.name, Name::from_str("example.com").unwrap());
        assert!(record.name.is_compressed());

        // Re-encoding reproduces the compressed bytes, not an expansion.
        assert_eq!(record.to_wire(), &wire[record_offset..]);
    }

    #[test]
    fn unknown_type_record_round_trips() {
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        wire.extend_from_slice(&[
            0x00, 0x10, // type TXT, not interpreted
            0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x05, 4, b't', b'e', b's', b't',
        ]);

        let (record, consumed) = ResourceRecord::parse(&wire, 0).unwrap();
        assert_eq!(consumed, wire.len());
        assert_eq!(record.rtype, Type::Unknown(16));
        assert!(matches!(record.rdata, RData::Unknown { .. }));
        assert_eq!(record.to_wire(), wire);
    }

    #[test]
    fn ns_record_keeps_compressed_rdata() {
        // example.com. at 0, then an NS record whose rdata is ns1.<ptr 0>.
        let mut wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        let record_offset = wire.len();
        wire.extend_from_slice(&[0xC0, 0x00]); // owner
        wire.extend_from_slice(&[0x00, 0x02, 0x00, 0x01, 0x00, 0x01, 0x51, 0x80, 0x00, 0x06]);
        wire.extend_from_slice(&[3, b'n', b's', b'1', 0xC0, 0x00]);

        let (record, consumed) = ResourceRecord::parse(&wire, record_offset).unwrap();

        assert_eq!(consumed, 18);
        assert_eq!(
            record.rdata.as_ns(),
            Some(&Name::from_str("ns1.example.com").unwrap())
        );
        assert_eq!(record.to_wire(), &wire[record_offset..]);
    }

    #[test]
    fn truncated_rdata_rejected() {
        let mut wire = a_record_wire();
        wire.truncate(wire.len() - 2);
        assert!(matches!(
            ResourceRecord::parse(&wire, 0),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn truncated_fixed_fields_rejected() {
        let wire = Name::from_str("example.com").unwrap().as_wire().to_vec();
        assert!(matches!(
            ResourceRecord::parse(&wire, 0),
            Err(Error::UnexpectedEof { .. })
        ));
    }
}
