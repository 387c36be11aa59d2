//! DNS question section entries.

use crate::class::{Class, RecordClass};
use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry in the question section of a DNS message.
///
/// # Wire Format
///
/// ```text
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                                               |
/// /                     QNAME                     /
/// /                                               /
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     QTYPE                     |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                     QCLASS                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The domain name being queried.
    pub name: Name,

    /// The type of record requested.
    pub qtype: Type,

    /// The class of record requested.
    pub qclass: Class,
}

impl Question {
    /// Creates a new question.
    pub fn new(name: Name, qtype: Type, qclass: Class) -> Self {
        Self { name, qtype, qclass }
    }

    /// Creates an IN-class question for the given record type.
    pub fn of_type(name: Name, rtype: RecordType) -> Self {
        Self::new(name, rtype.into(), RecordClass::IN.into())
    }

    /// Creates an A (IPv4 address) question.
    pub fn a(name: Name) -> Self {
        Self::of_type(name, RecordType::A)
    }

    /// Creates an AAAA (IPv6 address) question.
    pub fn aaaa(name: Name) -> Self {
        Self::of_type(name, RecordType::AAAA)
    }

    /// Creates an NS (name server) question.
    pub fn ns(name: Name) -> Self {
        Self::of_type(name, RecordType::NS)
    }

    /// Parses a question from `message` starting at `offset`.
    ///
    /// `message` must be the complete DNS message so that a compressed
    /// QNAME can be resolved. Returns the question and the number of bytes
    /// consumed from `offset`.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(message);
        let (name, name_len) = parser.parse_name(offset)?;

        let fields = offset + name_len;
        if fields + 4 > message.len() {
            return Err(Error::unexpected_eof(fields + 4));
        }

        let qtype = Type::from_u16(u16::from_be_bytes([message[fields], message[fields + 1]]));
        let qclass = Class::from_u16(u16::from_be_bytes([
            message[fields + 2],
            message[fields + 3],
        ]));

        Ok((Self { name, qtype, qclass }, name_len + 4))
    }

    /// Returns the number of bytes this question occupies on the wire.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 4
    }

    /// Writes the question in wire format to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        self.name.write_wire(buf);
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
    }

    /// Serializes the question to a standalone byte vector.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_wire(&mut buf);
        buf.to_vec()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.qclass, self.qtype)
    }
}
