//! DNS message header.
//!
//! The header is a fixed 12-byte structure at the start of every DNS
//! message: a 16-bit id, a bit-packed flags word, and four 16-bit section
//! counts, all big-endian.

use crate::error::{Error, Result};
use crate::opcode::OpCode;
use crate::rcode::ResponseCode;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the DNS header in bytes.
pub const HEADER_SIZE: usize = 12;

bitflags! {
    /// DNS header flags.
    ///
    /// Bit positions follow the RFC 2535 extended layout: the reserved Z
    /// field is a single bit, followed by the AD and CD bits. An
    /// implementation that treats Z as three reserved bits produces the
    /// same wire bytes for ordinary queries, since all three bits are zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HeaderFlags: u16 {
        /// Query/Response: 0 = query, 1 = response.
        const QR = 0x8000;

        /// Authoritative Answer.
        const AA = 0x0400;

        /// Truncation.
        const TC = 0x0200;

        /// Recursion Desired.
        const RD = 0x0100;

        /// Recursion Available.
        const RA = 0x0080;

        /// Reserved, must be zero.
        const Z = 0x0040;

        /// Authentic Data (RFC 2535).
        const AD = 0x0020;

        /// Checking Disabled (RFC 2535).
        const CD = 0x0010;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// DNS message header.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// The header is a plain mutable value; a caller that owns a request may
/// flip individual flags after construction and before serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Message identifier for matching requests to responses.
    pub id: u16,

    /// Single-bit flags.
    pub flags: HeaderFlags,

    /// Operation code.
    pub opcode: OpCode,

    /// Response code.
    pub rcode: ResponseCode,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new empty header with the given message id.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a query header: recursion desired, one question.
    pub const fn query(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::RD,
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qd_count: 1,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Returns true if recursion is available.
    #[inline]
    pub fn recursion_available(&self) -> bool {
        self.flags.contains(HeaderFlags::RA)
    }

    /// Sets the QR flag (marks as response).
    #[inline]
    pub fn set_response(&mut self, response: bool) {
        self.flags.set(HeaderFlags::QR, response);
    }

    /// Sets the RD flag.
    #[inline]
    pub fn set_recursion_desired(&mut self, rd: bool) {
        self.flags.set(HeaderFlags::RD, rd);
    }

    /// Parses a header from the first 12 bytes of `data`.
    ///
    /// Only a too-short buffer can fail: opcode and rcode values outside
    /// the named sets are preserved, not rejected, so validation stays the
    /// caller's decision.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::buffer_too_short(HEADER_SIZE, data.len()));
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let flags_raw = u16::from_be_bytes([data[2], data[3]]);

        let opcode = OpCode::from_u8(((flags_raw >> 11) & 0x0F) as u8);
        let rcode = ResponseCode::from_u8((flags_raw & 0x0F) as u8);
        let flags = HeaderFlags::from_bits_truncate(flags_raw);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qd_count: u16::from_be_bytes([data[4], data[5]]),
            an_count: u16::from_be_bytes([data[6], data[7]]),
            ns_count: u16::from_be_bytes([data[8], data[9]]),
            ar_count: u16::from_be_bytes([data[10], data[11]]),
        })
    }

    /// Serializes the header to its fixed 12-byte wire form.
    pub fn to_wire(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());

        let mut flags_raw = self.flags.bits();
        flags_raw |= u16::from(self.opcode.to_u8() & 0x0F) << 11;
        flags_raw |= u16::from(self.rcode.to_u8() & 0x0F);

        buf[2..4].copy_from_slice(&flags_raw.to_be_bytes());
        buf[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.ar_count.to_be_bytes());

        buf
    }

    /// Writes the header to a buffer.
    pub fn write_to(&self, buf: &mut bytes::BytesMut) {
        buf.extend_from_slice(&self.to_wire());
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id:{:04X} {} {} {}",
            self.id,
            if self.is_query() { "query" } else { "response" },
            self.opcode,
            self.rcode
        )?;

        if self.is_truncated() {
            write!(f, " TC")?;
        }
        if self.recursion_desired() {
            write!(f, " RD")?;
        }
        if self.recursion_available() {
            write!(f, " RA")?;
        }

        write!(
            f,
            " qd:{} an:{} ns:{} ar:{}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_header_wire_bytes() {
        let header = Header::query(0x1234);
        let wire = header.to_wire();

        // id, RD flag in the first flag byte, qdcount = 1.
        assert_eq!(&wire[0..2], &[0x12, 0x34]);
        assert_eq!(&wire[2..4], &[0x01, 0x00]);
        assert_eq!(&wire[4..6], &[0x00, 0x01]);
        assert_eq!(&wire[6..12], &[0x00; 6]);
    }

    #[test]
    fn header_roundtrip() {
        let mut header = Header::query(0xABCD);
        header.an_count = 3;
        header.ar_count = 1;

        let wire = header.to_wire();
        let parsed = Header::parse(&wire).unwrap();

        assert_eq!(parsed, header);
    }

    #[test]
    fn flag_bit_positions() {
        let mut header = Header::new(0);
        header.set_response(true);
        assert_eq!(header.to_wire()[2], 0x80);

        let mut header = Header::new(0);
        header.flags.insert(HeaderFlags::AA);
        assert_eq!(header.to_wire()[2], 0x04);

        let mut header = Header::new(0);
        header.flags.insert(HeaderFlags::RA);
        assert_eq!(header.to_wire()[3], 0x80);

        let mut header = Header::new(0);
        header.opcode = OpCode::IQuery;
        assert_eq!(header.to_wire()[2], 0x08);

        let mut header = Header::new(0);
        header.rcode = ResponseCode::NXDomain;
        assert_eq!(header.to_wire()[3], 0x03);
    }

    #[test]
    fn response_flags_survive_roundtrip() {
        // A response word with RA, AD and rcode set, as a resolver would send.
        let wire = [0x00, 0x01, 0x81, 0xA3, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let parsed = Header::parse(&wire).unwrap();

        assert!(parsed.is_response());
        assert!(parsed.recursion_desired());
        assert!(parsed.recursion_available());
        assert_eq!(parsed.rcode, ResponseCode::NXDomain);
        assert_eq!(parsed.to_wire(), wire);
    }

    #[test]
    fn parse_too_short() {
        let result = Header::parse(&[0; 10]);
        assert!(matches!(result, Err(Error::BufferTooShort { .. })));
    }

    #[test]
    fn flag_flip_after_construction() {
        let mut header = Header::query(1);
        header.set_response(true);
        assert!(header.is_response());
        assert_eq!(header.to_wire()[2] & 0x80, 0x80);
    }
}
