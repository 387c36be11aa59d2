//! DNS domain names and wire format parsing with compression support.
//!
//! A domain name is a sequence of labels separated by dots. In wire format
//! each label is prefixed by a length byte and the name is terminated by a
//! zero-length label (the root). A name may instead end in a two-byte
//! compression pointer (RFC 1035 Section 4.1.4) whose top two bits are `11`
//! and whose low 14 bits are an absolute offset into the enclosing message.
//!
//! Names parsed through a pointer remember the exact bytes they occupied in
//! the message, so re-serializing a decoded message reproduces the original
//! byte sequence including compression.

use crate::error::{Error, Result};
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Maximum number of compression pointer jumps to prevent unbounded loops.
const MAX_COMPRESSION_JUMPS: usize = 32;

/// A DNS domain name.
///
/// The name is stored in uncompressed wire form (length-prefixed labels
/// terminated by a zero byte). Comparison and hashing are case-insensitive
/// per RFC 1035; a trailing dot in the string form is not significant.
///
/// A name that was decoded through a compression pointer, or built with
/// [`Name::compressed_to`], additionally carries the verbatim byte sequence
/// it occupies in the enclosing message and re-emits those bytes on encode.
///
/// # Example
///
/// ```rust
/// use vane_proto::Name;
/// use std::str::FromStr;
///
/// let name = Name::from_str("www.example.com").unwrap();
/// assert_eq!(name.to_string(), "www.example.com.");
/// assert_eq!(name, Name::from_str("WWW.EXAMPLE.COM.").unwrap());
/// ```
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire form, always ending with the root label.
    wire: SmallVec<[u8; 64]>,
    /// Verbatim message bytes (inline labels plus 2-byte pointer) when this
    /// name is a compressed reference.
    compressed: Option<SmallVec<[u8; 16]>>,
}

impl Name {
    /// Creates the root domain name.
    pub fn root() -> Self {
        Self {
            wire: SmallVec::from_slice(&[0]),
            compressed: None,
        }
    }

    /// Returns true if this is the root domain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns the uncompressed wire form (labels plus terminating zero).
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Returns true if this name encodes as a compression reference.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.compressed.is_some()
    }

    /// Returns the number of bytes this name occupies on the wire.
    ///
    /// For a compressed reference this is the length of the inline prefix
    /// plus the 2-byte pointer, not the length of the labels it points to.
    #[inline]
    pub fn wire_len(&self) -> usize {
        match &self.compressed {
            Some(raw) => raw.len(),
            None => self.wire.len(),
        }
    }

    /// Returns a copy of this name that encodes as a pointer to `offset`.
    ///
    /// The logical labels are kept for display and comparison; only the
    /// wire representation changes. Fails if the offset does not fit in the
    /// 14 bits a pointer can carry.
    pub fn compressed_to(&self, offset: u16) -> Result<Self> {
        if offset >= 0x4000 {
            return Err(Error::invalid_data(
                offset as usize,
                "compression pointer offset exceeds 14 bits",
            ));
        }
        let pointer = 0xC000 | offset;
        Ok(Self {
            wire: self.wire.clone(),
            compressed: Some(SmallVec::from_slice(&pointer.to_be_bytes())),
        })
    }

    /// Returns an iterator over the labels of the name, leftmost first.
    ///
    /// The empty root label is not yielded.
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter { wire: &self.wire, pos: 0 }
    }

    /// Returns the number of labels, excluding the root.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Writes the name in wire format to a buffer.
    ///
    /// Emits the verbatim compressed form when present, otherwise the
    /// length-prefixed labels and terminating zero.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        match &self.compressed {
            Some(raw) => buf.extend_from_slice(raw),
            None => buf.extend_from_slice(&self.wire),
        }
    }

    fn lowercase_hash<H: Hasher>(&self, state: &mut H) {
        for &byte in self.wire.iter() {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a domain name from dotted string form.
    ///
    /// A trailing dot is accepted and ignored; empty labels are skipped.
    /// Fails with [`Error::LabelTooLong`] if any label exceeds 63 bytes,
    /// before any wire bytes are produced.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);

        for label in s.split('.') {
            if label.len() > MAX_LABEL_LENGTH {
                return Err(Error::LabelTooLong { length: label.len() });
            }
        }

        let mut wire = SmallVec::<[u8; 64]>::new();
        for label in s.split('.').filter(|l| !l.is_empty()) {
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
        wire.push(0);

        if wire.len() > MAX_NAME_LENGTH {
            return Err(Error::NameTooLong { length: wire.len() });
        }

        Ok(Self { wire, compressed: None })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for label in self.labels() {
            write!(f, "{}.", String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{self}\")")
    }
}

impl PartialEq for Name {
    /// Case-insensitive comparison per DNS semantics.
    ///
    /// Length bytes are at most 63 and therefore unaffected by ASCII case
    /// folding, so the whole wire form can be compared directly.
    fn eq(&self, other: &Self) -> bool {
        self.wire.eq_ignore_ascii_case(&other.wire)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lowercase_hash(state);
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Iterator over the labels of a [`Name`].
#[derive(Debug, Clone)]
pub struct LabelIter<'a> {
    wire: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let len = *self.wire.get(self.pos)? as usize;
        if len == 0 {
            return None;
        }
        let start = self.pos + 1;
        self.pos = start + len;
        self.wire.get(start..start + len)
    }
}

/// Parser for reading domain names from DNS wire format.
///
/// The parser holds the complete message buffer so that compression
/// pointers, which carry absolute message offsets, can be resolved.
#[derive(Debug, Clone, Copy)]
pub struct NameParser<'a> {
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a new name parser over the given message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Parses a domain name starting at the given offset.
    ///
    /// Returns the parsed name and the number of bytes consumed from the
    /// starting position. The consumed count is exactly what a caller must
    /// advance its cursor by to reach the field after the name: a pointer
    /// costs 2 bytes from the original cursor no matter how many bytes are
    /// read after following the jump, and the terminating zero costs 1 byte
    /// only when no pointer was followed.
    pub fn parse_name(&self, offset: usize) -> Result<(Name, usize)> {
        let mut wire = SmallVec::<[u8; 64]>::new();
        let mut consumed = 0;
        let mut pos = offset;
        let mut jumps = 0;
        let mut followed_pointer = false;

        loop {
            if pos >= self.message.len() {
                return Err(Error::unexpected_eof(pos));
            }

            let len_byte = self.message[pos];

            // Compression pointer: top two bits are 11.
            if len_byte >= 0xC0 {
                if pos + 1 >= self.message.len() {
                    return Err(Error::unexpected_eof(pos + 1));
                }

                let pointer = u16::from_be_bytes([len_byte & 0x3F, self.message[pos + 1]]);
                let target = pointer as usize;

                // A pointer must reference earlier bytes; forward and
                // self-references cannot terminate.
                if target >= pos {
                    return Err(Error::InvalidCompressionPointer {
                        offset: pos,
                        target,
                    });
                }

                if !followed_pointer {
                    consumed = pos - offset + 2;
                    followed_pointer = true;
                }

                jumps += 1;
                if jumps > MAX_COMPRESSION_JUMPS {
                    return Err(Error::TooManyCompressionJumps {
                        max_jumps: MAX_COMPRESSION_JUMPS,
                    });
                }

                pos = target;
                continue;
            }

            // Label type bits 01 and 10 are reserved.
            if len_byte >= 0x40 {
                return Err(Error::invalid_data(
                    pos,
                    format!("invalid label type 0x{len_byte:02X}"),
                ));
            }

            let len = len_byte as usize;

            // Root label terminates the name.
            if len == 0 {
                wire.push(0);
                if !followed_pointer {
                    consumed = pos - offset + 1;
                }
                break;
            }

            if pos + 1 + len > self.message.len() {
                return Err(Error::unexpected_eof(pos + 1 + len));
            }

            if wire.len() + 1 + len + 1 > MAX_NAME_LENGTH {
                return Err(Error::NameTooLong {
                    length: wire.len() + 1 + len + 1,
                });
            }

            wire.push(len as u8);
            wire.extend_from_slice(&self.message[pos + 1..pos + 1 + len]);
            pos += 1 + len;
        }

        let compressed = if followed_pointer {
            Some(SmallVec::from_slice(&self.message[offset..offset + consumed]))
        } else {
            None
        };

        Ok((Name { wire, compressed }, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_name() {
        let root = Name::root();
        assert!(root.is_root());
        assert_eq!(root.label_count(), 0);
        assert_eq!(root.to_string(), ".");
        assert_eq!(root.wire_len(), 1);
    }

    #[test]
    fn name_from_str() {
        let name = Name::from_str("www.example.com.").unwrap();
        assert_eq!(name.label_count(), 3);
        assert_eq!(name.to_string(), "www.example.com.");

        // Trailing dot is not significant.
        assert_eq!(name, Name::from_str("www.example.com").unwrap());
    }

    #[test]
    fn case_insensitive_comparison() {
        let lower = Name::from_str("www.example.com").unwrap();
        let upper = Name::from_str("WWW.EXAMPLE.COM").unwrap();
        assert_eq!(lower, upper);

        use std::collections::hash_map::DefaultHasher;
        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        lower.hash(&mut h1);
        upper.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn label_too_long_rejected_before_encoding() {
        let long_label = format!("{}.com", "a".repeat(64));
        let result = Name::from_str(&long_label);
        assert!(matches!(result, Err(Error::LabelTooLong { length: 64 })));
    }

    #[test]
    fn encode_example_com() {
        let name = Name::from_str("example.com").unwrap();
        assert_eq!(
            name.as_wire(),
            &[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]
        );
        assert_eq!(name.wire_len(), 13);
    }

    #[test]
    fn compressed_to_emits_pointer() {
        let name = Name::from_str("example.com").unwrap();
        let compressed = name.compressed_to(12).unwrap();

        assert!(compressed.is_compressed());
        assert_eq!(compressed.wire_len(), 2);
        assert_eq!(compressed, name);

        let mut buf = BytesMut::new();
        compressed.write_wire(&mut buf);
        assert_eq!(buf.as_ref(), &[0xC0, 0x0C]);
    }

    #[test]
    fn compressed_to_rejects_wide_offset() {
        let name = Name::from_str("example.com").unwrap();
        assert!(name.compressed_to(0x4000).is_err());
    }

    #[test]
    fn parse_simple_name() {
        let wire = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];

        let parser = NameParser::new(&wire);
        let (name, consumed) = parser.parse_name(0).unwrap();

        assert_eq!(name.to_string(), "www.example.com.");
        assert_eq!(consumed, wire.len());
        assert!(!name.is_compressed());
    }

    #[test]
    fn parse_compressed_name() {
        // example.com. at offset 0, www.<ptr 0> at offset 13.
        let wire = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // offset 0
            3, b'w', b'w', b'w', 0xC0, 0x00, // offset 13
        ];

        let parser = NameParser::new(&wire);

        let (name1, consumed1) = parser.parse_name(0).unwrap();
        assert_eq!(name1.to_string(), "example.com.");
        assert_eq!(consumed1, 13);

        // The pointer costs 2 bytes from the original cursor, not the length
        // of the labels it points to.
        let (name2, consumed2) = parser.parse_name(13).unwrap();
        assert_eq!(name2.to_string(), "www.example.com.");
        assert_eq!(consumed2, 6);
    }

    #[test]
    fn compressed_name_reencodes_verbatim() {
        let wire = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
            3, b'w', b'w', b'w', 0xC0, 0x00,
        ];

        let parser = NameParser::new(&wire);
        let (name, consumed) = parser.parse_name(13).unwrap();

        let mut buf = BytesMut::new();
        name.write_wire(&mut buf);
        assert_eq!(buf.as_ref(), &wire[13..13 + consumed]);
    }

    #[test]
    fn pointer_only_name_consumes_two_bytes() {
        let mut wire = vec![0u8; 12];
        wire.extend_from_slice(&[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]);
        let record_name_offset = wire.len();
        wire.extend_from_slice(&[0xC0, 0x0C]);

        let parser = NameParser::new(&wire);
        let (name, consumed) = parser.parse_name(record_name_offset).unwrap();

        assert_eq!(consumed, 2);
        assert_eq!(name, Name::from_str("example.com").unwrap());
    }

    #[test]
    fn self_pointer_rejected() {
        let wire = [0xC0, 0x00];
        let parser = NameParser::new(&wire);
        assert!(matches!(
            parser.parse_name(0),
            Err(Error::InvalidCompressionPointer { offset: 0, target: 0 })
        ));
    }

    #[test]
    fn forward_pointer_rejected() {
        let wire = [3, b'w', b'w', b'w', 0xC0, 0x10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let parser = NameParser::new(&wire);
        assert!(matches!(
            parser.parse_name(0),
            Err(Error::InvalidCompressionPointer { .. })
        ));
    }

    #[test]
    fn truncated_label_rejected() {
        let wire = [7, b'e', b'x', b'a'];
        let parser = NameParser::new(&wire);
        assert!(matches!(parser.parse_name(0), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn missing_terminator_rejected() {
        let wire = [3, b'c', b'o', b'm'];
        let parser = NameParser::new(&wire);
        assert!(matches!(parser.parse_name(0), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn reserved_label_type_rejected() {
        let wire = [0x40, 0, 0];
        let parser = NameParser::new(&wire);
        assert!(matches!(parser.parse_name(0), Err(Error::InvalidData { .. })));
    }
}
