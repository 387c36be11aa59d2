//! DNS record types.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record type with first-class decoding support.
///
/// Only the types this codec interprets are enumerated; everything else is
/// carried as [`Type::Unknown`] with its RDATA kept opaque.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordType {
    /// IPv4 address - RFC 1035
    A = 1,

    /// Authoritative name server - RFC 1035
    NS = 2,

    /// IPv6 address - RFC 3596
    AAAA = 28,
}

impl RecordType {
    /// Returns the numeric value of the record type.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a record type from its numeric value.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns the human-readable name of the type.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::AAAA => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A type value that can represent both interpreted and unknown codes.
///
/// Wire values that are not interpreted by this codec survive a
/// decode/encode round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A type this codec interprets.
    Known(RecordType),
    /// Any other type code.
    Unknown(u16),
}

impl Type {
    /// Creates a type from a wire value.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        match RecordType::from_u16(value) {
            Some(rtype) => Self::Known(rtype),
            None => Self::Unknown(value),
        }
    }

    /// Returns the wire value of the type.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(rtype) => rtype.to_u16(),
            Self::Unknown(value) => value,
        }
    }

    /// Returns the record type if interpreted.
    #[inline]
    pub const fn as_known(self) -> Option<RecordType> {
        match self {
            Self::Known(rtype) => Some(rtype),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordType> for Type {
    fn from(rtype: RecordType) -> Self {
        Self::Known(rtype)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // RFC 3597 presentation for unlisted types.
            Self::Known(rtype) => write!(f, "{rtype}"),
            Self::Unknown(value) => write!(f, "TYPE{value}"),
        }
    }
}
