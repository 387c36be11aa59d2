//! DNS operation codes.

use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS operation code (RFC 1035 Section 4.1.1).
///
/// Header decoding never fails on an unassigned opcode; such values are
/// preserved in [`OpCode::Reserved`] so a response flags word survives a
/// round trip byte-for-byte.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    FromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum OpCode {
    /// Standard query (QUERY) - RFC 1035
    Query = 0,

    /// Inverse query (IQUERY) - RFC 1035, obsoleted by RFC 3425
    IQuery = 1,

    /// Server status request (STATUS) - RFC 1035
    Status = 2,

    /// Any other 4-bit value.
    #[num_enum(catch_all)]
    Reserved(u8),
}

impl OpCode {
    /// Returns the numeric value of the opcode.
    #[inline]
    pub fn to_u8(self) -> u8 {
        u8::from(self)
    }

    /// Creates an opcode from a 4-bit header field value.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        Self::from(value)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "QUERY"),
            Self::IQuery => write!(f, "IQUERY"),
            Self::Status => write!(f, "STATUS"),
            Self::Reserved(value) => write!(f, "OPCODE{value}"),
        }
    }
}

impl Default for OpCode {
    fn default() -> Self {
        Self::Query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_values() {
        assert_eq!(OpCode::Query.to_u8(), 0);
        assert_eq!(OpCode::IQuery.to_u8(), 1);
        assert_eq!(OpCode::Status.to_u8(), 2);
    }

    #[test]
    fn reserved_opcode_round_trips() {
        let op = OpCode::from_u8(9);
        assert_eq!(op, OpCode::Reserved(9));
        assert_eq!(op.to_u8(), 9);
        assert_eq!(op.to_string(), "OPCODE9");
    }
}
