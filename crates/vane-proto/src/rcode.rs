//! DNS response codes.

use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS response code (RFC 1035 Section 4.1.1).
///
/// The 4-bit RCODE field in the header indicates the status of a response.
/// Values outside the named set are preserved in [`ResponseCode::Other`]
/// rather than failing the header decode; interpreting them is left to the
/// caller.
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
pub enum ResponseCode {
    /// No error condition.
    NoError = 0,

    /// The name server was unable to interpret the query.
    FormErr = 1,

    /// The name server was unable to process the query due to a problem
    /// with the name server itself.
    ServFail = 2,

    /// The domain name referenced in the query does not exist.
    NXDomain = 3,

    /// The name server does not support the requested kind of query.
    NotImp = 4,

    /// The name server refuses to perform the operation for policy reasons.
    Refused = 5,

    /// Any other 4-bit value.
    #[num_enum(catch_all)]
    Other(u8),
}

impl ResponseCode {
    /// Returns the numeric value of the response code.
    #[inline]
    pub fn to_u8(self) -> u8 {
        u8::from(self)
    }

    /// Creates a response code from a 4-bit header field value.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        Self::from(value)
    }

    /// Returns true if this code indicates success.
    #[inline]
    pub fn is_success(self) -> bool {
        self == Self::NoError
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::NoError
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoError => write!(f, "NOERROR"),
            Self::FormErr => write!(f, "FORMERR"),
            Self::ServFail => write!(f, "SERVFAIL"),
            Self::NXDomain => write!(f, "NXDOMAIN"),
            Self::NotImp => write!(f, "NOTIMP"),
            Self::Refused => write!(f, "REFUSED"),
            Self::Other(value) => write!(f, "RCODE{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rcode_values() {
        assert_eq!(ResponseCode::NoError.to_u8(), 0);
        assert_eq!(ResponseCode::FormErr.to_u8(), 1);
        assert_eq!(ResponseCode::ServFail.to_u8(), 2);
        assert_eq!(ResponseCode::NXDomain.to_u8(), 3);
        assert_eq!(ResponseCode::NotImp.to_u8(), 4);
        assert_eq!(ResponseCode::Refused.to_u8(), 5);
    }

    #[test]
    fn unassigned_rcode_round_trips() {
        let rcode = ResponseCode::from_u8(11);
        assert_eq!(rcode, ResponseCode::Other(11));
        assert_eq!(rcode.to_u8(), 11);
        assert!(!rcode.is_success());
    }
}
