//! DNS record classes.
//!
//! While multiple classes were envisioned, IN (Internet) is used almost
//! exclusively; other class codes are carried through opaquely.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNS record class.
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
pub enum RecordClass {
    /// Internet - RFC 1035
    IN = 1,
}

impl RecordClass {
    /// Returns the numeric value of the class.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a class from its numeric value.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IN")
    }
}

impl Default for RecordClass {
    fn default() -> Self {
        Self::IN
    }
}

/// A class value that can represent both known and unknown codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    /// A known, standard class.
    Known(RecordClass),
    /// An unknown class value.
    Unknown(u16),
}

impl Class {
    /// Creates a class from a wire value.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        match RecordClass::from_u16(value) {
            Some(rclass) => Self::Known(rclass),
            None => Self::Unknown(value),
        }
    }

    /// Returns the wire value of the class.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(rclass) => rclass.to_u16(),
            Self::Unknown(value) => value,
        }
    }

    /// Returns the record class if known.
    #[inline]
    pub const fn as_known(self) -> Option<RecordClass> {
        match self {
            Self::Known(rclass) => Some(rclass),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordClass> for Class {
    fn from(rclass: RecordClass) -> Self {
        Self::Known(rclass)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(rclass) => write!(f, "{rclass}"),
            Self::Unknown(value) => write!(f, "CLASS{value}"),
        }
    }
}
