//! # Vane DNS Protocol Library
//!
//! Wire format types and codecs for single-question DNS queries following
//! RFC 1035: the fixed 12-byte header, the question section, resource
//! records, and domain names with compression pointer support.
//!
//! The codec keeps the raw RDATA of every parsed record next to its typed
//! view, so a decoded message can be serialized back to the exact byte
//! sequence it was parsed from.
//!
//! ## Example
//!
//! ```rust
//! use vane_proto::{Name, Question};
//! use std::str::FromStr;
//!
//! let question = Question::a(Name::from_str("example.com").unwrap());
//! let wire = question.to_wire();
//! let (parsed, consumed) = Question::parse(&wire, 0).unwrap();
//! assert_eq!(consumed, wire.len());
//! assert_eq!(parsed, question);
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod error;
pub mod header;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod rtype;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use error::{Error, Result};
pub use header::{Header, HeaderFlags, HEADER_SIZE};
pub use name::{Name, NameParser};
pub use opcode::OpCode;
pub use question::Question;
pub use rcode::ResponseCode;
pub use rdata::RData;
pub use record::ResourceRecord;
pub use rtype::{RecordType, Type};

/// Maximum length of a DNS label (63 bytes per RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a domain name in wire format (255 bytes per RFC 1035).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS0 (512 bytes per RFC 1035).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
