//! DNS response decoding and validation.

use crate::{ClientError, Request, Result, ServerError};
use bytes::BytesMut;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use vane_proto::{Header, Question, ResourceRecord, HEADER_SIZE};

/// A decoded and validated DNS response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The response header.
    pub header: Header,

    /// The echoed question.
    pub question: Question,

    /// The answer section records, in wire order.
    pub records: Vec<ResourceRecord>,

    /// The address the response arrived from.
    pub peer: SocketAddr,
}

impl Response {
    /// Decodes a response and validates it against the originating request.
    ///
    /// Checks run in a fixed order, cheapest first, and decoding stops at
    /// the first failure:
    ///
    /// 1. The response id must equal the query id ([`ClientError::IdMismatch`]).
    /// 2. The response code must be zero; a non-zero code becomes a typed
    ///    [`ServerError`] and no sections are decoded.
    /// 3. The header must report exactly one question
    ///    ([`ClientError::UnsupportedQuery`]).
    ///
    /// Only then are the question and `ancount` answer records decoded.
    /// Authority and additional sections are not decoded; their records
    /// would follow the answers and are ignored.
    pub fn parse(request: &Request, message: &[u8], peer: SocketAddr) -> Result<Self> {
        let header = Header::parse(message)?;

        if header.id != request.id() {
            return Err(ClientError::IdMismatch {
                sent: request.id(),
                received: header.id,
            });
        }

        if let Some(error) = ServerError::from_rcode(header.rcode) {
            tracing::debug!(rcode = %header.rcode, "server returned error rcode");
            return Err(ClientError::Server(error));
        }

        if header.qd_count != 1 {
            return Err(ClientError::UnsupportedQuery {
                qdcount: header.qd_count,
            });
        }

        let (question, question_len) = Question::parse(message, HEADER_SIZE)?;
        let mut offset = HEADER_SIZE + question_len;

        let mut records = Vec::with_capacity(header.an_count as usize);
        for _ in 0..header.an_count {
            let (record, consumed) = ResourceRecord::parse(message, offset)?;
            tracing::trace!(record = %record, consumed, "decoded answer record");
            offset += consumed;
            records.push(record);
        }

        Ok(Self {
            header,
            question,
            records,
            peer,
        })
    }

    /// Serializes the response back to wire format.
    ///
    /// Emits the header, question, and answer records in order. Names and
    /// RDATA parsed through compression pointers are re-emitted verbatim, so
    /// for a response whose sections were fully decoded this reproduces the
    /// received bytes exactly.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(
            HEADER_SIZE
                + self.question.wire_len()
                + self.records.iter().map(ResourceRecord::wire_len).sum::<usize>(),
        );

        self.header.write_to(&mut buf);
        self.question.write_wire(&mut buf);
        for record in &self.records {
            record.write_wire(&mut buf);
        }

        buf.to_vec()
    }

    /// Returns the IP addresses from A and AAAA answer records.
    pub fn addresses(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.records.iter().filter_map(|record| match &record.rdata {
            vane_proto::RData::A(addr) => Some(IpAddr::V4(*addr)),
            vane_proto::RData::AAAA(addr) => Some(IpAddr::V6(*addr)),
            _ => None,
        })
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, ";; {}", self.question)?;
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}
