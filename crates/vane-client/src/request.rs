//! DNS request construction and sending.

use crate::{ClientConfig, Response, Result, Transport};
use bytes::BytesMut;
use std::fmt;
use vane_proto::{Header, Question};

/// A single-question DNS query.
///
/// The header and question are plain public fields; a caller may adjust
/// flags (for example clearing RD) between construction and sending.
#[derive(Debug, Clone)]
pub struct Request {
    /// The message header, preconfigured as a recursive query.
    pub header: Header,

    /// The single question.
    pub question: Question,
}

impl Request {
    /// Creates a request with a fresh random message id.
    pub fn new(question: Question) -> Self {
        Self::with_id(rand::random(), question)
    }

    /// Creates a request with an explicit message id.
    ///
    /// Useful in tests; production callers should prefer [`Request::new`]
    /// so response matching is not predictable.
    pub fn with_id(id: u16, question: Question) -> Self {
        Self {
            header: Header::query(id),
            question,
        }
    }

    /// Returns the message id of this request.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Serializes the request to wire format: header followed by question.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(vane_proto::HEADER_SIZE + self.question.wire_len());
        self.header.write_to(&mut buf);
        self.question.write_wire(&mut buf);
        buf.to_vec()
    }

    /// Sends the request and decodes the response.
    ///
    /// Performs exactly one exchange over `transport`; there is no retry.
    /// The response is validated against this request (id match, response
    /// code, question count) before its sections are decoded.
    pub async fn send(&self, transport: &dyn Transport, config: &ClientConfig) -> Result<Response> {
        let wire = self.to_wire();

        tracing::debug!(
            id = self.id(),
            question = %self.question,
            server = %config.server,
            len = wire.len(),
            "sending query"
        );

        let (bytes, peer) = transport
            .exchange(&wire, config.server, config.timeout)
            .await?;

        tracing::debug!(len = bytes.len(), %peer, "received response");

        Response::parse(self, &bytes, peer)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.header, self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use vane_proto::Name;

    #[test]
    fn request_wire_layout() {
        let request = Request::with_id(
            0xABCD,
            Question::a(Name::from_str("example.com").unwrap()),
        );
        let wire = request.to_wire();

        assert_eq!(wire.len(), 29);
        // Header id, then the question immediately after the 12-byte header.
        assert_eq!(&wire[0..2], &[0xAB, 0xCD]);
        assert_eq!(&wire[12..], request.question.to_wire().as_slice());
    }

    #[test]
    fn fresh_requests_use_distinct_ids() {
        let question = Question::a(Name::from_str("example.com").unwrap());
        let ids: std::collections::HashSet<u16> = (0..32)
            .map(|_| Request::new(question.clone()).id())
            .collect();
        // 32 draws from a 16-bit space; a wholesale collision means the id
        // source is broken, not unlucky.
        assert!(ids.len() > 1);
    }

    #[test]
    fn header_flags_adjustable_before_send() {
        let mut request = Request::with_id(1, Question::a(Name::from_str("a.example").unwrap()));
        request.header.set_recursion_desired(false);
        assert_eq!(request.to_wire()[2], 0x00);
    }
}
