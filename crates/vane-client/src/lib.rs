//! # Vane DNS Client
//!
//! A single-shot DNS query client built on [`vane_proto`]: construct a
//! request, exchange it over a transport, decode and validate the response.
//!
//! There is no retry logic, caching, or resolution chain; one request maps
//! to exactly one transport exchange. The transport is a narrow async trait
//! so tests can substitute an in-process implementation for the real UDP
//! socket.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::str::FromStr;
//! use vane_client::{ClientConfig, Request, UdpTransport};
//! use vane_proto::{Name, Question};
//!
//! # async fn lookup() -> Result<(), vane_client::ClientError> {
//! let request = Request::new(Question::a(Name::from_str("example.com")?));
//! let response = request.send(&UdpTransport, &ClientConfig::default()).await?;
//! for record in &response.records {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod request;
pub mod response;
pub mod udp;

pub use request::Request;
pub use response::Response;
pub use udp::UdpTransport;

use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced while sending a request or decoding its response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The response could not be decoded.
    #[error("protocol error: {0}")]
    Proto(#[from] vane_proto::Error),

    /// The response id does not match the query id.
    #[error("response id {received:#06x} does not match query id {sent:#06x}")]
    IdMismatch {
        /// The id sent with the query.
        sent: u16,
        /// The id found in the response header.
        received: u16,
    },

    /// The server answered with a non-zero response code.
    #[error("server error: {0}")]
    Server(ServerError),

    /// The response does not carry exactly one question.
    #[error("response carries {qdcount} questions, expected exactly 1")]
    UnsupportedQuery {
        /// The question count from the response header.
        qdcount: u16,
    },

    /// No response arrived within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// A socket operation failed.
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),
}

/// A non-zero response code reported by the server, as a typed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServerError {
    /// RCODE 1: the server could not interpret the query.
    #[error("format error (FORMERR)")]
    FormatError,

    /// RCODE 2: the server failed to process the query.
    #[error("server failure (SERVFAIL)")]
    ServerFailure,

    /// RCODE 3: the queried name does not exist.
    #[error("no such domain (NXDOMAIN)")]
    NameError,

    /// RCODE 4: the server does not support this kind of query.
    #[error("not implemented (NOTIMP)")]
    NotImplemented,

    /// RCODE 5: the server refused the query.
    #[error("query refused (REFUSED)")]
    Refused,

    /// Any other non-zero response code.
    #[error("unspecified server error (RCODE {0})")]
    Unspecified(u8),
}

impl ServerError {
    /// Maps a response code to a server error, `None` for success.
    pub fn from_rcode(rcode: vane_proto::ResponseCode) -> Option<Self> {
        use vane_proto::ResponseCode;

        match rcode {
            ResponseCode::NoError => None,
            ResponseCode::FormErr => Some(Self::FormatError),
            ResponseCode::ServFail => Some(Self::ServerFailure),
            ResponseCode::NXDomain => Some(Self::NameError),
            ResponseCode::NotImp => Some(Self::NotImplemented),
            ResponseCode::Refused => Some(Self::Refused),
            ResponseCode::Other(code) => Some(Self::Unspecified(code)),
        }
    }
}

/// Client configuration: where to send queries and how long to wait.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The DNS server to query.
    pub server: SocketAddr,

    /// How long to wait for a response before giving up.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: SocketAddr::from(([1, 1, 1, 1], 53)),
            timeout: Duration::from_secs(5),
        }
    }
}

/// A one-shot datagram exchange with a DNS server.
///
/// Implementations send one request and return one response; retries and
/// fallback servers are the caller's concern. Methods take `&self` so a
/// transport can be shared across concurrent requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `wire` to `server` and waits for a single response datagram.
    ///
    /// Returns the response bytes and the address they arrived from.
    async fn exchange(
        &self,
        wire: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<(Vec<u8>, SocketAddr)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use vane_proto::ResponseCode;

    #[test]
    fn rcode_error_mapping() {
        assert_eq!(ServerError::from_rcode(ResponseCode::NoError), None);
        assert_eq!(
            ServerError::from_rcode(ResponseCode::FormErr),
            Some(ServerError::FormatError)
        );
        assert_eq!(
            ServerError::from_rcode(ResponseCode::ServFail),
            Some(ServerError::ServerFailure)
        );
        assert_eq!(
            ServerError::from_rcode(ResponseCode::NXDomain),
            Some(ServerError::NameError)
        );
        assert_eq!(
            ServerError::from_rcode(ResponseCode::NotImp),
            Some(ServerError::NotImplemented)
        );
        assert_eq!(
            ServerError::from_rcode(ResponseCode::Refused),
            Some(ServerError::Refused)
        );
        assert_eq!(
            ServerError::from_rcode(ResponseCode::Other(9)),
            Some(ServerError::Unspecified(9))
        );
    }

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server.port(), 53);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
