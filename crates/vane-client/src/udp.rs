//! UDP datagram transport.

use crate::{ClientError, Result, Transport};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use vane_proto::MAX_UDP_MESSAGE_SIZE;

/// Sends each query over a fresh UDP socket.
///
/// A socket bound to an ephemeral port is created per exchange and dropped
/// when the exchange resolves, on success, timeout, or error alike. Binding
/// per query also gives each request a fresh source port.
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpTransport;

#[async_trait]
impl Transport for UdpTransport {
    async fn exchange(
        &self,
        wire: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<(Vec<u8>, SocketAddr)> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await?;
        socket.send_to(wire, server).await?;

        tracing::trace!(local = %socket.local_addr()?, %server, "query sent");

        let mut buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];
        let (len, peer) = tokio::time::timeout(timeout, socket.recv_from(&mut buf))
            .await
            .map_err(|_| ClientError::Timeout)??;

        buf.truncate(len);
        Ok((buf, peer))
    }
}
