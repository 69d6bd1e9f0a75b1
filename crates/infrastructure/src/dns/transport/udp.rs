//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). If the response has the TC
//! (truncated) bit set, the exchange adapter retries via TCP.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Sends `message_bytes` to `server_addr` and waits for a single datagram
/// back.
///
/// `None` means the server did not answer within `timeout` or the socket
/// reported an I/O failure; the caller may retry against another server.
pub async fn exchange(
    message_bytes: &[u8],
    server_addr: SocketAddr,
    timeout: Duration,
) -> Option<Vec<u8>> {
    let bind_addr: SocketAddr = if server_addr.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = match UdpSocket::bind(bind_addr).await {
        Ok(socket) => socket,
        Err(e) => {
            warn!(server = %server_addr, error = %e, "failed to bind UDP socket");
            return None;
        }
    };

    match tokio::time::timeout(timeout, socket.send_to(message_bytes, server_addr)).await {
        Ok(Ok(bytes_sent)) => {
            debug!(server = %server_addr, bytes_sent, "UDP query sent");
        }
        Ok(Err(e)) => {
            debug!(server = %server_addr, error = %e, "failed to send UDP query");
            return None;
        }
        Err(_) => {
            debug!(server = %server_addr, "timeout sending UDP query");
            return None;
        }
    }

    let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
    let (bytes_received, from_addr) =
        match tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf)).await {
            Ok(Ok(received)) => received,
            Ok(Err(e)) => {
                debug!(server = %server_addr, error = %e, "failed to receive UDP response");
                return None;
            }
            Err(_) => {
                debug!(server = %server_addr, "no UDP response within timeout");
                return None;
            }
        };

    if from_addr.ip() != server_addr.ip() {
        warn!(
            expected = %server_addr,
            received_from = %from_addr,
            "UDP response from unexpected source"
        );
    }

    recv_buf.truncate(bytes_received);

    debug!(server = %server_addr, bytes_received, "UDP response received");

    Some(recv_buf)
}
