//! TCP transport with RFC 1035 §4.2.2 two-byte length framing.
//!
//! Used for the truncated-response retry and for zone transfers, both of
//! which are one-shot conversations; connections are not pooled.

use shoal_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub async fn connect(server_addr: SocketAddr, timeout: Duration) -> Result<TcpStream, DomainError> {
    let stream = tokio::time::timeout(timeout, TcpStream::connect(server_addr))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| {
            debug!(server = %server_addr, error = %e, "TCP connect failed");
            DomainError::TransportConnectionRefused {
                server: server_addr.to_string(),
            }
        })?;

    stream
        .set_nodelay(true)
        .map_err(|e| DomainError::IoError(format!("failed to set TCP_NODELAY: {}", e)))?;

    Ok(stream)
}

/// One-shot framed query: connect, send, read a single response.
pub async fn exchange(
    message_bytes: &[u8],
    server_addr: SocketAddr,
    timeout: Duration,
) -> Result<Vec<u8>, DomainError> {
    let mut stream = connect(server_addr, timeout).await?;

    tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })??;

    debug!(server = %server_addr, message_len = message_bytes.len(), "TCP query sent");

    let response = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })??;

    debug!(server = %server_addr, response_len = response.len(), "TCP response received");

    Ok(response)
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = message_bytes.len() as u16;
    let length_bytes = length.to_be_bytes();

    stream
        .write_all(&length_bytes)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to write length prefix: {}", e)))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("failed to flush stream: {}", e)))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to read response length: {}", e)))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    if response_len > MAX_TCP_MESSAGE_SIZE {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response too large: {} bytes (max {})",
            response_len, MAX_TCP_MESSAGE_SIZE
        )));
    }

    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| DomainError::IoError(format!("failed to read response body: {}", e)))?;

    Ok(response)
}
