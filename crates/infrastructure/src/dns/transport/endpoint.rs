//! Upstream endpoint resolution.
//!
//! Endpoints are `host:port` strings where the host may be an IP literal or
//! a name resolved through the system resolver.

use shoal_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub async fn resolve(endpoint: &str, timeout: Duration) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = endpoint.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(endpoint))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: endpoint.to_string(),
        })?
        .map_err(|e| DomainError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    addrs
        .next()
        .ok_or_else(|| DomainError::InvalidEndpoint(format!("no addresses for {}", endpoint)))
}
