//! `DnsExchange` adapter: UDP with a one-shot TCP retry when the response
//! comes back truncated.
//!
//! Anything that keeps a response from arriving at all (timeout, unreachable
//! or unresolvable server) is reported as `Ok(None)` so the caller can
//! rotate to the next server; only a response that cannot be decoded is a
//! hard error.

use super::query_builder::QueryBuilder;
use super::response_decoder::ResponseDecoder;
use super::transport::{endpoint, tcp, udp};
use async_trait::async_trait;
use shoal_dns_application::ports::{DnsAnswer, DnsExchange};
use shoal_dns_domain::{DnsQuestion, DomainError};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct UdpExchange {
    timeout: Duration,
}

impl UdpExchange {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_millis(timeout_ms: u64) -> Self {
        Self::new(Duration::from_millis(timeout_ms))
    }
}

impl Default for UdpExchange {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl DnsExchange for UdpExchange {
    async fn exchange(
        &self,
        question: &DnsQuestion,
        server: &str,
    ) -> Result<Option<DnsAnswer>, DomainError> {
        let (id, query_bytes) = QueryBuilder::build(question)?;

        let server_addr = match endpoint::resolve(server, self.timeout).await {
            Ok(addr) => addr,
            Err(err) => {
                debug!(server, error = %err, "endpoint unresolvable, treating as no response");
                return Ok(None);
            }
        };

        let Some(response_bytes) = udp::exchange(&query_bytes, server_addr, self.timeout).await
        else {
            return Ok(None);
        };

        let decoded = ResponseDecoder::parse(&response_bytes)?;
        if decoded.id != id {
            warn!(
                server,
                expected = id,
                received = decoded.id,
                "response ID mismatch, discarding"
            );
            return Ok(None);
        }

        if decoded.truncated {
            debug!(server, name = %question.name, "response truncated, retrying over TCP");
            match tcp::exchange(&query_bytes, server_addr, self.timeout).await {
                Ok(bytes) => {
                    let full = ResponseDecoder::parse(&bytes)?;
                    return Ok(Some(DnsAnswer::new(full.records)));
                }
                Err(err) => {
                    // The truncated UDP answer still counts as a received
                    // response.
                    warn!(server, error = %err, "TCP retry failed, keeping truncated answer");
                }
            }
        }

        Ok(Some(DnsAnswer::new(decoded.records)))
    }
}
