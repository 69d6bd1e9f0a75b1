//! `ZoneTransferSession` adapter: AXFR over a framed TCP stream.

use super::query_builder::QueryBuilder;
use super::response_decoder::ResponseDecoder;
use super::transport::{endpoint, tcp};
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use shoal_dns_application::ports::{TransferBatch, ZoneTransferSession};
use shoal_dns_domain::DomainError;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const DEFAULT_TRANSFER_TIMEOUT: Duration = Duration::from_secs(10);
const BATCH_CHANNEL_CAPACITY: usize = 4;

pub struct TcpTransferClient {
    timeout: Duration,
}

impl TcpTransferClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpTransferClient {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFER_TIMEOUT)
    }
}

#[async_trait]
impl ZoneTransferSession for TcpTransferClient {
    async fn open(
        &self,
        zone: &str,
        server: &str,
    ) -> Result<mpsc::Receiver<TransferBatch>, DomainError> {
        let server_addr = endpoint::resolve(server, self.timeout).await?;
        let (id, query_bytes) = QueryBuilder::build_axfr(zone)?;

        let mut stream = tcp::connect(server_addr, self.timeout).await?;
        tokio::time::timeout(
            self.timeout,
            tcp::send_with_length_prefix(&mut stream, &query_bytes),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })??;

        debug!(zone, server, "zone transfer opened");

        let (tx, rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
        let timeout = self.timeout;
        let server = server.to_string();
        tokio::spawn(async move {
            stream_batches(stream, id, timeout, server, tx).await;
        });

        Ok(rx)
    }
}

/// Reads framed answer messages until the zone's closing SOA, delivering
/// each message's records as one batch. A mid-stream failure becomes an
/// error batch followed by end-of-stream; the consumer decides whether to
/// skip it.
async fn stream_batches(
    mut stream: TcpStream,
    expected_id: u16,
    timeout: Duration,
    server: String,
    tx: mpsc::Sender<TransferBatch>,
) {
    // AXFR frames the zone between two SOA records; the second closes it.
    let mut soa_seen = 0usize;

    loop {
        let frame = tokio::time::timeout(timeout, tcp::read_with_length_prefix(&mut stream)).await;
        let bytes = match frame {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(err)) => {
                let _ = tx.send(Err(err)).await;
                break;
            }
            Err(_) => {
                let _ = tx
                    .send(Err(DomainError::TransportTimeout {
                        server: server.clone(),
                    }))
                    .await;
                break;
            }
        };

        let message = match Message::from_vec(&bytes) {
            Ok(message) => message,
            Err(e) => {
                let _ = tx
                    .send(Err(DomainError::InvalidDnsResponse(format!(
                        "failed to parse transfer message: {}",
                        e
                    ))))
                    .await;
                break;
            }
        };

        if message.id() != expected_id {
            warn!(
                server = server.as_str(),
                expected = expected_id,
                received = message.id(),
                "transfer message ID mismatch, skipping frame"
            );
            continue;
        }

        if message.response_code() != ResponseCode::NoError {
            let _ = tx
                .send(Err(DomainError::InvalidDnsResponse(format!(
                    "zone transfer refused: {:?}",
                    message.response_code()
                ))))
                .await;
            break;
        }

        soa_seen += message
            .answers()
            .iter()
            .filter(|record| matches!(record.data(), RData::SOA(_)))
            .count();

        let decoded = ResponseDecoder::from_message(&message);
        if tx.send(Ok(decoded.records)).await.is_err() {
            // Consumer dropped the stream; stop reading.
            break;
        }

        if soa_seen >= 2 {
            debug!(server = server.as_str(), "zone transfer complete");
            break;
        }
    }
}
