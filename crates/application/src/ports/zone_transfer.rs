use async_trait::async_trait;
use shoal_dns_domain::{AnswerRecord, DomainError};
use tokio::sync::mpsc;

/// One batch of records from an in-flight zone transfer. A batch carrying an
/// error is skipped by the consumer; it does not abort the transfer.
pub type TransferBatch = Result<Vec<AnswerRecord>, DomainError>;

/// Bulk zone-transfer (AXFR) primitive.
#[async_trait]
pub trait ZoneTransferSession: Send + Sync {
    /// Opens a transfer for `zone` against `endpoint` (`host:port`).
    ///
    /// Failing to open the session is the only hard error; the returned
    /// receiver yields answer batches lazily until the transfer ends.
    async fn open(
        &self,
        zone: &str,
        endpoint: &str,
    ) -> Result<mpsc::Receiver<TransferBatch>, DomainError>;
}
