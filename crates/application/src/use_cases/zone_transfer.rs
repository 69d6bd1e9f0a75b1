use crate::ports::ZoneTransferSession;
use shoal_dns_domain::{AnswerRecord, DomainError};
use tracing::debug;

/// Requests a full zone transfer (AXFR) for `host` from `server:port` and
/// flattens the streamed answer batches into a single list of decoded
/// values, preserving arrival order.
///
/// Only a failure to open the session is surfaced; a batch that arrives with
/// a transport error is skipped.
pub async fn zone_transfer(
    session: &dyn ZoneTransferSession,
    host: &str,
    server: &str,
    port: u16,
) -> Result<Vec<String>, DomainError> {
    let endpoint = format!("{server}:{port}");
    let mut batches = session.open(host, &endpoint).await?;

    let mut values = Vec::new();
    while let Some(batch) = batches.recv().await {
        match batch {
            Ok(records) => {
                values.extend(records.into_iter().filter_map(AnswerRecord::into_value));
            }
            Err(err) => {
                debug!(
                    zone = host,
                    endpoint = endpoint.as_str(),
                    error = %err,
                    "skipping transfer batch"
                );
            }
        }
    }

    Ok(values)
}
