use crate::ports::{DnsAnswer, DnsExchange};
use shoal_dns_domain::{reverse_name, AnswerRecord, DnsQuestion, DomainError, RecordKind};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Resolves one host against an ordered list of candidate servers.
///
/// Attempt `i` (0-based, up to `retries` extra attempts) queries
/// `servers[i % servers.len()]`. Retries continue only while no wire
/// response arrives at all; the first received response stops the loop even
/// when it carries no usable answer. An empty value list is a valid success.
pub async fn resolve_one(
    exchange: &dyn DnsExchange,
    record: RecordKind,
    host: &str,
    retries: usize,
    servers: &[String],
    cancel: &CancellationToken,
) -> Result<Vec<String>, DomainError> {
    if servers.is_empty() {
        return Err(DomainError::NoServers);
    }

    let name = match record {
        RecordKind::Ptr => reverse_name(host)?,
        _ => host.to_string(),
    };
    let question = DnsQuestion::new(name, record);

    let mut reply: Option<DnsAnswer> = None;
    for attempt in 0..=retries {
        let server = &servers[attempt % servers.len()];

        // Racing against the token aborts the in-flight attempt too, not
        // just the remaining retry budget.
        let outcome = tokio::select! {
            biased;

            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            outcome = exchange.exchange(&question, server) => outcome?,
        };

        match outcome {
            Some(answer) => {
                reply = Some(answer);
                break;
            }
            None => {
                debug!(
                    host,
                    server = server.as_str(),
                    attempt,
                    "no response, rotating to next server"
                );
            }
        }
    }

    let answer = reply.ok_or(DomainError::NoResponse)?;

    Ok(answer
        .records
        .into_iter()
        .filter_map(AnswerRecord::into_value)
        .collect())
}
