use async_trait::async_trait;
use shoal_dns_domain::{AnswerRecord, DnsQuestion, DomainError};

/// The decoded answer section of one DNS response.
#[derive(Debug, Clone, Default)]
pub struct DnsAnswer {
    pub records: Vec<AnswerRecord>,
}

impl DnsAnswer {
    pub fn new(records: Vec<AnswerRecord>) -> Self {
        Self { records }
    }
}

/// One-shot DNS query primitive.
///
/// `Ok(Some(answer))` means a wire response was received, even an empty or
/// error-flagged one; the retry loop stops there. `Ok(None)` means no
/// response arrived at all (timeout, unreachable server) and the attempt may
/// be retried against another server. `Err` is reserved for hard failures
/// such as a response that cannot be decoded.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn exchange(
        &self,
        question: &DnsQuestion,
        server: &str,
    ) -> Result<Option<DnsAnswer>, DomainError>;
}
