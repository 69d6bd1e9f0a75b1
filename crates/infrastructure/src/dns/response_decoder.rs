//! Decodes DNS responses into domain answer records.

use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use shoal_dns_domain::{AnswerRecord, DomainError};
use tracing::debug;

/// A decoded upstream response.
#[derive(Debug, Clone)]
pub struct DecodedResponse {
    pub id: u16,
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub records: Vec<AnswerRecord>,
}

pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Parses raw response bytes. A message that cannot be decoded is a hard
    /// error; record types the resolver does not extract become
    /// `AnswerRecord::Other` so callers skip them without failing.
    pub fn parse(bytes: &[u8]) -> Result<DecodedResponse, DomainError> {
        let message = Message::from_vec(bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("failed to parse DNS response: {}", e))
        })?;

        Ok(Self::from_message(&message))
    }

    pub fn from_message(message: &Message) -> DecodedResponse {
        let records = message
            .answers()
            .iter()
            .map(|record| match record.data() {
                RData::A(a) => AnswerRecord::A(a.0),
                RData::CNAME(target) => AnswerRecord::Cname(target.to_utf8()),
                RData::NS(target) => AnswerRecord::Ns(target.to_utf8()),
                RData::PTR(target) => AnswerRecord::Ptr(target.to_utf8()),
                _ => AnswerRecord::Other,
            })
            .collect::<Vec<_>>();

        debug!(
            rcode = ?message.response_code(),
            answers = records.len(),
            truncated = message.truncated(),
            "DNS response decoded"
        );

        DecodedResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            records,
        }
    }
}
