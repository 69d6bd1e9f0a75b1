//! Builds DNS query messages in wire format using `hickory-proto`.

use super::record_kind_map::RecordKindMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use shoal_dns_domain::{DnsQuestion, DomainError};
use std::str::FromStr;

pub struct QueryBuilder;

impl QueryBuilder {
    /// Serialized query for `question`, returning the message ID used for
    /// response matching.
    ///
    /// Queries are sent without the RD flag: the resolver talks to servers
    /// expected to answer directly or not at all.
    pub fn build(question: &DnsQuestion) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build_message(&question.name, RecordKindMapper::to_hickory(question.record))
    }

    /// Serialized AXFR request for `zone`.
    pub fn build_axfr(zone: &str) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build_message(zone, HickoryRecordType::AXFR)
    }

    fn build_message(
        name: &str,
        query_type: HickoryRecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let mut fqdn = Name::from_str(name).map_err(|e| {
            DomainError::InvalidDomainName(format!("invalid name '{}': {}", name, e))
        })?;
        fqdn.set_fqdn(true);

        let mut query = Query::new();
        query.set_name(fqdn);
        query.set_query_type(query_type);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("failed to serialize query: {}", e))
        })?;

        Ok((id, buf))
    }
}
