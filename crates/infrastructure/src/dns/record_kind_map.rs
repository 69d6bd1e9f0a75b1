//! Mapping between `shoal_dns_domain::RecordKind` and
//! `hickory_proto::rr::RecordType`, in one place so query building never
//! duplicates the match.

use hickory_proto::rr::RecordType as HickoryRecordType;
use shoal_dns_domain::RecordKind;

pub struct RecordKindMapper;

impl RecordKindMapper {
    /// Convert domain RecordKind → hickory RecordType (for building queries)
    pub fn to_hickory(record: RecordKind) -> HickoryRecordType {
        match record {
            RecordKind::A => HickoryRecordType::A,
            RecordKind::Cname => HickoryRecordType::CNAME,
            RecordKind::Ns => HickoryRecordType::NS,
            RecordKind::Ptr => HickoryRecordType::PTR,
        }
    }
}
