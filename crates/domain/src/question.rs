use crate::record_kind::RecordKind;
use std::sync::Arc;

/// One DNS question: a name (already reverse-encoded for PTR lookups) and
/// the record kind being asked for.
#[derive(Debug, Clone)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub record: RecordKind,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, record: RecordKind) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}
