use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The DNS question types the resolver knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Cname,
    Ns,
    Ptr,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Cname => "CNAME",
            RecordKind::Ns => "NS",
            RecordKind::Ptr => "PTR",
        }
    }
}

impl FromStr for RecordKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordKind::A),
            "CNAME" => Ok(RecordKind::Cname),
            "NS" => Ok(RecordKind::Ns),
            "PTR" => Ok(RecordKind::Ptr),
            other => Err(DomainError::InvalidRecordType(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
