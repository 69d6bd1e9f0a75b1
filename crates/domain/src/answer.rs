use std::net::Ipv4Addr;

/// A single record from the answer section of a DNS response.
///
/// Record types the resolver does not extract a value from are kept as
/// `Other` so callers can skip them without treating the response as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRecord {
    A(Ipv4Addr),
    Cname(String),
    Ns(String),
    Ptr(String),
    Other,
}

impl AnswerRecord {
    /// The extracted string value: the dotted quad for A records, the target
    /// name for CNAME/NS/PTR, `None` for everything else.
    pub fn into_value(self) -> Option<String> {
        match self {
            AnswerRecord::A(addr) => Some(addr.to_string()),
            AnswerRecord::Cname(target) | AnswerRecord::Ns(target) | AnswerRecord::Ptr(target) => {
                Some(target)
            }
            AnswerRecord::Other => None,
        }
    }
}
