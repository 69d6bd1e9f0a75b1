use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Non IPv4 address: {0}")]
    NotIpv4Address(String),

    #[error("Invalid upstream endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("At least one DNS server is needed")]
    NoServers,

    #[error("At least one domain is needed")]
    NoDomains,

    #[error("At least one worker is needed")]
    NoWorkers,

    #[error("No response")]
    NoResponse,

    #[error("Resolution cancelled")]
    Cancelled,

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Soft errors are expected per-query outcomes that never abort a batch.
    pub fn is_soft(&self) -> bool {
        matches!(self, DomainError::NoResponse | DomainError::Cancelled)
    }
}
