mod dns_exchange;
mod zone_transfer;

pub use dns_exchange::{DnsAnswer, DnsExchange};
pub use zone_transfer::{TransferBatch, ZoneTransferSession};
