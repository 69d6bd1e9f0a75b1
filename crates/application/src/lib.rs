//! Shoal DNS Application Layer
//!
//! The use cases that make up the resolution engine, and the ports they
//! depend on. All network I/O lives behind the ports so the engine itself is
//! deterministic and testable without sockets.
pub mod ports;
pub mod use_cases;

pub use ports::{DnsAnswer, DnsExchange, TransferBatch, ZoneTransferSession};
pub use use_cases::resolve_batch::Resolver;
pub use use_cases::resolve_one::resolve_one;
pub use use_cases::zone_transfer::zone_transfer;
