pub mod exchange;
pub mod query_builder;
pub mod record_kind_map;
pub mod response_decoder;
pub mod transfer;
pub mod transport;

pub use exchange::UdpExchange;
pub use transfer::TcpTransferClient;
