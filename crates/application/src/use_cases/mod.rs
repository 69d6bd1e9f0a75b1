pub mod resolve_batch;
pub mod resolve_one;
pub mod zone_transfer;
