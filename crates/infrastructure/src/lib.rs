//! Shoal DNS Infrastructure Layer
//!
//! `hickory-proto` wire codecs and the UDP/TCP adapters behind the
//! application ports.
pub mod dns;
