//! Transport layer for the QDP protocol
//!
//! Provides the UDP request/response exchange with devices.

pub mod error;
pub mod udp;

pub use error::{Error, Result};
pub use udp::UdpTransport;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for one request/response exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for a single reply datagram
    async fn exchange(&self, request: &[u8]) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
