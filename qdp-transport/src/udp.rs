//! UDP transport for Q330 dataloggers
//!
//! Every exchange binds a fresh ephemeral socket, sends one request and
//! waits for one reply. The socket is dropped when the exchange returns, on
//! success, error or timeout alike.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use qdp_core::constants::{DEFAULT_TIMEOUT_MS, RECEIVE_BUFFER_SIZE};
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::{Transport, error::*};

/// UDP transport for Q330 dataloggers
pub struct UdpTransport {
    host: String,
    port: u16,
    read_timeout: Duration,
}

impl UdpTransport {
    /// Create new UDP transport
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            read_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Set read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Configured read timeout
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&self) -> Result<SocketAddr> {
        let addr_str = self.remote_addr();

        let mut addrs = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?;

        addrs
            .next()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))
    }

    /// Bind an ephemeral local socket of the same family as `remote`
    async fn bind_for(remote: &SocketAddr) -> Result<UdpSocket> {
        let local = if remote.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };

        Ok(UdpSocket::bind(local).await?)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn exchange(&self, request: &[u8]) -> Result<BytesMut> {
        let remote = self.resolve_addr().await?;

        let socket = Self::bind_for(&remote).await?;
        socket.connect(remote).await?;

        debug!(%remote, bytes = request.len(), "Sending request via UDP");
        trace!(data = %hex::encode(request), "UDP request");

        socket.send(request).await?;

        let mut buf = BytesMut::zeroed(RECEIVE_BUFFER_SIZE);

        let n = timeout(self.read_timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| {
                warn!(%remote, timeout = ?self.read_timeout, "Read timeout");
                Error::ReadTimeout(self.read_timeout)
            })?
            .map_err(|e| {
                warn!(%remote, "Read error: {}", e);
                Error::Io(e)
            })?;

        if n == 0 {
            debug!(%remote, "Received empty datagram");
        }

        buf.truncate(n);

        debug!(%remote, bytes = n, "Received reply via UDP");
        trace!(data = %hex::encode(&buf), "UDP reply");

        Ok(buf)
    }

    fn remote_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
