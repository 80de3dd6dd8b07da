//! High-level polling interface

use std::time::Duration;

use qdp_core::{Frame, PingType};
use qdp_transport::{Transport, UdpTransport};
use qdp_types::{Serial, Soh};
use tracing::{debug, info};

use crate::error::Result;

/// Q330 polling client
///
/// Each read is a single request/response exchange. Replies that are damaged
/// or of the wrong type are logged and reported as `Ok(None)`; only
/// transport failures surface as errors.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use qdp::Client;
///
/// #[tokio::main]
/// async fn main() -> qdp::Result<()> {
///     let client = Client::new("192.168.1.201", 5330).with_timeout(Duration::from_secs(1));
///
///     if let Some(serial) = client.read_serial().await? {
///         println!("{}", serial);
///     }
///
///     Ok(())
/// }
/// ```
pub struct Client<T = UdpTransport> {
    transport: T,
}

impl Client<UdpTransport> {
    /// Create a client talking UDP to `host:port`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            transport: UdpTransport::new(host, port),
        }
    }

    /// Set the reply timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_read_timeout(timeout);
        self
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over an existing transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Remote address of the device
    pub fn remote_addr(&self) -> String {
        self.transport.remote_addr()
    }

    /// Send `request` and decode the reply frame
    ///
    /// Returns `Ok(None)` when the reply does not decode.
    pub async fn poll(&self, request: &Frame) -> Result<Option<Frame>> {
        debug!(remote = %self.transport.remote_addr(), %request, "Polling device");

        let reply = self.transport.exchange(&request.encode()).await?;

        match Frame::decode(&reply) {
            Ok(frame) => {
                debug!(%frame, "Reply decoded");
                Ok(Some(frame))
            }
            Err(e) => {
                debug!(
                    remote = %self.transport.remote_addr(),
                    malformed = e.is_malformed(),
                    "Dropping reply: {}",
                    e
                );
                Ok(None)
            }
        }
    }

    /// Request the serial (identity) record
    pub async fn read_serial(&self) -> Result<Option<Serial>> {
        let serial = self
            .poll(&Frame::request_serial())
            .await?
            .and_then(|frame| frame.serial());

        if let Some(serial) = &serial {
            info!(remote = %self.transport.remote_addr(), "{}", serial);
        }

        Ok(serial)
    }

    /// Request the state of health record
    pub async fn read_soh(&self) -> Result<Option<Soh>> {
        let soh = self
            .poll(&Frame::request_status())
            .await?
            .and_then(|frame| frame.status());

        if soh.is_some() {
            info!(remote = %self.transport.remote_addr(), "Received {}", PingType::StatusResponse);
        }

        Ok(soh)
    }
}

/// Request the serial record from `host:port`
///
/// ```no_run
/// # async fn run() -> qdp::Result<()> {
/// use std::time::Duration;
///
/// let serial = qdp::request_serial("192.168.1.201", 5330, Duration::from_secs(2)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn request_serial(host: &str, port: u16, timeout: Duration) -> Result<Option<Serial>> {
    Client::new(host, port).with_timeout(timeout).read_serial().await
}

/// Request the state of health record from `host:port`
pub async fn request_status(host: &str, port: u16, timeout: Duration) -> Result<Option<Soh>> {
    Client::new(host, port).with_timeout(timeout).read_soh().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::{BufMut, BytesMut};
    use mockall::mock;
    use pretty_assertions::assert_eq;

    mock! {
        pub Device {}

        #[async_trait]
        impl Transport for Device {
            async fn exchange(&self, request: &[u8]) -> qdp_transport::Result<BytesMut>;
            fn remote_addr(&self) -> String;
        }
    }

    fn device() -> MockDevice {
        let mut device = MockDevice::new();
        device
            .expect_remote_addr()
            .returning(|| "127.0.0.1:5330".to_string());
        device
    }

    fn serial_reply() -> BytesMut {
        let mut payload = Vec::new();
        payload.put_u16(3);
        payload.put_u16(0);
        payload.put_u32(77);
        payload.put_u32(0x0100_0001);
        payload.put_u32(0x0000_00ff);
        payload.resize(68, 0);

        Frame::with_payload(PingType::SerialResponse, &payload)
            .unwrap()
            .encode()
    }

    #[tokio::test]
    async fn test_read_serial() {
        let mut device = device();
        let request = Frame::request_serial().encode().to_vec();
        device
            .expect_exchange()
            .withf(move |req: &[u8]| req == request.as_slice())
            .times(1)
            .returning(|_| Ok(serial_reply()));

        let client = Client::with_transport(device);
        let serial = client.read_serial().await.unwrap().unwrap();

        assert_eq!(serial.version, 3);
        assert_eq!(serial.kmi, 77);
        assert_eq!(serial.serial, "0x001000001000000ff");
    }

    #[tokio::test]
    async fn test_read_soh() {
        let mut device = device();
        let request = Frame::request_status().encode().to_vec();
        device
            .expect_exchange()
            .withf(move |req: &[u8]| req == request.as_slice())
            .times(1)
            .returning(|_| {
                // header only, empty bitmap
                Ok(Frame::with_payload(PingType::StatusResponse, &[0u8; 20])
                    .unwrap()
                    .encode())
            });

        let client = Client::with_transport(device);
        let soh = client.read_soh().await.unwrap().unwrap();

        assert_eq!(soh.header.bitmap, "0x0");
    }

    #[tokio::test]
    async fn test_wrong_reply_type_is_none() {
        let mut device = device();
        device
            .expect_exchange()
            .returning(|_| Ok(serial_reply()));

        let client = Client::with_transport(device);

        assert!(client.read_soh().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_reply_is_none() {
        let mut device = device();
        device.expect_exchange().returning(|_| {
            let mut reply = serial_reply();
            reply[0] ^= 0xFF;
            Ok(reply)
        });

        let client = Client::with_transport(device);

        assert!(client.read_serial().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_short_reply_is_none() {
        let mut device = device();
        device
            .expect_exchange()
            .returning(|_| Ok(BytesMut::from(&[0x00, 0x01, 0x02][..])));

        let client = Client::with_transport(device);

        assert!(client.poll(&Frame::request_serial()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_reply_is_none() {
        let mut device = device();
        device
            .expect_exchange()
            .times(1)
            .returning(|_| Ok(BytesMut::new()));

        let client = Client::with_transport(device);

        assert!(client.read_serial().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut device = device();
        device
            .expect_exchange()
            .returning(|_| Err(qdp_transport::Error::ReadTimeout(Duration::from_secs(2))));

        let client = Client::with_transport(device);
        let err = client.read_serial().await.unwrap_err();

        assert!(matches!(
            err,
            crate::Error::Transport(qdp_transport::Error::ReadTimeout(_))
        ));
        assert!(err.is_recoverable());
    }
}
