//! QDP frame structure and encoding/decoding

use bytes::{Buf, BufMut, BytesMut};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use tracing::trace;

use crate::{
    checksum,
    constants::{
        CHECKSUM_SIZE, COMMAND_PING, DATA_LENGTH_BIAS, DEFAULT_SEQUENCE, HEADER_SIZE,
        MAX_DATA_LENGTH, MAX_PAYLOAD_SIZE, PROTOCOL_VERSION, STATUS_REQUEST_MARKER,
    },
    error::{Error, Result},
    ping::PingType,
};

/// QDP poll frame
///
/// # Frame Structure
///
/// ```text
/// ┌──────────┬─────────┬─────────┬────────────┬──────────┬─────────────┬──────────┬─────────┬────────────────┐
/// │ Checksum │ Command │ Version │ DataLength │ Sequence │ Acknowledge │ PingType │ PingID  │    Payload     │
/// │  4 bytes │ 1 byte  │ 1 byte  │  2 bytes   │ 2 bytes  │   2 bytes   │ 2 bytes  │ 2 bytes │ DataLength - 4 │
/// └──────────┴─────────┴─────────┴────────────┴──────────┴─────────────┴──────────┴─────────┴────────────────┘
/// ```
///
/// All multi-byte values are big-endian. `DataLength` counts the ping type
/// and ping id as well as the payload, so a frame carries `DataLength - 4`
/// payload bytes and is `DataLength + 12` bytes on the wire.
///
/// # Examples
///
/// ```
/// use qdp_core::Frame;
///
/// let frame = Frame::request_serial();
/// let encoded = frame.encode();
///
/// let decoded = Frame::decode(&encoded).unwrap();
/// assert_eq!(decoded.data_length(), 4);
/// assert!(decoded.payload().is_empty());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command code
    pub command: u8,

    /// Protocol version
    pub version: u8,

    /// Ping id + ping type + payload length
    data_length: u16,

    /// Sequence number
    pub sequence: u16,

    /// Acknowledged sequence number
    pub acknowledge: u16,

    /// Ping sub-type, see [`PingType`]
    pub ping_type: u16,

    /// Ping identifier
    pub ping_id: u16,

    /// Payload buffer, zero past the carried bytes
    payload: [u8; MAX_PAYLOAD_SIZE],
}

impl Frame {
    /// Checksum and header size in bytes
    pub const PREFIX_SIZE: usize = CHECKSUM_SIZE + HEADER_SIZE;

    /// Create a poll frame with a zeroed payload of `data_length - 4` bytes
    ///
    /// # Errors
    ///
    /// Returns an error if `data_length` is below 4 or its payload would not
    /// fit in 532 bytes.
    pub fn new(ping_type: PingType, data_length: u16) -> Result<Self> {
        if data_length < DATA_LENGTH_BIAS {
            return Err(Error::DataLengthTooSmall(data_length));
        }
        if data_length > MAX_DATA_LENGTH {
            return Err(Error::PayloadTooLarge {
                size: usize::from(data_length - DATA_LENGTH_BIAS),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self {
            command: COMMAND_PING,
            version: PROTOCOL_VERSION,
            data_length,
            sequence: DEFAULT_SEQUENCE,
            acknowledge: 0,
            ping_type: ping_type.into(),
            ping_id: 0,
            payload: [0; MAX_PAYLOAD_SIZE],
        })
    }

    /// Create a poll frame carrying `payload`
    ///
    /// # Examples
    ///
    /// ```
    /// use qdp_core::{Frame, PingType};
    ///
    /// let frame = Frame::with_payload(PingType::StatusRequest, &[0, 0, 0x8f, 0x0b]).unwrap();
    /// assert_eq!(frame.data_length(), 8);
    /// ```
    pub fn with_payload(ping_type: PingType, payload: &[u8]) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }

        // bounded by MAX_PAYLOAD_SIZE above
        let mut frame = Self::new(ping_type, payload.len() as u16 + DATA_LENGTH_BIAS)?;
        frame.payload[..payload.len()].copy_from_slice(payload);

        Ok(frame)
    }

    /// Frame requesting the device serial block
    pub fn request_serial() -> Self {
        Self {
            command: COMMAND_PING,
            version: PROTOCOL_VERSION,
            data_length: DATA_LENGTH_BIAS,
            sequence: DEFAULT_SEQUENCE,
            acknowledge: 0,
            ping_type: PingType::SerialRequest.into(),
            ping_id: 0,
            payload: [0; MAX_PAYLOAD_SIZE],
        }
    }

    /// Frame requesting the status blocks named by [`STATUS_REQUEST_MARKER`]
    pub fn request_status() -> Self {
        let mut payload = [0; MAX_PAYLOAD_SIZE];
        payload[..4].copy_from_slice(&STATUS_REQUEST_MARKER.to_be_bytes());

        Self {
            command: COMMAND_PING,
            version: PROTOCOL_VERSION,
            data_length: DATA_LENGTH_BIAS + 4,
            sequence: DEFAULT_SEQUENCE,
            acknowledge: 0,
            ping_type: PingType::StatusRequest.into(),
            ping_id: 0,
            payload,
        }
    }

    /// Declared data length
    pub fn data_length(&self) -> u16 {
        self.data_length
    }

    /// Number of payload bytes carried on the wire
    pub fn payload_len(&self) -> usize {
        usize::from(self.data_length.saturating_sub(DATA_LENGTH_BIAS))
    }

    /// Carried payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.payload_len()]
    }

    /// Whole payload buffer, zero filled past the carried bytes
    pub fn payload_buffer(&self) -> &[u8; MAX_PAYLOAD_SIZE] {
        &self.payload
    }

    /// Known ping type, if any
    pub fn kind(&self) -> Option<PingType> {
        PingType::try_from(self.ping_type).ok()
    }

    /// Check the frame carries the given ping type
    pub fn is(&self, ping_type: PingType) -> bool {
        self.ping_type == u16::from(ping_type)
    }

    /// Total size on the wire
    pub fn size(&self) -> usize {
        usize::from(self.data_length) + HEADER_SIZE
    }

    /// Calculate checksum over header and carried payload
    pub fn checksum(&self) -> u32 {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE + self.payload_len());
        self.put_body(&mut buf);

        checksum::calculate(&buf)
    }

    /// Encode frame to bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use qdp_core::Frame;
    ///
    /// let bytes = Frame::request_status().encode();
    /// assert_eq!(bytes.len(), 20);
    /// ```
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_u32(self.checksum());
        self.put_body(&mut buf);

        buf
    }

    /// Decode frame from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is shorter than checksum and header (16 bytes)
    /// - Declared data length is below 4, past the buffer, or past 532 payload bytes
    /// - Checksum verification fails
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::PREFIX_SIZE {
            return Err(Error::FrameTooShort {
                expected: Self::PREFIX_SIZE,
                actual: buf.len(),
            });
        }

        let mut cursor = buf;
        let checksum_received = cursor.get_u32();
        let command = cursor.get_u8();
        let version = cursor.get_u8();
        let data_length = cursor.get_u16();
        let sequence = cursor.get_u16();
        let acknowledge = cursor.get_u16();
        let ping_type = cursor.get_u16();
        let ping_id = cursor.get_u16();

        if data_length < DATA_LENGTH_BIAS {
            return Err(Error::DataLengthTooSmall(data_length));
        }

        let payload_len = usize::from(data_length - DATA_LENGTH_BIAS);
        if payload_len > MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload_len,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        if payload_len > cursor.len() {
            return Err(Error::Truncated {
                expected: Self::PREFIX_SIZE + payload_len,
                actual: buf.len(),
            });
        }

        let mut payload = [0; MAX_PAYLOAD_SIZE];
        payload[..payload_len].copy_from_slice(&cursor[..payload_len]);

        let frame = Self {
            command,
            version,
            data_length,
            sequence,
            acknowledge,
            ping_type,
            ping_id,
            payload,
        };

        let checksum_calculated = frame.checksum();
        if checksum_calculated != checksum_received {
            return Err(Error::ChecksumMismatch {
                expected: checksum_calculated,
                received: checksum_received,
            });
        }

        trace!(frame = %frame, "Decoded frame");

        Ok(frame)
    }

    fn put_body(&self, buf: &mut BytesMut) {
        buf.put_u8(self.command);
        buf.put_u8(self.version);
        buf.put_u16(self.data_length);
        buf.put_u16(self.sequence);
        buf.put_u16(self.acknowledge);
        buf.put_u16(self.ping_type);
        buf.put_u16(self.ping_id);
        buf.put_slice(self.payload());
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Frame", 8)?;
        s.serialize_field("command", &self.command)?;
        s.serialize_field("version", &self.version)?;
        s.serialize_field("datalength", &self.data_length)?;
        s.serialize_field("sequence", &self.sequence)?;
        s.serialize_field("acknowledge", &self.acknowledge)?;
        s.serialize_field("ping_type", &self.ping_type)?;
        s.serialize_field("ping_id", &self.ping_id)?;
        s.serialize_field("data", &hex::encode(self.payload()))?;
        s.end()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("command", &format!("0x{:02X}", self.command))
            .field("version", &self.version)
            .field("data_length", &self.data_length)
            .field("sequence", &self.sequence)
            .field("acknowledge", &self.acknowledge)
            .field("ping_type", &self.ping_type)
            .field("ping_id", &self.ping_id)
            .field("checksum", &format!("0x{:08X}", self.checksum()))
            .field("payload_len", &self.payload_len())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "Frame[{}]", kind)?,
            None => write!(f, "Frame[PING_TYPE({})]", self.ping_type)?,
        }
        write!(
            f,
            "(seq={}, ack={}, len={})",
            self.sequence,
            self.acknowledge,
            self.payload_len()
        )
    }
}
