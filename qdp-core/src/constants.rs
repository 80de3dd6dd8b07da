//! Protocol constants

/// QDP command carrying ping, status and serial requests (C1_PING)
pub const COMMAND_PING: u8 = 0x38;

/// QDP protocol version
pub const PROTOCOL_VERSION: u8 = 2;

/// Sequence number used on every poll
pub const DEFAULT_SEQUENCE: u16 = 1;

/// Requested status blocks: global, GPS, boom, logical ports 1-4 and ethernet
pub const STATUS_REQUEST_MARKER: u32 = 0x8f0b;

/// Default data port of the logger
pub const DEFAULT_PORT: u16 = 5330;

/// Default reply timeout (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Size of the buffer a single reply datagram is read into
pub const RECEIVE_BUFFER_SIZE: usize = 512;

/// Checksum field size
pub const CHECKSUM_SIZE: usize = 4;

/// Header size, `command` through `ping_id`
pub const HEADER_SIZE: usize = 12;

/// Leading part of `data_length` that counts header rather than payload
pub const DATA_LENGTH_BIAS: u16 = 4;

/// Payload buffer capacity
pub const MAX_PAYLOAD_SIZE: usize = 532;

/// Largest `data_length` whose payload still fits the buffer
pub const MAX_DATA_LENGTH: u16 = MAX_PAYLOAD_SIZE as u16 + DATA_LENGTH_BIAS;
