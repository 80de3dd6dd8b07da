//! Error types for qdp-core

/// Result type alias for qdp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Frame encoding and decoding errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Buffer too short to hold checksum and header
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// Declared data length does not cover the hidden header bytes
    #[error("Data length {0} is below the minimum of 4")]
    DataLengthTooSmall(u16),

    /// Payload does not fit the frame buffer
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Declared data length runs past the received bytes
    #[error("Frame truncated: header declares {expected} bytes, got {actual} bytes")]
    Truncated {
        expected: usize,
        actual: usize,
    },

    /// Checksum verification failed
    #[error("Checksum mismatch: expected 0x{expected:08X}, received 0x{received:08X}")]
    ChecksumMismatch {
        expected: u32,
        received: u32,
    },

    /// Ping type not known to this client
    #[error("Unknown ping type: {0}")]
    UnknownPingType(u16),
}

impl Error {
    /// Check if the error describes a damaged or inconsistent datagram
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::FrameTooShort { .. }
                | Self::Truncated { .. }
                | Self::ChecksumMismatch { .. }
                | Self::DataLengthTooSmall(_)
                | Self::PayloadTooLarge { .. }
        )
    }
}
