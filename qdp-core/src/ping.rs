//! QDP ping type definitions

use std::fmt;

use crate::error::{Error, Result};

/// Ping sub-type carried in every poll frame
///
/// Requests and their responses use distinct codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PingType {
    StatusRequest = 2,
    StatusResponse = 3,
    SerialRequest = 4,
    SerialResponse = 5,
}

impl PingType {
    /// Check if this is a request (client to device)
    pub fn is_request(self) -> bool {
        !self.is_response()
    }

    /// Check if this is a response (device to client)
    pub fn is_response(self) -> bool {
        matches!(self, Self::StatusResponse | Self::SerialResponse)
    }

    /// The response a device sends back for this request
    pub fn response(self) -> Self {
        match self {
            Self::StatusRequest | Self::StatusResponse => Self::StatusResponse,
            Self::SerialRequest | Self::SerialResponse => Self::SerialResponse,
        }
    }

    /// Get ping type name
    pub fn name(self) -> &'static str {
        match self {
            Self::StatusRequest => "STATUS_REQUEST",
            Self::StatusResponse => "STATUS_RESPONSE",
            Self::SerialRequest => "SERIAL_REQUEST",
            Self::SerialResponse => "SERIAL_RESPONSE",
        }
    }
}

impl From<PingType> for u16 {
    fn from(ping: PingType) -> u16 {
        ping as u16
    }
}

impl TryFrom<u16> for PingType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            2 => Ok(Self::StatusRequest),
            3 => Ok(Self::StatusResponse),
            4 => Ok(Self::SerialRequest),
            5 => Ok(Self::SerialResponse),
            _ => Err(Error::UnknownPingType(value)),
        }
    }
}

impl fmt::Display for PingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u16)
    }
}
