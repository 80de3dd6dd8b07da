//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Read timeout after {0:?}")]
    ReadTimeout(std::time::Duration),
}

impl Error {
    /// Check if the exchange may succeed when repeated
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ReadTimeout(_) | Self::Io(_))
    }
}
