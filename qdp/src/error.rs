//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] qdp_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] qdp_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] qdp_types::Error),

    #[error("Invalid host: {0}")]
    InvalidHost(String),
}

impl Error {
    /// Check if repeating the request may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            _ => false,
        }
    }
}
