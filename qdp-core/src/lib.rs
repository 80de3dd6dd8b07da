//! # qdp-core
//!
//! Core protocol implementation for Quanterra Q330 dataloggers.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - Checksum calculation
//! - Ping type definitions
//! - Serial and status response decoding

pub mod checksum;
pub mod constants;
pub mod error;
pub mod frame;
pub mod info;
pub mod ping;
pub mod status;

mod wire;

pub use error::{Error, Result};
pub use frame::Frame;
pub use info::SerialInfo;
pub use ping::PingType;
pub use status::{Status, layout::StatusBlocks};
