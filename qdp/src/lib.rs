//! # qdp
//!
//! Rust client for the QDP polling protocol spoken by Quanterra Q330
//! seismic dataloggers.
//!
//! ## Features
//!
//! - Serial (identity) and state of health requests over UDP
//! - Async/await API using Tokio
//! - JSON ready output records
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> qdp::Result<()> {
//!     let timeout = Duration::from_secs(2);
//!
//!     if let Some(soh) = qdp::request_status("192.168.1.201", 5330, timeout).await? {
//!         println!("{}", soh.to_json_pretty()?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod host;

// Re-exports
pub use client::{Client, request_serial, request_status};
pub use error::{Error, Result};
pub use host::split_host_port;

// Re-export types
pub use qdp_core::{Frame, PingType, constants::DEFAULT_PORT};
pub use qdp_types::{Serial, Soh};
