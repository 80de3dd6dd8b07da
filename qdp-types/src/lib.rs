//! Decoded record types for the QDP client
//!
//! These are the normalized, JSON-ready outputs handed to callers. Field
//! names are stable: existing deployments persist and forward them as JSON.

pub mod error;
pub mod serial;
pub mod soh;
pub mod time;

pub use error::{Error, Result};
pub use serial::Serial;
pub use soh::{Soh, SohBoom, SohEther, SohGlobal, SohGps, SohHeader, SohLogicalPort};
pub use time::epoch_to_time;
