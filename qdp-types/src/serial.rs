//! Device identity record

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identity of a data logger as reported by a serial response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Serial {
    /// Serial block version
    pub version: u16,

    /// Kinemetrics manufacturer identifier
    pub kmi: u32,

    /// 64-bit serial number, see [`Serial::format_serial`]
    pub serial: String,

    /// System software version
    pub sysver: u16,

    /// When the record was decoded (not reported by the device)
    pub timestamp: DateTime<Utc>,
}

impl Serial {
    pub fn new(
        version: u16,
        kmi: u32,
        serial_low: u32,
        serial_high: u32,
        sysver: u16,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            version,
            kmi,
            serial: Self::format_serial(serial_low, serial_high),
            sysver,
            timestamp,
        }
    }

    /// Render the serial number halves, low half first
    ///
    /// ```
    /// use qdp_types::Serial;
    ///
    /// assert_eq!(Serial::format_serial(0x0100_00ab, 0x12), "0x0010000ab00000012");
    /// ```
    pub fn format_serial(low: u32, high: u32) -> String {
        format!("0x0{:08x}{:08x}", low, high)
    }

    /// Indented JSON, as written by the command line tool
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Serial[SN: {}, KMI: {}, SysVer: {}]",
            self.serial, self.kmi, self.sysver
        )
    }
}
