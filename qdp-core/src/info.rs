//! Serial (device information) response decoding

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use qdp_types::Serial;
use tracing::debug;

use crate::{frame::Frame, ping::PingType, wire::WireBlock};

/// Serial response block as sent by the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialInfo {
    pub version: u16,
    pub flags: u16,
    pub kmi: u32,
    pub serial_low: u32,
    pub serial_high: u32,
    pub memory: [u32; 8],
    pub interfaces: [u16; 8],
    pub cal_err: u16,
    pub sys_ver: u16,
}

impl WireBlock for SerialInfo {
    const SIZE: usize = 68;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let version = r.read_u16::<BigEndian>()?;
        let flags = r.read_u16::<BigEndian>()?;
        let kmi = r.read_u32::<BigEndian>()?;
        let serial_low = r.read_u32::<BigEndian>()?;
        let serial_high = r.read_u32::<BigEndian>()?;

        let mut memory = [0u32; 8];
        r.read_u32_into::<BigEndian>(&mut memory)?;
        let mut interfaces = [0u16; 8];
        r.read_u16_into::<BigEndian>(&mut interfaces)?;

        Ok(Self {
            version,
            flags,
            kmi,
            serial_low,
            serial_high,
            memory,
            interfaces,
            cal_err: r.read_u16::<BigEndian>()?,
            sys_ver: r.read_u16::<BigEndian>()?,
        })
    }
}

impl SerialInfo {
    /// Decode from the start of a payload buffer
    pub fn decode(payload: &[u8]) -> Self {
        Self::decode_at(payload, 0)
    }

    /// Normalize into the public record
    pub fn to_serial(&self, timestamp: DateTime<Utc>) -> Serial {
        Serial::new(
            self.version,
            self.kmi,
            self.serial_low,
            self.serial_high,
            self.sys_ver,
            timestamp,
        )
    }
}

impl Frame {
    /// Interpret the frame as a serial response
    ///
    /// Returns `None` unless the ping type is
    /// [`PingType::SerialResponse`].
    pub fn serial(&self) -> Option<Serial> {
        if !self.is(PingType::SerialResponse) {
            debug!(ping_type = self.ping_type, "Not a serial response");
            return None;
        }

        let info = SerialInfo::decode(self.payload_buffer());

        Some(info.to_serial(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;
    use pretty_assertions::assert_eq;

    fn serial_payload() -> Vec<u8> {
        let mut buf = Vec::with_capacity(SerialInfo::SIZE);
        buf.put_u16(3); // version
        buf.put_u16(0x0010); // flags
        buf.put_u32(0x0000_4b4d); // kmi
        buf.put_u32(0x0100_00ab); // serial low
        buf.put_u32(0x2233_4455); // serial high
        for n in 0..8u32 {
            buf.put_u32(n * 1024);
        }
        for n in 0..8u16 {
            buf.put_u16(n);
        }
        buf.put_u16(0); // cal err
        buf.put_u16(0x0162); // sys ver
        buf
    }

    #[test]
    fn test_serial_info_decode() {
        let payload = serial_payload();
        assert_eq!(payload.len(), SerialInfo::SIZE);

        let info = SerialInfo::decode(&payload);

        assert_eq!(info.version, 3);
        assert_eq!(info.flags, 0x0010);
        assert_eq!(info.kmi, 0x4b4d);
        assert_eq!(info.memory[7], 7 * 1024);
        assert_eq!(info.interfaces[3], 3);
        assert_eq!(info.sys_ver, 0x0162);
    }

    #[test]
    fn test_serial_from_frame() {
        let frame = Frame::with_payload(PingType::SerialResponse, &serial_payload()).unwrap();
        let serial = frame.serial().unwrap();

        assert_eq!(serial.version, 3);
        assert_eq!(serial.kmi, 0x4b4d);
        assert_eq!(serial.serial, "0x0010000ab22334455");
        assert_eq!(serial.sysver, 0x0162);
    }

    #[test]
    fn test_serial_wrong_ping_type() {
        let frame = Frame::with_payload(PingType::StatusResponse, &serial_payload()).unwrap();
        assert!(frame.serial().is_none());

        let frame = Frame::with_payload(PingType::SerialRequest, &serial_payload()).unwrap();
        assert!(frame.serial().is_none());
    }

    #[test]
    fn test_serial_short_payload_reads_zero_fill() {
        // only version and flags carried, the rest of the buffer is zero
        let frame = Frame::with_payload(PingType::SerialResponse, &[0x00, 0x07, 0x00, 0x01]).unwrap();
        let serial = frame.serial().unwrap();

        assert_eq!(serial.version, 7);
        assert_eq!(serial.kmi, 0);
        assert_eq!(serial.serial, "0x00000000000000000");
    }

    #[test]
    fn test_serial_info_truncated_slice_is_default() {
        assert_eq!(SerialInfo::decode(&[0x00, 0x07]), SerialInfo::default());
    }
}
