//! Status (state of health) response decoding

pub mod blocks;
pub mod layout;

use chrono::{DateTime, Utc};
use qdp_types::{
    Soh, SohBoom, SohEther, SohGlobal, SohGps, SohHeader, SohLogicalPort, epoch_to_time,
};
use tracing::{debug, warn};

use crate::{frame::Frame, ping::PingType, wire::WireBlock};

use self::blocks::{Boom, Ether, Global, Gps, Header, LogicalPort};
use self::layout::{BlockKind, StatusBlocks};

/// Status response as packed by the device
///
/// Blocks absent from the bitmap keep their zero defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub header: Header,
    pub global: Global,
    pub gps: Gps,
    pub boom: Boom,
    pub ether: Ether,
    pub lport: [LogicalPort; 4],

    /// Bits set in the bitmap that have no decoder
    pub skipped: StatusBlocks,

    /// Offset just past the last block read
    pub consumed: usize,
}

impl Status {
    /// Decode header and blocks
    ///
    /// `payload` is the full payload buffer; `carried` is how many of its
    /// bytes came off the wire and is only used to flag suspect layouts.
    pub fn decode(payload: &[u8], carried: usize) -> Self {
        let header = Header::decode_at(payload, 0);

        let mut status = Self {
            header,
            global: Global::default(),
            gps: Gps::default(),
            boom: Boom::default(),
            ether: Ether::default(),
            lport: Default::default(),
            skipped: StatusBlocks::empty(),
            consumed: layout::STATUS_HEADER_SIZE,
        };

        for (bit, block, offset) in layout::placements(status.header.bitmap) {
            match block.kind {
                Some(BlockKind::Global) => status.global = Global::decode_at(payload, offset),
                Some(BlockKind::Gps) => status.gps = Gps::decode_at(payload, offset),
                Some(BlockKind::Boom) => status.boom = Boom::decode_at(payload, offset),
                Some(BlockKind::LogicalPort(port)) => {
                    status.lport[port] = LogicalPort::decode_at(payload, offset)
                }
                Some(BlockKind::Ethernet) => status.ether = Ether::decode_at(payload, offset),
                None => {
                    status.skipped |= StatusBlocks::from_bits_retain(1 << bit);
                    if offset < carried {
                        warn!(
                            bit,
                            offset,
                            carried,
                            "Status block not decoded and assumed empty; later blocks may be misaligned"
                        );
                    }
                }
            }
            status.consumed = offset + block.width;
        }

        debug!(
            bitmap = %format!("{:#x}", status.header.bitmap),
            consumed = status.consumed,
            carried,
            "Decoded status blocks"
        );

        status
    }

    /// Normalize into the public record
    pub fn to_soh(&self, timestamp: DateTime<Utc>) -> Soh {
        let header = &self.header;
        let global = &self.global;
        let gps = &self.gps;
        let boom = &self.boom;
        let ether = &self.ether;

        Soh {
            header: SohHeader {
                drift_tol: header.drift_tol,
                user_msg_cnt: header.user_msg_cnt,
                last_reboot: epoch_to_time(header.last_reboot),
                bitmap: format!("{:#x}", header.bitmap),
            },
            global: SohGlobal {
                clock_qual: global.clock_qual,
                clock_loss: global.clock_loss,
                current_voltage: global.current_voltage,
                sec_offset: global.sec_offset,
                usec_offset: global.usec_offset,
                total_time: global.total_time,
                total_power: global.total_power,
                last_resync: epoch_to_time(global.last_resync),
                resyncs: global.resyncs,
                gps_stat: global.gps_stat,
                cal_stat: global.cal_stat,
                sensor_map: global.sensor_map,
                cur_vco: global.cur_vco,
                data_seq: global.data_seq,
                pll_flag: global.pll_flag,
                stat_inp: global.stat_inp,
                misc_inp: global.misc_inp,
                cur_sequence: global.cur_sequence,
            },
            boom: SohBoom {
                booms: boom.booms,
                amb_pos: boom.amb_pos,
                amb_neg: boom.amb_neg,
                supply: boom.supply,
                sys_temp: boom.sys_temp,
                main_cur: boom.main_cur,
                ant_cur: boom.ant_cur,
                seis1_temp: boom.seis1_temp,
                seis2_temp: boom.seis2_temp,
                cal_timeouts: boom.cal_timeouts,
            },
            ether: SohEther {
                check: ether.check,
                io_errors: ether.io_errors,
                phy_num: ether.phy_num,
                unreach: ether.unreach,
                quench: ether.quench,
                echo: ether.echo,
                redirect: ether.redirect,
                runt: ether.runt,
                crc_err: ether.crc_err,
                bcast: ether.bcast,
                ucast: ether.ucast,
                good: ether.good,
                jabber: ether.jabber,
                out_win: ether.out_win,
                tx_ok: ether.tx_ok,
                miss: ether.miss,
                collide: ether.collide,
                link_stat: ether.link_stat,
            },
            gps: SohGps {
                gps_time: gps.gps_time,
                gps_on: gps.gps_on,
                sat_used: gps.sat_used,
                sat_view: gps.sat_view,
                time: gps_text(&gps.time),
                date: gps_text(&gps.date),
                fix: gps_text(&gps.fix),
                height: gps_text(&gps.height),
                lat: gps_text(&gps.lat),
                lon: gps_text(&gps.lon),
                last_good: epoch_to_time(gps.last_good),
                check_err: gps.check_err,
            },
            lport: std::array::from_fn(|port| {
                let lp = &self.lport[port];
                SohLogicalPort {
                    port: port as u8,
                    sent: lp.sent,
                    resends: lp.resends,
                    fill: lp.fill,
                    seq: lp.seq,
                    pack_used: lp.pack_used,
                    last_ack: lp.last_ack,
                    phy_num: lp.phy_num,
                    log_num: lp.log_num,
                    retran: lp.retran,
                }
            }),
            timestamp,
        }
    }
}

/// Drop the leading length byte and the trailing NUL padding
fn gps_text(raw: &[u8]) -> String {
    let text = raw.get(1..).unwrap_or_default();
    let end = text.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);

    String::from_utf8_lossy(&text[..end]).into_owned()
}

impl Frame {
    /// Interpret the frame as a status response
    ///
    /// Returns `None` unless the ping type is
    /// [`PingType::StatusResponse`].
    pub fn status(&self) -> Option<Soh> {
        if !self.is(PingType::StatusResponse) {
            debug!(ping_type = self.ping_type, "Not a status response");
            return None;
        }

        let status = Status::decode(self.payload_buffer(), self.payload_len());

        Some(status.to_soh(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn header(bitmap: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.put_u16(50); // drift tolerance
        buf.put_u16(2); // user messages
        buf.put_u32(86_400); // last reboot
        buf.put_u32(0);
        buf.put_u32(0);
        buf.put_u32(bitmap);
        buf
    }

    fn global_block(buf: &mut Vec<u8>) {
        buf.put_u16(1); // aq_ctr
        buf.put_u16(0xc0); // clock quality
        buf.put_u16(3); // clock loss
        buf.put_u16(138); // current voltage
        buf.put_u32(1000); // sec offset
        buf.put_u32(500); // usec offset
        buf.put_u32(7200); // total time
        buf.put_u32(3600); // total power
        buf.put_u32(0); // last resync
        buf.put_u32(12); // resyncs
        for v in 1..=8u16 {
            buf.put_u16(v); // gps_stat .. misc_inp
        }
        buf.put_u32(0xdead); // current sequence
    }

    fn text<const N: usize>(s: &str) -> [u8; N] {
        let mut field = [0u8; N];
        field[0] = s.len() as u8;
        field[1..=s.len()].copy_from_slice(s.as_bytes());
        field
    }

    fn gps_block(buf: &mut Vec<u8>) {
        buf.put_u16(4); // gps time
        buf.put_u16(1); // gps on
        buf.put_u16(7); // sats used
        buf.put_u16(11); // sats in view
        buf.put_slice(&text::<10>("21:15:03"));
        buf.put_slice(&text::<12>("24/05/2015"));
        buf.put_slice(&text::<6>("3-D"));
        buf.put_slice(&text::<12>("47.2M"));
        buf.put_slice(&text::<14>("-41.1234"));
        buf.put_slice(&text::<14>("+174.5678"));
        buf.put_u32(3600); // last good
        buf.put_u32(9); // checksum errors
    }

    fn boom_block(buf: &mut Vec<u8>) {
        for v in [-3i16, 2, 1, 0, 0, 0] {
            buf.put_i16(v);
        }
        buf.put_u16(10);
        buf.put_u16(11);
        buf.put_u16(138);
        buf.put_i16(-12); // system temperature
        buf.put_i16(85);
        buf.put_i16(20);
        buf.put_i16(0);
        buf.put_i16(0);
        buf.put_u32(1);
    }

    fn port_block(buf: &mut Vec<u8>, n: u32) {
        for field in 0..6 {
            buf.put_u32(n * 100 + field);
        }
        buf.put_u16(1); // physical port
        buf.put_u16(n as u16); // logical port
        buf.put_u16(0);
        buf.put_u16(0);
    }

    fn ether_block(buf: &mut Vec<u8>) {
        buf.put_u32(0xabcd); // check
        buf.put_u32(4); // io errors
        buf.put_u16(3); // phy num
        buf.put_u16(0);
        for v in 1..=14u32 {
            buf.put_u32(v);
        }
        buf.put_u16(1); // link status
        buf.put_u16(0);
        buf.put_u32(0);
    }

    fn full_payload() -> Vec<u8> {
        let mut buf = header(0x8f0b);
        global_block(&mut buf);
        gps_block(&mut buf);
        boom_block(&mut buf);
        for n in 0..4 {
            port_block(&mut buf, n);
        }
        ether_block(&mut buf);
        buf
    }

    fn response(payload: &[u8]) -> Frame {
        Frame::with_payload(PingType::StatusResponse, payload).unwrap()
    }

    #[test]
    fn test_global_and_gps_only() {
        let mut payload = header(0b11);
        global_block(&mut payload);
        gps_block(&mut payload);
        assert_eq!(payload.len(), 156);
        payload.extend_from_slice(&[0xFF; 32]);

        let frame = response(&payload);
        let status = Status::decode(frame.payload_buffer(), frame.payload_len());

        assert_eq!(status.consumed, 156);
        assert_eq!(status.global.clock_qual, 0xc0);
        assert_eq!(status.gps.sat_used, 7);
        assert_eq!(status.boom, Boom::default());
        assert_eq!(status.ether, Ether::default());
        assert!(status.lport.iter().all(|lp| *lp == LogicalPort::default()));
        assert!(status.skipped.is_empty());
    }

    #[test]
    fn test_full_status_offsets() {
        let payload = full_payload();
        assert_eq!(payload.len(), 392);

        let frame = response(&payload);
        let status = Status::decode(frame.payload_buffer(), frame.payload_len());

        assert_eq!(status.consumed, 392);
        assert_eq!(status.boom.sys_temp, -12);
        assert_eq!(status.boom.booms[0], -3);
        assert_eq!(status.lport[2].sent, 200);
        assert_eq!(status.lport[3].last_ack, 305);
        assert_eq!(status.ether.check, 0xabcd);
        assert_eq!(status.ether.collide, 14);
        assert_eq!(status.ether.link_stat, 1);
    }

    #[test]
    fn test_zero_width_bit_does_not_shift_blocks() {
        // power supply bit set, but boom still starts right after the header
        let mut payload = header(StatusBlocks::POWER_SUPPLY.bits() | StatusBlocks::BOOM.bits());
        boom_block(&mut payload);

        let frame = response(&payload);
        let status = Status::decode(frame.payload_buffer(), frame.payload_len());

        assert_eq!(status.boom.sys_temp, -12);
        assert_eq!(status.skipped, StatusBlocks::POWER_SUPPLY);
        assert_eq!(status.consumed, 52);
    }

    #[test]
    fn test_soh_normalization() {
        let frame = response(&full_payload());
        let soh = frame.status().unwrap();

        assert_eq!(soh.header.drift_tol, 50);
        assert_eq!(soh.header.user_msg_cnt, 2);
        assert_eq!(soh.header.bitmap, "0x8f0b");
        assert_eq!(
            soh.header.last_reboot,
            Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            soh.global.last_resync,
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(soh.global.cur_sequence, 0xdead);
        assert_eq!(soh.global.misc_inp, 8);

        assert_eq!(soh.gps.time, "21:15:03");
        assert_eq!(soh.gps.date, "24/05/2015");
        assert_eq!(soh.gps.fix, "3-D");
        assert_eq!(soh.gps.height, "47.2M");
        assert_eq!(soh.gps.lat, "-41.1234");
        assert_eq!(soh.gps.lon, "+174.5678");
        assert_eq!(
            soh.gps.last_good,
            Utc.with_ymd_and_hms(2000, 1, 1, 1, 0, 0).unwrap()
        );

        assert_eq!(soh.ether.io_errors, 4);
        assert_eq!(soh.ether.out_win, 11);

        for (n, lp) in soh.lport.iter().enumerate() {
            assert_eq!(usize::from(lp.port), n);
            assert_eq!(usize::from(lp.log_num), n);
        }
    }

    #[test]
    fn test_soh_absent_blocks_are_zero() {
        let frame = response(&header(0));
        let soh = frame.status().unwrap();

        assert_eq!(soh.header.bitmap, "0x0");
        assert_eq!(soh.boom, SohBoom::default());
        assert_eq!(soh.gps.fix, "");
        assert_eq!(soh.lport[1].port, 1);
        assert_eq!(soh.lport[1].sent, 0);
    }

    #[test]
    fn test_status_wrong_ping_type() {
        let frame = Frame::with_payload(PingType::SerialResponse, &full_payload()).unwrap();
        assert!(frame.status().is_none());
    }

    #[test]
    fn test_gps_text() {
        assert_eq!(gps_text(b"\x03abc\0\0\0"), "abc");
        assert_eq!(gps_text(b"\x05a\0b\0\0"), "a\0b");
        assert_eq!(gps_text(b"\0\0\0"), "");
        assert_eq!(gps_text(b""), "");
    }
}
