//! Raw status blocks as packed by the device

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::wire::{WireBlock, read_bytes};

/// Fixed status header, always present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub drift_tol: u16,
    pub user_msg_cnt: u16,
    pub last_reboot: u32,
    pub spare: [u32; 2],
    pub bitmap: u32,
}

impl WireBlock for Header {
    const SIZE: usize = 20;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let drift_tol = r.read_u16::<BigEndian>()?;
        let user_msg_cnt = r.read_u16::<BigEndian>()?;
        let last_reboot = r.read_u32::<BigEndian>()?;
        let mut spare = [0u32; 2];
        r.read_u32_into::<BigEndian>(&mut spare)?;

        Ok(Self {
            drift_tol,
            user_msg_cnt,
            last_reboot,
            spare,
            bitmap: r.read_u32::<BigEndian>()?,
        })
    }
}

/// Global status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Global {
    pub aq_ctr: u16,
    pub clock_qual: u16,
    pub clock_loss: u16,
    pub current_voltage: u16,
    pub sec_offset: u32,
    pub usec_offset: u32,
    pub total_time: u32,
    pub total_power: u32,
    pub last_resync: u32,
    pub resyncs: u32,
    pub gps_stat: u16,
    pub cal_stat: u16,
    pub sensor_map: u16,
    pub cur_vco: u16,
    pub data_seq: u16,
    pub pll_flag: u16,
    pub stat_inp: u16,
    pub misc_inp: u16,
    pub cur_sequence: u32,
}

impl WireBlock for Global {
    const SIZE: usize = 52;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            aq_ctr: r.read_u16::<BigEndian>()?,
            clock_qual: r.read_u16::<BigEndian>()?,
            clock_loss: r.read_u16::<BigEndian>()?,
            current_voltage: r.read_u16::<BigEndian>()?,
            sec_offset: r.read_u32::<BigEndian>()?,
            usec_offset: r.read_u32::<BigEndian>()?,
            total_time: r.read_u32::<BigEndian>()?,
            total_power: r.read_u32::<BigEndian>()?,
            last_resync: r.read_u32::<BigEndian>()?,
            resyncs: r.read_u32::<BigEndian>()?,
            gps_stat: r.read_u16::<BigEndian>()?,
            cal_stat: r.read_u16::<BigEndian>()?,
            sensor_map: r.read_u16::<BigEndian>()?,
            cur_vco: r.read_u16::<BigEndian>()?,
            data_seq: r.read_u16::<BigEndian>()?,
            pll_flag: r.read_u16::<BigEndian>()?,
            stat_inp: r.read_u16::<BigEndian>()?,
            misc_inp: r.read_u16::<BigEndian>()?,
            cur_sequence: r.read_u32::<BigEndian>()?,
        })
    }
}

/// GPS status
///
/// The text fields are NMEA style strings with a leading length byte,
/// NUL padded to their fixed width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gps {
    pub gps_time: u16,
    pub gps_on: u16,
    pub sat_used: u16,
    pub sat_view: u16,
    pub time: [u8; 10],
    pub date: [u8; 12],
    pub fix: [u8; 6],
    pub height: [u8; 12],
    pub lat: [u8; 14],
    pub lon: [u8; 14],
    pub last_good: u32,
    pub check_err: u32,
}

impl WireBlock for Gps {
    const SIZE: usize = 84;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            gps_time: r.read_u16::<BigEndian>()?,
            gps_on: r.read_u16::<BigEndian>()?,
            sat_used: r.read_u16::<BigEndian>()?,
            sat_view: r.read_u16::<BigEndian>()?,
            time: read_bytes(r)?,
            date: read_bytes(r)?,
            fix: read_bytes(r)?,
            height: read_bytes(r)?,
            lat: read_bytes(r)?,
            lon: read_bytes(r)?,
            last_good: r.read_u32::<BigEndian>()?,
            check_err: r.read_u32::<BigEndian>()?,
        })
    }
}

/// Boom positions, temperatures and currents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boom {
    pub booms: [i16; 6],
    pub amb_pos: u16,
    pub amb_neg: u16,
    pub supply: u16,
    pub sys_temp: i16,
    pub main_cur: i16,
    pub ant_cur: i16,
    pub seis1_temp: i16,
    pub seis2_temp: i16,
    pub cal_timeouts: u32,
}

impl WireBlock for Boom {
    const SIZE: usize = 32;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut booms = [0i16; 6];
        r.read_i16_into::<BigEndian>(&mut booms)?;

        Ok(Self {
            booms,
            amb_pos: r.read_u16::<BigEndian>()?,
            amb_neg: r.read_u16::<BigEndian>()?,
            supply: r.read_u16::<BigEndian>()?,
            sys_temp: r.read_i16::<BigEndian>()?,
            main_cur: r.read_i16::<BigEndian>()?,
            ant_cur: r.read_i16::<BigEndian>()?,
            seis1_temp: r.read_i16::<BigEndian>()?,
            seis2_temp: r.read_i16::<BigEndian>()?,
            cal_timeouts: r.read_u32::<BigEndian>()?,
        })
    }
}

/// Ethernet counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ether {
    pub check: u32,
    pub io_errors: u32,
    pub phy_num: u16,
    pub spare: u16,
    pub unreach: u32,
    pub quench: u32,
    pub echo: u32,
    pub redirect: u32,
    pub runt: u32,
    pub crc_err: u32,
    pub bcast: u32,
    pub ucast: u32,
    pub good: u32,
    pub jabber: u32,
    pub out_win: u32,
    pub tx_ok: u32,
    pub miss: u32,
    pub collide: u32,
    pub link_stat: u16,
    pub spare2: u16,
    pub spare3: u32,
}

impl WireBlock for Ether {
    const SIZE: usize = 76;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            check: r.read_u32::<BigEndian>()?,
            io_errors: r.read_u32::<BigEndian>()?,
            phy_num: r.read_u16::<BigEndian>()?,
            spare: r.read_u16::<BigEndian>()?,
            unreach: r.read_u32::<BigEndian>()?,
            quench: r.read_u32::<BigEndian>()?,
            echo: r.read_u32::<BigEndian>()?,
            redirect: r.read_u32::<BigEndian>()?,
            runt: r.read_u32::<BigEndian>()?,
            crc_err: r.read_u32::<BigEndian>()?,
            bcast: r.read_u32::<BigEndian>()?,
            ucast: r.read_u32::<BigEndian>()?,
            good: r.read_u32::<BigEndian>()?,
            jabber: r.read_u32::<BigEndian>()?,
            out_win: r.read_u32::<BigEndian>()?,
            tx_ok: r.read_u32::<BigEndian>()?,
            miss: r.read_u32::<BigEndian>()?,
            collide: r.read_u32::<BigEndian>()?,
            link_stat: r.read_u16::<BigEndian>()?,
            spare2: r.read_u16::<BigEndian>()?,
            spare3: r.read_u32::<BigEndian>()?,
        })
    }
}

/// Logical data port counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicalPort {
    pub sent: u32,
    pub resends: u32,
    pub fill: u32,
    pub seq: u32,
    pub pack_used: u32,
    pub last_ack: u32,
    pub phy_num: u16,
    pub log_num: u16,
    pub retran: u16,
    pub spare: u16,
}

impl WireBlock for LogicalPort {
    const SIZE: usize = 32;

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            sent: r.read_u32::<BigEndian>()?,
            resends: r.read_u32::<BigEndian>()?,
            fill: r.read_u32::<BigEndian>()?,
            seq: r.read_u32::<BigEndian>()?,
            pack_used: r.read_u32::<BigEndian>()?,
            last_ack: r.read_u32::<BigEndian>()?,
            phy_num: r.read_u16::<BigEndian>()?,
            log_num: r.read_u16::<BigEndian>()?,
            retran: r.read_u16::<BigEndian>()?,
            spare: r.read_u16::<BigEndian>()?,
        })
    }
}
