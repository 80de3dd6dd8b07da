//! Normalized state-of-health record
//!
//! A reformatted subset of a status response: device epoch counters are
//! turned into UTC timestamps, the block bitmap is rendered as hex and the
//! fixed width GPS strings are trimmed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Number of logical data ports reported by the device
pub const LOGICAL_PORTS: usize = 4;

/// State of health record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soh {
    pub header: SohHeader,
    pub global: SohGlobal,
    pub boom: SohBoom,
    pub ether: SohEther,
    pub gps: SohGps,
    pub lport: [SohLogicalPort; LOGICAL_PORTS],

    /// When the record was decoded (not reported by the device)
    pub timestamp: DateTime<Utc>,
}

impl Soh {
    /// Compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, as written by the command line tool
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SohHeader {
    pub drift_tol: u16,
    pub user_msg_cnt: u16,
    pub last_reboot: DateTime<Utc>,

    /// Blocks present in the response, e.g. `0x8f0b`
    pub bitmap: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SohGlobal {
    pub clock_qual: u16,
    pub clock_loss: u16,
    pub current_voltage: u16,
    pub sec_offset: u32,
    pub usec_offset: u32,
    pub total_time: u32,
    pub total_power: u32,
    pub last_resync: DateTime<Utc>,
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

/// Boom positions and environmental sensors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SohBoom {
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

/// Ethernet interface counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SohEther {
    pub check: u32,
    // Deployed consumers key on this spelling.
    #[serde(rename = "io_erros")]
    pub io_errors: u32,
    pub phy_num: u16,
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
    #[serde(rename = "outwin")]
    pub out_win: u32,
    pub tx_ok: u32,
    pub miss: u32,
    pub collide: u32,
    pub link_stat: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SohGps {
    pub gps_time: u16,
    pub gps_on: u16,
    pub sat_used: u16,
    pub sat_view: u16,
    pub time: String,
    pub date: String,
    pub fix: String,
    pub height: String,
    pub lat: String,
    pub lon: String,
    pub last_good: DateTime<Utc>,
    pub check_err: u32,
}

/// Logical data port counters, tagged with the port index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SohLogicalPort {
    pub port: u8,
    pub sent: u32,
    pub resends: u32,
    pub fill: u32,
    pub seq: u32,
    pub pack_used: u32,
    pub last_ack: u32,
    pub phy_num: u16,
    pub log_num: u16,
    pub retran: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::epoch_to_time;
    use pretty_assertions::assert_eq;

    fn sample() -> Soh {
        let zero = epoch_to_time(0);
        Soh {
            header: SohHeader {
                drift_tol: 10,
                user_msg_cnt: 0,
                last_reboot: epoch_to_time(86_400),
                bitmap: "0x8f0b".into(),
            },
            global: SohGlobal {
                clock_qual: 0xc0,
                clock_loss: 0,
                current_voltage: 0,
                sec_offset: 0,
                usec_offset: 0,
                total_time: 0,
                total_power: 0,
                last_resync: zero,
                resyncs: 0,
                gps_stat: 0,
                cal_stat: 0,
                sensor_map: 0,
                cur_vco: 0,
                data_seq: 0,
                pll_flag: 0,
                stat_inp: 0,
                misc_inp: 0,
                cur_sequence: 0,
            },
            boom: SohBoom::default(),
            ether: SohEther {
                io_errors: 7,
                out_win: 2,
                ..Default::default()
            },
            gps: SohGps {
                gps_time: 0,
                gps_on: 1,
                sat_used: 6,
                sat_view: 9,
                time: "12:00:00".into(),
                date: "01/06/2015".into(),
                fix: "3-D".into(),
                height: "10M".into(),
                lat: "-41.2".into(),
                lon: "174.7".into(),
                last_good: zero,
                check_err: 0,
            },
            lport: [0u8, 1, 2, 3].map(|port| SohLogicalPort {
                port,
                ..Default::default()
            }),
            timestamp: zero,
        }
    }

    #[test]
    fn test_soh_json_layout() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["header"]["bitmap"], "0x8f0b");
        assert_eq!(json["header"]["last_reboot"], "2000-01-02T00:00:00Z");
        assert_eq!(json["global"]["clock_qual"], 0xc0);
        assert_eq!(json["gps"]["fix"], "3-D");
        assert_eq!(json["lport"].as_array().unwrap().len(), LOGICAL_PORTS);
        assert_eq!(json["lport"][3]["port"], 3);
    }

    #[test]
    fn test_ether_legacy_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        let ether = json["ether"].as_object().unwrap();

        assert_eq!(ether["io_erros"], 7);
        assert_eq!(ether["outwin"], 2);
        assert!(!ether.contains_key("io_errors"));
    }

    #[test]
    fn test_soh_json_roundtrip() {
        let original = sample();
        let parsed: Soh = serde_json::from_str(&original.to_json().unwrap()).unwrap();

        assert_eq!(parsed, original);
    }
}
