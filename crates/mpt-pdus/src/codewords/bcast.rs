use core::fmt;

use mpt_core::{ChannelNumber, Syscode};

use crate::fields::*;

const FUNC_BCAST: u8 = 4;

/// System definition (5 bits) selecting the layout of the BCAST parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcastParams {
    /// SYSDEF 0: announce a control channel
    AnnounceControl { chan: ChannelNumber, spare: u8, rsvd: u8 },
    /// SYSDEF 1: withdraw a control channel
    WithdrawControl { chan: ChannelNumber, spare: u8, rsvd: u8 },
    /// SYSDEF 2: call maintenance parameters
    CallMaintenance { per: bool, ival: u8, pon: bool, id: bool, rsvd: u8, spare: u8 },
    /// SYSDEF 3: registration parameters
    Registration { rsvd: u8, spare: u16 },
}

impl BcastParams {
    pub fn sysdef(&self) -> u8 {
        match self {
            BcastParams::AnnounceControl { .. } => 0,
            BcastParams::WithdrawControl { .. } => 1,
            BcastParams::CallMaintenance { .. } => 2,
            BcastParams::Registration { .. } => 3,
        }
    }

    fn to_bits(&self) -> u64 {
        match *self {
            BcastParams::AnnounceControl { chan, spare, rsvd } | BcastParams::WithdrawControl { chan, spare, rsvd } => {
                put(chan as u64, CHAN_BITS, 8) | put(spare as u64, 2, 6) | put(rsvd as u64, 6, 0)
            }
            BcastParams::CallMaintenance { per, ival, pon, id, rsvd, spare } => {
                put_flag(per, 17)
                    | put(ival as u64, 5, 12)
                    | put_flag(pon, 11)
                    | put_flag(id, 10)
                    | put(rsvd as u64, 2, 8)
                    | put(spare as u64, 8, 0)
            }
            BcastParams::Registration { rsvd, spare } => put(rsvd as u64, 4, 14) | put(spare as u64, 14, 0),
        }
    }
}

/// Broadcast of system parameters (category 000, type 11, function 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bcast {
    /// 15 bits
    pub sys: Syscode,
    pub params: BcastParams,
}

impl Bcast {
    pub fn to_cw(&self) -> u64 {
        cat000_header(TYPE_MISC, FUNC_BCAST)
            | put(self.params.sysdef() as u64, 5, 42)
            | put(self.sys as u64, 15, 27)
            | self.params.to_bits()
    }
}

impl fmt::Display for Bcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.params {
            BcastParams::AnnounceControl { chan, spare, rsvd } => write!(
                f,
                "BCAST_ADDCONTROL[sys=0x{:x} chan={} spare={} rsvd={}]",
                self.sys, chan, spare, rsvd
            ),
            BcastParams::WithdrawControl { chan, spare, rsvd } => write!(
                f,
                "BCAST_DELCONTROL[sys=0x{:x} chan={} spare={} rsvd={}]",
                self.sys, chan, spare, rsvd
            ),
            BcastParams::CallMaintenance { per, ival, pon, id, rsvd, spare } => write!(
                f,
                "BCAST_MAINT[sys=0x{:x} per={} ival={} pon={} id={} rsvd={} spare={}]",
                self.sys, per as u8, ival, pon as u8, id as u8, rsvd, spare
            ),
            BcastParams::Registration { rsvd, spare } => {
                write!(f, "BCAST_REG[sys=0x{:x} rsvd={} spare={}]", self.sys, rsvd, spare)
            }
        }
    }
}
