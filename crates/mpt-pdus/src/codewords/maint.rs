//! Miscellaneous control (category 000, type 11) concerning a call in
//! progress: call maintenance, clear down and move.

use core::fmt;

use mpt_core::{ChannelNumber, Ident, IdentDisplay};

use crate::enums::maint_oper::MaintOper;
use crate::fields::*;
use crate::parse_error::{CodewordParseErr, expect_header};

const FUNC_MAINT: u8 = 1;
const FUNC_CLEAR: u8 = 2;
const FUNC_MOVE: u8 = 3;

/// Bit reversals filling the low 12 bits of CLEAR
const CLEAR_FILL: u64 = 0xAAA;

/// Call maintenance. Sent on a traffic channel by either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Maint {
    pub pfix: u8,
    pub ident1: Ident,
    /// 10 bits
    pub chan: ChannelNumber,
    /// 3 bits
    pub oper: MaintOper,
    /// 5 bits
    pub rsvd: u8,
}

impl Maint {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_header(cw, CAT000_HEADER_MASK, cat000_header(TYPE_MISC, FUNC_MAINT))?;
        Ok(Maint {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            chan: get(cw, CHAN_BITS, 8) as ChannelNumber,
            oper: MaintOper::from_raw(get(cw, 3, 5) as u8),
            rsvd: get(cw, 5, 0) as u8,
        })
    }

    pub fn to_cw(&self) -> u64 {
        cat000_header(TYPE_MISC, FUNC_MAINT)
            | put_prefix_ident1(self.pfix, self.ident1)
            | put(self.chan as u64, CHAN_BITS, 8)
            | put(self.oper.into_raw() as u64, 3, 5)
            | put(self.rsvd as u64, 5, 0)
    }
}

impl fmt::Display for Maint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MAINT[pfix=0x{:02x} ident1={} chan={} oper={} ({}) rsvd={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            self.chan,
            self.oper.into_raw(),
            self.oper,
            self.rsvd
        )
    }
}

/// Clear down a traffic channel, sending its users back to the control channel `cont`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clear {
    /// 10 bits, the traffic channel being cleared
    pub chan: ChannelNumber,
    /// 10 bits, control channel to return to
    pub cont: ChannelNumber,
    /// 3 bits
    pub rsvd: u8,
    /// 2 bits
    pub spare: u8,
}

impl Clear {
    pub fn to_cw(&self) -> u64 {
        cat000_header(TYPE_MISC, FUNC_CLEAR)
            | put(self.chan as u64, CHAN_BITS, 37)
            | put(self.cont as u64, CHAN_BITS, 27)
            | put(self.rsvd as u64, 3, 14)
            | put(self.spare as u64, 2, 12)
            | CLEAR_FILL
    }
}

impl fmt::Display for Clear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CLEAR[chan={} cont={} rsvd={} spare={}]", self.chan, self.cont, self.rsvd, self.spare)
    }
}

/// Move units to another control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub pfix: u8,
    pub ident1: Ident,
    /// 10 bits, new control channel
    pub cont: ChannelNumber,
    /// 5 bits, address qualifier
    pub m: u8,
    /// 2 bits
    pub rsvd: u8,
    /// 1 bit
    pub spare: u8,
}

impl Move {
    pub fn to_cw(&self) -> u64 {
        cat000_header(TYPE_MISC, FUNC_MOVE)
            | put_prefix_ident1(self.pfix, self.ident1)
            | put(self.cont as u64, CHAN_BITS, 8)
            | put(self.m as u64, 5, 3)
            | put(self.rsvd as u64, 2, 1)
            | put(self.spare as u64, 1, 0)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MOVE[pfix=0x{:02x} ident1={} cont={} m={} rsvd={} spare={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            self.cont,
            self.m,
            self.rsvd,
            self.spare
        )
    }
}
