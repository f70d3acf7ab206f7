//! Ahoy messages (category 000, type 10, sent by the TSC). Each one demands a
//! response from the unit addressed by PFIX/IDENT1.

use core::fmt;

use mpt_core::{Ident, IdentDisplay};

use crate::fields::*;

const FUNC_AHY: u8 = 0;
const FUNC_AHYX: u8 = 2;
const FUNC_AHYP: u8 = 5;
const FUNC_AHYQ: u8 = 6;
const FUNC_AHYC: u8 = 7;

#[inline]
fn ahoy_base(func: u8, pfix: u8, ident1: Ident, ident2: Ident) -> u64 {
    cat000_header(TYPE_AHOY_REQUEST, func) | put_prefix_ident1(pfix, ident1) | put_ident2(ident2)
}

/// General availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ahy {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 1 bit, data call
    pub d: bool,
    pub point: bool,
    pub check: bool,
    /// 1 bit, emergency
    pub e: bool,
    pub ad: bool,
}

impl Ahy {
    /// Ahoy to DUMMYI that no unit answers. Fills reserved slots on the control channel.
    pub fn dummy() -> Self {
        Self {
            pfix: 0,
            ident1: mpt_core::ident::DUMMYI,
            ident2: mpt_core::ident::DUMMYI,
            d: false,
            point: false,
            check: false,
            e: false,
            ad: false,
        }
    }

    pub fn to_cw(&self) -> u64 {
        ahoy_base(FUNC_AHY, self.pfix, self.ident1, self.ident2)
            | put_flag(self.d, 4)
            | put_flag(self.point, 3)
            | put_flag(self.check, 2)
            | put_flag(self.e, 1)
            | put_flag(self.ad, 0)
    }
}

impl fmt::Display for Ahy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AHY[pfix=0x{:02x} ident1={} ident2={} d={} point={} check={} e={} ad={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.d as u8,
            self.point as u8,
            self.check as u8,
            self.e as u8,
            self.ad as u8
        )
    }
}

/// Cancel alert / waiting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ahyx {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 5 bits
    pub point: u8,
}

impl Ahyx {
    pub fn to_cw(&self) -> u64 {
        ahoy_base(FUNC_AHYX, self.pfix, self.ident1, self.ident2) | put(self.point as u64, 5, 0)
    }
}

impl fmt::Display for Ahyx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AHYX[pfix=0x{:02x} ident1={} ident2={} point={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.point
        )
    }
}

/// Called unit presence monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ahyp {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 5 bits
    pub rsvd: u8,
}

impl Ahyp {
    pub fn to_cw(&self) -> u64 {
        ahoy_base(FUNC_AHYP, self.pfix, self.ident1, self.ident2) | put(self.rsvd as u64, 5, 0)
    }
}

impl fmt::Display for Ahyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AHYP[pfix=0x{:02x} ident1={} ident2={} rsvd={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.rsvd
        )
    }
}

/// Status ahoy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ahyq {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 5 bits
    pub status: u8,
}

impl Ahyq {
    pub fn to_cw(&self) -> u64 {
        ahoy_base(FUNC_AHYQ, self.pfix, self.ident1, self.ident2) | put(self.status as u64, 5, 0)
    }
}

impl fmt::Display for Ahyq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AHYQ[pfix=0x{:02x} ident1={} ident2={} status={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.status
        )
    }
}

/// Short data invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ahyc {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 2 bits, number of slots reserved for the reply
    pub slots: u8,
    /// 3 bits
    pub desc: u8,
}

impl Ahyc {
    pub fn to_cw(&self) -> u64 {
        ahoy_base(FUNC_AHYC, self.pfix, self.ident1, self.ident2)
            | put(self.slots as u64, 2, 3)
            | put(self.desc as u64, 3, 0)
    }
}

impl fmt::Display for Ahyc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AHYC[pfix=0x{:02x} ident1={} ident2={} slots={} desc={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.slots,
            self.desc
        )
    }
}
