//! Requests (category 000, type 10, sent by radio units). Requests share the
//! type with the TSC's Ahoy messages; direction tells them apart.

use core::fmt;

use mpt_core::{Ident, IdentDisplay};

use crate::fields::*;
use crate::parse_error::{CodewordParseErr, expect_header};

pub const FUNC_RQS: u8 = 0;
pub const FUNC_RQX: u8 = 2;
pub const FUNC_RQT: u8 = 3;
pub const FUNC_RQE: u8 = 4;
pub const FUNC_RQR: u8 = 5;
pub const FUNC_RQQ: u8 = 6;
pub const FUNC_RQC: u8 = 7;

#[inline]
fn request_base(func: u8, pfix: u8, ident1: Ident) -> u64 {
    cat000_header(TYPE_AHOY_REQUEST, func) | put_prefix_ident1(pfix, ident1)
}

#[inline]
fn expect_request(cw: u64, func: u8) -> Result<(), CodewordParseErr> {
    expect_header(cw, CAT000_HEADER_MASK, cat000_header(TYPE_AHOY_REQUEST, func))
}

/// Request simple call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqs {
    pub pfix: u8,
    /// 13 bits, called party
    pub ident1: Ident,
    /// 13 bits, calling party
    pub ident2: Ident,
    /// 1 bit, data call
    pub dt: bool,
    /// 1 bit, call priority
    pub level: bool,
    /// 1 bit, extended addressing
    pub ext: bool,
    pub flag1: bool,
    pub flag2: bool,
}

impl Rqs {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQS)?;
        Ok(Rqs {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            dt: get_flag(cw, 4),
            level: get_flag(cw, 3),
            ext: get_flag(cw, 2),
            flag1: get_flag(cw, 1),
            flag2: get_flag(cw, 0),
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQS, self.pfix, self.ident1)
            | put_ident2(self.ident2)
            | put_flag(self.dt, 4)
            | put_flag(self.level, 3)
            | put_flag(self.ext, 2)
            | put_flag(self.flag1, 1)
            | put_flag(self.flag2, 0)
    }
}

impl fmt::Display for Rqs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQS[pfix=0x{:02x} ident1={} ident2={} dt={} level={} ext={} flag1={} flag2={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.dt as u8,
            self.level as u8,
            self.ext as u8,
            self.flag1 as u8,
            self.flag2 as u8
        )
    }
}

/// Request call cancel / abort transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqx {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 5 bits
    pub rsvd: u8,
}

impl Rqx {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQX)?;
        Ok(Rqx {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            rsvd: get(cw, 5, 0) as u8,
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQX, self.pfix, self.ident1) | put_ident2(self.ident2) | put(self.rsvd as u64, 5, 0)
    }
}

impl fmt::Display for Rqx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQX[pfix=0x{:02x} ident1={} ident2={} rsvd={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.rsvd
        )
    }
}

/// Request call diversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqt {
    pub pfix: u8,
    pub ident1: Ident,
    /// 13 bits, where calls should be diverted to
    pub ident2: Ident,
    /// 5 bits
    pub rsvd: u8,
}

impl Rqt {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQT)?;
        Ok(Rqt {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            rsvd: get(cw, 5, 0) as u8,
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQT, self.pfix, self.ident1) | put_ident2(self.ident2) | put(self.rsvd as u64, 5, 0)
    }
}

impl fmt::Display for Rqt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQT[pfix=0x{:02x} ident1={} ident2={} rsvd={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.rsvd
        )
    }
}

/// Request emergency call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqe {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 1 bit, data call
    pub d: bool,
    pub rsvd: bool,
    pub ext: bool,
    pub flag1: bool,
    pub flag2: bool,
}

impl Rqe {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQE)?;
        Ok(Rqe {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            d: get_flag(cw, 4),
            rsvd: get_flag(cw, 3),
            ext: get_flag(cw, 2),
            flag1: get_flag(cw, 1),
            flag2: get_flag(cw, 0),
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQE, self.pfix, self.ident1)
            | put_ident2(self.ident2)
            | put_flag(self.d, 4)
            | put_flag(self.rsvd, 3)
            | put_flag(self.ext, 2)
            | put_flag(self.flag1, 1)
            | put_flag(self.flag2, 0)
    }
}

impl fmt::Display for Rqe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQE[pfix=0x{:02x} ident1={} ident2={} d={} rsvd={} ext={} flag1={} flag2={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.d as u8,
            self.rsvd as u8,
            self.ext as u8,
            self.flag1 as u8,
            self.flag2 as u8
        )
    }
}

/// Request to register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqr {
    pub pfix: u8,
    /// 13 bits, the registering unit
    pub ident1: Ident,
    /// 15 bits
    pub info: u16,
    /// 3 bits
    pub rsvd: u8,
}

impl Rqr {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQR)?;
        Ok(Rqr {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            info: get(cw, 15, 3) as u16,
            rsvd: get(cw, 3, 0) as u8,
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQR, self.pfix, self.ident1) | put(self.info as u64, 15, 3) | put(self.rsvd as u64, 3, 0)
    }
}

impl fmt::Display for Rqr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQR[pfix=0x{:02x} ident1={} info={} rsvd={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            self.info,
            self.rsvd
        )
    }
}

/// Request status transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqq {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 5 bits
    pub status: u8,
}

impl Rqq {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQQ)?;
        Ok(Rqq {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            status: get(cw, 5, 0) as u8,
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQQ, self.pfix, self.ident1) | put_ident2(self.ident2) | put(self.status as u64, 5, 0)
    }
}

impl fmt::Display for Rqq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQQ[pfix=0x{:02x} ident1={} ident2={} status={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.status
        )
    }
}

/// Request to send a short data message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rqc {
    pub pfix: u8,
    pub ident1: Ident,
    pub ident2: Ident,
    /// 2 bits, slots wanted for the message
    pub slots: u8,
    pub ext: bool,
    pub flag1: bool,
    pub flag2: bool,
}

impl Rqc {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_request(cw, FUNC_RQC)?;
        Ok(Rqc {
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            slots: get(cw, 2, 3) as u8,
            ext: get_flag(cw, 2),
            flag1: get_flag(cw, 1),
            flag2: get_flag(cw, 0),
        })
    }

    pub fn to_cw(&self) -> u64 {
        request_base(FUNC_RQC, self.pfix, self.ident1)
            | put_ident2(self.ident2)
            | put(self.slots as u64, 2, 3)
            | put_flag(self.ext, 2)
            | put_flag(self.flag1, 1)
            | put_flag(self.flag2, 0)
    }
}

impl fmt::Display for Rqc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RQC[pfix=0x{:02x} ident1={} ident2={} slots={} ext={} flag1={} flag2={}]",
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.slots,
            self.ext as u8,
            self.flag1 as u8,
            self.flag2 as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rqs() {
        let rqs = Rqs {
            pfix: 0,
            ident1: 3,
            ident2: 2,
            dt: false,
            level: false,
            ext: false,
            flag1: false,
            flag2: false,
        };
        let cw = rqs.to_cw();
        assert_eq!(cw, 0x8000_1c40_0040);
        assert_eq!(Rqs::from_cw(cw), Ok(rqs));
        assert_eq!(
            rqs.to_string(),
            "RQS[pfix=0x00 ident1=0003 ident2=0002 dt=0 level=0 ext=0 flag1=0 flag2=0]"
        );
    }

    #[test]
    fn test_rqr() {
        let rqr = Rqr { pfix: 0x10, ident1: 77, info: 12345, rsvd: 5 };
        let cw = rqr.to_cw();
        assert_eq!(cw, 0x9002_6c55_81cd);
        assert_eq!(Rqr::from_cw(cw), Ok(rqr));
        assert_eq!(rqr.to_string(), "RQR[pfix=0x10 ident1=0077 info=12345 rsvd=5]");
    }

    #[test]
    fn test_function_mismatch_rejected() {
        let cw = Rqx { pfix: 1, ident1: 2, ident2: 3, rsvd: 0 }.to_cw();
        assert!(Rqx::from_cw(cw).is_ok());
        assert!(Rqq::from_cw(cw).is_err());
        assert!(Rqt::from_cw(cw).is_err());
    }

    #[test]
    fn test_rqc_slots() {
        let rqc = Rqc { pfix: 0, ident1: 10, ident2: 20, slots: 3, ext: true, flag1: false, flag2: true };
        let decoded = Rqc::from_cw(rqc.to_cw()).unwrap();
        assert_eq!(decoded.slots, 3);
        assert_eq!(decoded, rqc);
    }
}
