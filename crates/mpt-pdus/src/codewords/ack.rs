use core::fmt;

use mpt_core::{Ident, IdentDisplay};

use crate::enums::ack_function::AckFunction;
use crate::fields::*;
use crate::parse_error::{CodewordParseErr, expect_header};

/// Acknowledgement (category 000, type 01). Sent by the TSC, and by radio units
/// in answer to an Ahoy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// 3 bits
    pub function: AckFunction,
    /// 7 bits
    pub pfix: u8,
    /// 13 bits
    pub ident1: Ident,
    /// 13 bits
    pub ident2: Ident,
    /// 1 bit
    pub qual: bool,
    /// 4 bits
    pub n: u8,
}

impl Ack {
    pub fn new(function: AckFunction, pfix: u8, ident1: Ident, ident2: Ident) -> Self {
        Self { function, pfix, ident1, ident2, qual: false, n: 0 }
    }

    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_header(cw, CAT000_TYPE_MASK, cat000_header(TYPE_ACK, 0))?;
        Ok(Ack {
            function: AckFunction::from_raw(get_func(cw)),
            pfix: get_pfix(cw),
            ident1: get_ident1(cw),
            ident2: get_ident2(cw),
            qual: get_flag(cw, 4),
            n: get(cw, 4, 0) as u8,
        })
    }

    pub fn to_cw(&self) -> u64 {
        cat000_header(TYPE_ACK, self.function.into_raw())
            | put_prefix_ident1(self.pfix, self.ident1)
            | put_ident2(self.ident2)
            | put_flag(self.qual, 4)
            | put(self.n as u64, 4, 0)
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[pfix=0x{:02x} ident1={} ident2={} qual={} n={}]",
            self.function,
            self.pfix,
            IdentDisplay(self.ident1),
            IdentDisplay(self.ident2),
            self.qual as u8,
            self.n
        )
    }
}
