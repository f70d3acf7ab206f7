use core::fmt;

use mpt_core::{Ident, IdentDisplay};

use crate::enums::aloha_function::{AlohaFunction, aloha_slots_4bit};
use crate::fields::*;

/// Aloha invitation (category 000, type 00). Opens a random access frame of
/// `n` slots, restricted to the messages the function allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aloha {
    /// 3 bits
    pub function: AlohaFunction,
    /// 7 bits
    pub pfix: u8,
    /// 13 bits, DUMMYI for an unrestricted frame
    pub ident1: Ident,
    /// 4 bits, low bits of the channel number
    pub chan4: u8,
    /// 3 bits, delay parameter
    pub wt: u8,
    /// 2 bits
    pub rsvd: u8,
    /// 5 bits, address qualifier
    pub m: u8,
    /// 4 bits, frame length, see [`aloha_slots_4bit`]
    pub n: u8,
}

impl Aloha {
    pub fn to_cw(&self) -> u64 {
        cat000_header(TYPE_ALOHA, self.function.into_raw())
            | put_prefix_ident1(self.pfix, self.ident1)
            | put(self.chan4 as u64, 4, 14)
            | put(self.wt as u64, 3, 11)
            | put(self.rsvd as u64, 2, 9)
            | put(self.m as u64, 5, 4)
            | put(self.n as u64, 4, 0)
    }
}

impl fmt::Display for Aloha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[pfix=0x{:02x} ident1={} chan4={} wt={} rsvd={:04x} m={} n={}(={})]",
            self.function,
            self.pfix,
            IdentDisplay(self.ident1),
            self.chan4,
            self.wt,
            self.rsvd,
            self.m,
            self.n,
            aloha_slots_4bit(self.n)
        )
    }
}
