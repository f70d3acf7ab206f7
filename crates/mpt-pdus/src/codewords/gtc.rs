use core::fmt;

use mpt_core::{ChannelNumber, Ident, IdentDisplay};

use crate::enums::aloha_function::aloha_slots_2bit;
use crate::fields::*;

/// Go to traffic channel. The only address codeword with bit 26 clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gtc {
    /// 7 bits
    pub pfix: u8,
    /// 13 bits, called party (or group)
    pub ident1: Ident,
    /// 1 bit, data call
    pub d: bool,
    /// 10 bits, traffic channel number
    pub chan: ChannelNumber,
    /// 13 bits, calling party
    pub ident2: Ident,
    /// 2 bits, Aloha frame length
    pub n: u8,
}

impl Gtc {
    pub fn to_cw(&self) -> u64 {
        ADDRESS_FLAG
            | put_prefix_ident1(self.pfix, self.ident1)
            | put_flag(self.d, 25)
            | put(self.chan as u64, CHAN_BITS, 15)
            | put(self.ident2 as u64, IDENT_BITS, 2)
            | put(self.n as u64, 2, 0)
    }
}

impl fmt::Display for Gtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GTC[pfix=0x{:02x} ident1={} d={} chan={} ident2={} n={}(={})]",
            self.pfix,
            IdentDisplay(self.ident1),
            self.d as u8,
            self.chan,
            IdentDisplay(self.ident2),
            self.n,
            aloha_slots_2bit(self.n)
        )
    }
}
