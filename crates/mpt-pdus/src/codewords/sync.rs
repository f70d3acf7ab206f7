//! Channel system codewords. These are the only codewords without the address
//! flag, and the only ones that are not built field by field: bits 31..16 are
//! chosen so that the codeword's own FCS comes out as the sync sequence.

use core::fmt;

use mpt_core::fcs;
use mpt_core::{PREAMBLE, SYSCODE_MASK, Syscode};

/// Preamble, SYNC with the final parity bit cleared, then room for the system code
const CCSC_CCS_BASE: u64 = 0xAAAA_C4D4_0000;
/// Same for SYNT
const DCSC_CCS_BASE: u64 = 0xAAAA_3B2A_0000;

/// Computes the 16-bit channel check sequence for `syscode`.
/// The first attempt is redone with the low bit set when its parity equals `retry_on_odd`.
fn ccs(base: u64, syscode: Syscode, retry_on_odd: bool) -> u64 {
    let seed = base | ((syscode & SYSCODE_MASK) as u64) << 1;
    let mut f = fcs(seed) as u64;
    if (f & 1 == 1) == retry_on_odd {
        f = (1 << 16) | fcs(seed | 1) as u64;
    }
    (f >> 1) ^ 1
}

fn build(syscode: Syscode, ccs: u64) -> u64 {
    ((syscode & SYSCODE_MASK) as u64) << 32 | (ccs & 0xFFFF) << 16 | PREAMBLE as u64
}

/// Control channel system codeword. Its FCS equals SYNC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ccsc {
    /// 15 bits
    pub syscode: Syscode,
}

impl Ccsc {
    pub fn new(syscode: Syscode) -> Self {
        Self { syscode }
    }

    pub fn to_cw(&self) -> u64 {
        build(self.syscode, ccs(CCSC_CCS_BASE, self.syscode, false))
    }
}

impl fmt::Display for Ccsc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CCSC[syscode=0x{:x}]", self.syscode)
    }
}

/// Data channel system codeword. Its FCS equals SYNT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dcsc {
    /// 15 bits
    pub syscode: Syscode,
}

impl Dcsc {
    pub fn new(syscode: Syscode) -> Self {
        Self { syscode }
    }

    pub fn to_cw(&self) -> u64 {
        build(self.syscode, ccs(DCSC_CCS_BASE, self.syscode, true))
    }
}

impl fmt::Display for Dcsc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DCSC[syscode=0x{:x}]", self.syscode)
    }
}
