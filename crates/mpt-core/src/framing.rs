use crate::fcs::{CODEWORD_MASK, fcs};

/// Bit reversals preceding every synchronisation word
pub const PREAMBLE: u16 = 0xAAAA;
/// Control channel synchronisation sequence
pub const SYNC: u16 = 0xC4D7;
/// Traffic channel synchronisation sequence
pub const SYNT: u16 = 0x3B28;

/// On-air bits per codeword, including the FCS
pub const WIRE_BITS: u32 = 64;

/// Sent on a traffic channel ahead of a traffic codeword, in place of a
/// complete codeword. Preamble bit reversals followed by SYNT.
pub const TRAFFIC_SYNC_WORD: u64 = 0xAAAA_AAAA_AAAA_0000 | SYNT as u64;

/// Appends the FCS to a 48-bit codeword, producing the 64-bit on-air word
#[inline]
pub fn fcs_add(cw: u64) -> u64 {
    let cw = cw & CODEWORD_MASK;
    (cw << 16) | fcs(cw) as u64
}

/// Splits a 64-bit on-air word into its codeword if the FCS checks out
#[inline]
pub fn fcs_strip(word: u64) -> Option<u64> {
    let cw = word >> 16;
    if fcs(cw) == (word & 0xFFFF) as u16 {
        Some(cw)
    } else {
        None
    }
}

/// Bit-serial codeword synchroniser for the receive path.
///
/// Every demodulated bit is shifted into a 64-bit window. Whenever the low
/// 16 bits of the window are the FCS of the upper 48, the upper 48 bits are a
/// codeword. There is no carrier detect, so at least a full window of bits must
/// arrive after a reset or a hit before the window is tested again.
#[derive(Debug, Default, Clone)]
pub struct CodewordDeframer {
    window: u64,
    fill: u32,
    hits: u64,
}

impl CodewordDeframer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts one bit in. Returns the codeword if this bit completed one.
    pub fn push_bit(&mut self, bit: bool) -> Option<u64> {
        self.window = (self.window << 1) | bit as u64;
        if self.fill < WIRE_BITS {
            self.fill += 1;
        }
        if self.fill < WIRE_BITS {
            return None;
        }

        let cw = fcs_strip(self.window)?;
        self.fill = 0;
        self.hits += 1;
        tracing::trace!("deframer: codeword 0x{:012x} (hit {})", cw, self.hits);
        Some(cw)
    }

    /// Shifts a whole on-air word in, MSB first. Returns every codeword found.
    pub fn push_word(&mut self, word: u64) -> Vec<u64> {
        (0..WIRE_BITS)
            .rev()
            .filter_map(|n| self.push_bit((word >> n) & 1 == 1))
            .collect()
    }

    /// Drops any partial window, e.g. when the carrier goes away
    pub fn reset(&mut self) {
        self.window = 0;
        self.fill = 0;
    }

    /// Number of codewords recovered so far
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
