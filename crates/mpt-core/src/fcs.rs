//! MPT1327 frame check sequence.
//!
//! Every 48-bit codeword goes on air followed by a 16-bit FCS: 15 bits of a
//! cyclic check (generator feedback 0x6815) and one even parity bit covering
//! all 63 preceding bits. Radios reject anything that is not bit-identical, so
//! the table-driven [`fcs`] is checked against the bit-serial [`fcs_bitwise`].

/// Feedback constant of the checksum shift register
pub const FCS_FEEDBACK: u16 = 0x6815;

/// Inverted bit applied to the register once all 48 bits are in
const FCS_FINAL_XOR: u16 = 0x0002;

/// Bit 0 of the FCS carries parity, the check itself occupies bits 15..1
const FCS_CHECK_MASK: u16 = 0xFFFE;

pub const CODEWORD_BITS: u32 = 48;
pub const CODEWORD_MASK: u64 = (1 << CODEWORD_BITS) - 1;

const FCS_TABLE: [u16; 256] = build_table();

/// Register contents after clocking 8 zero bits through a register preloaded
/// with `idx << 8`. Low register bits only reach the feedback tap after the
/// eighth shift, so a byte step is `(ck << 8) ^ TABLE[(ck >> 8) ^ byte]`.
const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut ck = (i as u16) << 8;
        let mut n = 0;
        while n < 8 {
            if ck & 0x8000 != 0 {
                ck ^= FCS_FEEDBACK;
            }
            ck <<= 1;
            n += 1;
        }
        table[i] = ck;
        i += 1;
    }
    table
}

#[inline]
fn finish(ck: u16, cw: u64) -> u16 {
    let ck = (ck ^ FCS_FINAL_XOR) & FCS_CHECK_MASK;
    let parity = ((cw & CODEWORD_MASK).count_ones() + ck.count_ones()) & 1;
    ck | parity as u16
}

/// Computes the FCS of the low 48 bits of `cw`, one byte per step.
pub fn fcs(cw: u64) -> u16 {
    let mut ck: u16 = 0;
    for shift in [40, 32, 24, 16, 8, 0] {
        let byte = (cw >> shift) as u8;
        let idx = ((ck >> 8) as u8 ^ byte) as usize;
        ck = (ck << 8) ^ FCS_TABLE[idx];
    }
    finish(ck, cw)
}

/// Reference implementation, clocking one bit at a time MSB first.
pub fn fcs_bitwise(cw: u64) -> u16 {
    let mut ck: u16 = 0;
    let mut parity: u16 = 0;

    for n in 0..CODEWORD_BITS {
        let b = ((cw >> (CODEWORD_BITS - 1 - n)) & 1) as u16;
        parity ^= b;
        if (b ^ (ck >> 15)) & 1 != 0 {
            ck ^= FCS_FEEDBACK;
        }
        ck <<= 1;
    }
    let ck = (ck ^ FCS_FINAL_XOR) & FCS_CHECK_MASK;

    for n in 0..16 {
        parity ^= (ck >> (15 - n)) & 1;
    }
    ck | parity
}
