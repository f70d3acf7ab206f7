//! Bit-field helpers shared by all codeword layouts.
//!
//! Offsets count from bit 0 of the 48-bit codeword. Values are always masked to
//! their width before packing, so oversized inputs truncate silently.

/// Bit 47: set on every address codeword (everything but CCSC/DCSC)
pub const ADDRESS_FLAG: u64 = 1 << 47;
/// Bit 26: clear on GTC, set on every other address codeword
pub const NOT_GTC_FLAG: u64 = 1 << 26;

pub const PFIX_BITS: u32 = 7;
pub const PFIX_OFFSET: u32 = 40;
pub const IDENT_BITS: u32 = 13;
pub const IDENT1_OFFSET: u32 = 27;
pub const IDENT2_OFFSET: u32 = 5;
pub const CHAN_BITS: u32 = 10;

pub const CAT_OFFSET: u32 = 23;
pub const TYPE_OFFSET: u32 = 21;
pub const FUNC_OFFSET: u32 = 18;

/// Message categories (bits 25..23)
pub const CAT_GENERIC: u8 = 0;
pub const CAT_SINGLE_ADDRESS: u8 = 1;

/// Category 000 message types (bits 22..21)
pub const TYPE_ALOHA: u8 = 0;
pub const TYPE_ACK: u8 = 1;
pub const TYPE_AHOY_REQUEST: u8 = 2;
pub const TYPE_MISC: u8 = 3;

/// Bits that identify a category 000 message down to its function
pub const CAT000_HEADER_MASK: u64 = ADDRESS_FLAG | NOT_GTC_FLAG | (0x7 << CAT_OFFSET) | (0x3 << TYPE_OFFSET) | (0x7 << FUNC_OFFSET);
/// As above, ignoring the function. Used where a whole type shares one layout
pub const CAT000_TYPE_MASK: u64 = ADDRESS_FLAG | NOT_GTC_FLAG | (0x7 << CAT_OFFSET) | (0x3 << TYPE_OFFSET);

#[inline]
pub const fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

/// Places `value` at `offset`, truncated to `bits`
#[inline]
pub const fn put(value: u64, bits: u32, offset: u32) -> u64 {
    (value & mask(bits)) << offset
}

#[inline]
pub const fn put_flag(value: bool, offset: u32) -> u64 {
    (value as u64) << offset
}

/// Extracts `bits` wide field at `offset`
#[inline]
pub const fn get(cw: u64, bits: u32, offset: u32) -> u64 {
    (cw >> offset) & mask(bits)
}

#[inline]
pub const fn get_flag(cw: u64, offset: u32) -> bool {
    (cw >> offset) & 1 == 1
}

/// Fixed bits of every category 000 message: address flag, not-GTC flag,
/// category 000, then the 2-bit type and 3-bit function
#[inline]
pub const fn cat000_header(typ: u8, func: u8) -> u64 {
    ADDRESS_FLAG | NOT_GTC_FLAG | put(typ as u64, 2, TYPE_OFFSET) | put(func as u64, 3, FUNC_OFFSET)
}

#[inline]
pub const fn get_cat(cw: u64) -> u8 {
    get(cw, 3, CAT_OFFSET) as u8
}

#[inline]
pub const fn get_type(cw: u64) -> u8 {
    get(cw, 2, TYPE_OFFSET) as u8
}

#[inline]
pub const fn get_func(cw: u64) -> u8 {
    get(cw, 3, FUNC_OFFSET) as u8
}

/// PFIX and IDENT1, common to nearly every address codeword
#[inline]
pub const fn put_prefix_ident1(pfix: u8, ident1: u16) -> u64 {
    put(pfix as u64, PFIX_BITS, PFIX_OFFSET) | put(ident1 as u64, IDENT_BITS, IDENT1_OFFSET)
}

#[inline]
pub const fn get_pfix(cw: u64) -> u8 {
    get(cw, PFIX_BITS, PFIX_OFFSET) as u8
}

#[inline]
pub const fn get_ident1(cw: u64) -> u16 {
    get(cw, IDENT_BITS, IDENT1_OFFSET) as u16
}

#[inline]
pub const fn get_ident2(cw: u64) -> u16 {
    get(cw, IDENT_BITS, IDENT2_OFFSET) as u16
}

#[inline]
pub const fn put_ident2(ident2: u16) -> u64 {
    put(ident2 as u64, IDENT_BITS, IDENT2_OFFSET)
}
