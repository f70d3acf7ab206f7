use core::fmt;

use crate::fields::*;
use crate::parse_error::{CodewordParseErr, expect_header};

const P1_BITS: u32 = 20;
const P1_OFFSET: u32 = 27;
const P2_BITS: u32 = 18;
const MODE_OFFSET: u32 = 21;
const DESC_OFFSET: u32 = 18;

/// Header bits identifying a SAMIS: category 001 and DESC 000. MODE is not part of it.
const SAMIS_MASK: u64 = ADDRESS_FLAG | NOT_GTC_FLAG | (0x7 << CAT_OFFSET) | (0x7 << DESC_OFFSET);
const SAMIS_HEADER: u64 = ADDRESS_FLAG | NOT_GTC_FLAG | ((CAT_SINGLE_ADDRESS as u64) << CAT_OFFSET);

/// Single address message, inbound and solicited (category 001, DESC 000).
/// The only content interpreted here is the electronic serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Samis {
    /// 2 bits
    pub mode: u8,
    /// 20 bits
    pub parameters1: u32,
    /// 18 bits
    pub parameters2: u32,
}

impl Samis {
    pub fn from_cw(cw: u64) -> Result<Self, CodewordParseErr> {
        expect_header(cw, SAMIS_MASK, SAMIS_HEADER)?;
        Ok(Samis {
            mode: get(cw, 2, MODE_OFFSET) as u8,
            parameters1: get(cw, P1_BITS, P1_OFFSET) as u32,
            parameters2: get(cw, P2_BITS, 0) as u32,
        })
    }

    pub fn to_cw(&self) -> u64 {
        SAMIS_HEADER
            | put(self.mode as u64, 2, MODE_OFFSET)
            | put(self.parameters1 as u64, P1_BITS, P1_OFFSET)
            | put(self.parameters2 as u64, P2_BITS, 0)
    }

    /// ESN manufacturer code, 8 bits
    pub fn mfg_code(&self) -> u8 {
        (self.parameters1 >> 12) as u8
    }

    /// ESN model, 4 bits
    pub fn model(&self) -> u8 {
        ((self.parameters1 >> 8) & 0xF) as u8
    }

    pub fn chk_bits(&self) -> u8 {
        self.parameters1 as u8
    }

    /// ESN serial number, 18 bits
    pub fn serial(&self) -> u32 {
        self.parameters2
    }
}

impl fmt::Display for Samis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SAMIS[esn={:03}/{:02}/{:06} chkbits=0x{:x}]",
            self.mfg_code(),
            self.model(),
            self.serial(),
            self.chk_bits()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esn() {
        let samis = Samis { mode: 0, parameters1: 0xABCDE, parameters2: 0x2BEEF };
        let cw = samis.to_cw();
        assert_eq!(cw, 0xd5e6_f482_beef);
        let decoded = Samis::from_cw(cw).unwrap();
        assert_eq!(decoded, samis);
        assert_eq!(decoded.mfg_code(), 171);
        assert_eq!(decoded.model(), 12);
        assert_eq!(decoded.chk_bits(), 0xDE);
        assert_eq!(decoded.serial(), 179951);
        assert_eq!(decoded.to_string(), "SAMIS[esn=171/12/179951 chkbits=0xde]");
    }

    #[test]
    fn test_nonzero_desc_rejected() {
        let cw = Samis { mode: 1, parameters1: 1, parameters2: 1 }.to_cw();
        assert!(Samis::from_cw(cw).is_ok());
        assert!(Samis::from_cw(cw | 1 << DESC_OFFSET).is_err());
    }
}
