/// Aloha function field (3 bits). Selects which random access messages are invited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlohaFunction {
    /// ALH: any single codeword message invited
    Alh = 0,
    /// ALHS: messages invited, except RQD
    Alhs = 1,
    /// ALHD: messages invited, except RQS
    Alhd = 2,
    /// ALHE: emergency requests (RQE) only invited
    Alhe = 3,
    /// ALHR: registration (RQR) or emergency requests (RQE) invited
    Alhr = 4,
    /// ALHX: messages invited, except RQR
    Alhx = 5,
    /// ALHF: fall back mode (system dependent)
    Alhf = 6,
    Reserved = 7,
}

impl AlohaFunction {
    pub fn from_raw(x: u8) -> Self {
        match x & 0x7 {
            0 => AlohaFunction::Alh,
            1 => AlohaFunction::Alhs,
            2 => AlohaFunction::Alhd,
            3 => AlohaFunction::Alhe,
            4 => AlohaFunction::Alhr,
            5 => AlohaFunction::Alhx,
            6 => AlohaFunction::Alhf,
            _ => AlohaFunction::Reserved,
        }
    }

    pub fn into_raw(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for AlohaFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AlohaFunction::Alh => write!(f, "ALH"),
            AlohaFunction::Alhs => write!(f, "ALHS"),
            AlohaFunction::Alhd => write!(f, "ALHD"),
            AlohaFunction::Alhe => write!(f, "ALHE"),
            AlohaFunction::Alhr => write!(f, "ALHR"),
            AlohaFunction::Alhx => write!(f, "ALHX"),
            AlohaFunction::Alhf => write!(f, "ALHF"),
            AlohaFunction::Reserved => write!(f, "ALH(RSVD)"),
        }
    }
}

/// Frame length in slots for a 2-bit N field (GTC)
const ALOHA_SLOTS_2BIT: [u8; 4] = [0, 1, 3, 6];

/// Frame length in slots for a 4-bit N field (Aloha). Linear up to 10, then stretches.
const ALOHA_SLOTS_4BIT: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 15, 19, 25, 32];

/// Slots in the Aloha frame announced by a 2-bit N field
#[inline]
pub fn aloha_slots_2bit(n: u8) -> u8 {
    ALOHA_SLOTS_2BIT[(n & 0x3) as usize]
}

/// Slots in the Aloha frame announced by a 4-bit N field
#[inline]
pub fn aloha_slots_4bit(n: u8) -> u8 {
    ALOHA_SLOTS_4BIT[(n & 0xF) as usize]
}
