/// Acknowledgement function field (3 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AckFunction {
    /// ACK: general acknowledgement
    Ack = 0,
    /// ACKI: intermediate acknowledgement
    Acki = 1,
    /// ACKQ: call queued
    Ackq = 2,
    /// ACKX: message rejected
    Ackx = 3,
    /// ACKV: called unit unavailable
    Ackv = 4,
    /// ACKE: acknowledge emergency call
    Acke = 5,
    /// ACKT: try on different address
    Ackt = 6,
    /// ACKB: acknowledge, call-back or negative acknowledgement
    Ackb = 7,
}

impl AckFunction {
    pub fn from_raw(x: u8) -> Self {
        match x & 0x7 {
            0 => AckFunction::Ack,
            1 => AckFunction::Acki,
            2 => AckFunction::Ackq,
            3 => AckFunction::Ackx,
            4 => AckFunction::Ackv,
            5 => AckFunction::Acke,
            6 => AckFunction::Ackt,
            _ => AckFunction::Ackb,
        }
    }

    pub fn into_raw(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for AckFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AckFunction::Ack => write!(f, "ACK"),
            AckFunction::Acki => write!(f, "ACKI"),
            AckFunction::Ackq => write!(f, "ACKQ"),
            AckFunction::Ackx => write!(f, "ACKX"),
            AckFunction::Ackv => write!(f, "ACKV"),
            AckFunction::Acke => write!(f, "ACKE"),
            AckFunction::Ackt => write!(f, "ACKT"),
            AckFunction::Ackb => write!(f, "ACKB"),
        }
    }
}
