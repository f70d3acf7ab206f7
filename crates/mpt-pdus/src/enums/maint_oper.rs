/// MAINT operation field (3 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MaintOper {
    /// Pressel pressed, radio unit transmitting
    PreselOn = 0,
    /// Pressel released
    PreselOff = 1,
    Periodic = 2,
    Disconnect = 3,
    Spare = 4,
    Reserved = 5,
    ClearDown = 6,
    DisableTx = 7,
}

impl MaintOper {
    pub fn from_raw(x: u8) -> Self {
        match x & 0x7 {
            0 => MaintOper::PreselOn,
            1 => MaintOper::PreselOff,
            2 => MaintOper::Periodic,
            3 => MaintOper::Disconnect,
            4 => MaintOper::Spare,
            5 => MaintOper::Reserved,
            6 => MaintOper::ClearDown,
            _ => MaintOper::DisableTx,
        }
    }

    pub fn into_raw(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for MaintOper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MaintOper::PreselOn => write!(f, "Presel On"),
            MaintOper::PreselOff => write!(f, "Presel Off"),
            MaintOper::Periodic => write!(f, "Periodic"),
            MaintOper::Disconnect => write!(f, "Disconnect"),
            MaintOper::Spare => write!(f, "Spare"),
            MaintOper::Reserved => write!(f, "Reserved"),
            MaintOper::ClearDown => write!(f, "Clear down"),
            MaintOper::DisableTx => write!(f, "Disable TX"),
        }
    }
}
