/// Which half of the channel a tick belongs to
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Direction {
    /// Outbound, TSC to radio units
    Tx,
    /// Inbound, radio units to TSC
    Rx,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Tx => write!(f, "TX"),
            Direction::Rx => write!(f, "RX"),
        }
    }
}
