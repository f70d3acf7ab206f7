use crate::modem::ModemError;

/// Internal fault during a tick. Logged at the tick boundary, never propagated to the modem.
#[derive(Debug, PartialEq, Eq)]
pub enum ChannelFault {
    /// Traffic codeword state entered with nothing queued
    TrafficQueueEmpty,
    /// Codeword delivered to a reply collector that already had all it expected
    ReplyOverrun { expected: usize },
    Modem(ModemError),
}

impl From<ModemError> for ChannelFault {
    fn from(e: ModemError) -> Self {
        ChannelFault::Modem(e)
    }
}

impl core::fmt::Display for ChannelFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelFault::TrafficQueueEmpty => write!(f, "traffic queue empty in traffic codeword state"),
            ChannelFault::ReplyOverrun { expected } => {
                write!(f, "reply collector overrun, expected {} codewords", expected)
            }
            ChannelFault::Modem(e) => write!(f, "modem: {}", e),
        }
    }
}

impl std::error::Error for ChannelFault {}
