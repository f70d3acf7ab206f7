/// Transmit state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChannelState {
    /// Start of a control channel frame: CCSC, or an identification sequence
    #[default]
    Decide = 0,
    /// Second half of a control channel frame: reserved filler, queued message or Aloha
    ControlCodeword = 1,
    /// Idle traffic channel, silent until the traffic queue fills
    TrafficQuiescent = 2,
    /// Traffic codeword following the SYNT marker
    TrafficCodeword = 3,
    /// Modem is playing an identification sequence
    IdentSequence = 4,
}

impl std::convert::TryFrom<u64> for ChannelState {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(ChannelState::Decide),
            1 => Ok(ChannelState::ControlCodeword),
            2 => Ok(ChannelState::TrafficQuiescent),
            3 => Ok(ChannelState::TrafficCodeword),
            4 => Ok(ChannelState::IdentSequence),
            _ => Err(()),
        }
    }
}

impl ChannelState {
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl core::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelState::Decide => write!(f, "Decide"),
            ChannelState::ControlCodeword => write!(f, "ControlCodeword"),
            ChannelState::TrafficQuiescent => write!(f, "TrafficQuiescent"),
            ChannelState::TrafficCodeword => write!(f, "TrafficCodeword"),
            ChannelState::IdentSequence => write!(f, "IdentSequence"),
        }
    }
}
