//! The modem side of a channel: the control interface a channel needs from its
//! modem, the Morse identification keyer, and a simulated modem that drives a
//! channel from a timer with file based I/O.

pub mod morse;
pub mod rx_input;
pub mod sim;
pub mod tx_log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemError {
    /// The modem end of the control link has gone away
    Disconnected,
    Io(String),
    /// Malformed line in a receive input file
    Input { line: usize, reason: String },
}

impl From<std::io::Error> for ModemError {
    fn from(err: std::io::Error) -> Self {
        ModemError::Io(err.to_string())
    }
}

impl core::fmt::Display for ModemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ModemError::Disconnected => write!(f, "modem disconnected"),
            ModemError::Io(e) => write!(f, "I/O error: {}", e),
            ModemError::Input { line, reason } => write!(f, "input line {}: {}", line, reason),
        }
    }
}

impl std::error::Error for ModemError {}

/// Operations a channel forwards to its modem. Ticks flow the other way: the
/// modem calls `Channel::tx_tick` and `Channel::rx_tick` once per slot.
pub trait ModemControl {
    fn start(&mut self) -> Result<(), ModemError>;

    fn stop(&mut self) -> Result<(), ModemError>;

    /// Plays `payload` as Morse between frames. The modem must call
    /// `Channel::ident_done` when it has finished.
    fn send_ident(&mut self, payload: &str) -> Result<(), ModemError>;

    /// Repeat received audio on the transmitter
    fn set_bridge(&mut self, enabled: bool) -> Result<(), ModemError>;
}
