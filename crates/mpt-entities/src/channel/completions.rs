use crate::channel::controller::Channel;
use crate::channel::fault::ChannelFault;
use crate::channel::state::ChannelState;

/// Transmit slots a reply collector waits without receiving anything before giving up
pub const REPLY_TIMEOUT_SLOTS: u8 = 4;

/// Runs on the tick after its codeword was sent. Returning a state forces the
/// channel into it, e.g. onto traffic after a GTC.
pub type TxCompletion = Box<dyn FnOnce(&mut Channel) -> Option<ChannelState>>;

/// Receives the outcome of a solicited reply window, exactly once
pub type ReplyCallback = Box<dyn FnOnce(&mut Channel, ReplyOutcome)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Every expected codeword arrived, in order
    Success(Vec<u64>),
    Timeout,
}

/// Collects the codewords of a solicited reply
pub struct RxCompletion {
    size: usize,
    remaining: usize,
    cws: Vec<u64>,
    slot_timeout: u8,
    callback: Option<ReplyCallback>,
}

impl RxCompletion {
    pub fn new(size: usize, callback: Option<ReplyCallback>) -> Self {
        Self {
            size,
            remaining: size,
            cws: Vec::with_capacity(size),
            slot_timeout: REPLY_TIMEOUT_SLOTS,
            callback,
        }
    }

    /// Number of receive slots reserved
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Stores a reply codeword. Returns true once all expected codewords are in.
    pub fn add_cw(&mut self, cw: u64) -> Result<bool, ChannelFault> {
        if self.remaining == 0 {
            return Err(ChannelFault::ReplyOverrun { expected: self.size });
        }
        self.cws.push(cw);
        self.remaining -= 1;
        self.slot_timeout = REPLY_TIMEOUT_SLOTS;
        Ok(self.remaining == 0)
    }

    /// Counts down one transmit slot. Returns true when the window has expired.
    pub fn tick(&mut self) -> bool {
        self.slot_timeout = self.slot_timeout.saturating_sub(1);
        self.slot_timeout == 0
    }

    /// Hands the collected codewords to the callback
    pub fn succeed(self, ch: &mut Channel) {
        if let Some(cb) = self.callback {
            cb(ch, ReplyOutcome::Success(self.cws));
        }
    }

    pub fn time_out(self, ch: &mut Channel) {
        if let Some(cb) = self.callback {
            cb(ch, ReplyOutcome::Timeout);
        }
    }
}

impl core::fmt::Debug for RxCompletion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RxCompletion")
            .field("size", &self.size)
            .field("remaining", &self.remaining)
            .field("cws", &self.cws)
            .field("slot_timeout", &self.slot_timeout)
            .finish()
    }
}
