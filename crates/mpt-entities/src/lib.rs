//! MPT1327 channel controller
//!
//! One [`Channel`] per physical radio channel. The modem drives it with a
//! transmit tick and a receive tick per 64-bit slot; everything else
//! (queueing, reply collection, inbound decoding) happens inside those calls.

pub mod channel;
pub mod modem;

pub use channel::controller::Channel;
pub use channel::completions::{ReplyCallback, ReplyOutcome, TxCompletion};
pub use channel::fault::ChannelFault;
pub use channel::handler::RequestHandler;
pub use channel::state::ChannelState;
pub use modem::{ModemControl, ModemError};
