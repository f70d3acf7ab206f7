use mpt_pdus::Codeword;

use crate::Channel;

/// Receives every unsolicited request decoded on a channel. Call handling
/// lives here; the handler may queue replies on the channel it is given.
pub trait RequestHandler {
    fn handle_request(&mut self, ch: &mut Channel, msg: Codeword);
}

impl<F> RequestHandler for F
where
    F: FnMut(&mut Channel, Codeword),
{
    fn handle_request(&mut self, ch: &mut Channel, msg: Codeword) {
        self(ch, msg)
    }
}
