use mpt_core::ident::{IdentDisplay, TSCI, is_unit_or_group};
use mpt_entities::{Channel, RequestHandler};
use mpt_pdus::Codeword;
use mpt_pdus::codewords::ack::Ack;
use mpt_pdus::enums::ack_function::AckFunction;

/// Stand-in for call processing. Accepts registrations and turns every call
/// request away, so a radio unit sees a live system without anything being set up.
#[derive(Default)]
pub struct DemoHandler {
    handled: u64,
}

impl DemoHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn reject(ch: &mut Channel, pfix: u8, ident1: u16, ident2: u16) {
        if !is_unit_or_group(ident2) {
            tracing::debug!(ch = ch.number(), "not answering {}", IdentDisplay(ident2));
            return;
        }
        let ack = Ack::new(AckFunction::Ackx, pfix, ident1, ident2);
        ch.enqueue_control(Codeword::Ack(ack), None, 0, None);
    }
}

impl RequestHandler for DemoHandler {
    fn handle_request(&mut self, ch: &mut Channel, msg: Codeword) {
        self.handled += 1;
        tracing::info!(ch = ch.number(), "request #{}: {}", self.handled, msg);

        match msg {
            Codeword::Rqr(rqr) => {
                if !is_unit_or_group(rqr.ident1) {
                    tracing::debug!(ch = ch.number(), "registration from {} ignored", IdentDisplay(rqr.ident1));
                    return;
                }
                let ack = Ack::new(AckFunction::Ack, rqr.pfix, rqr.ident1, TSCI);
                ch.enqueue_control(Codeword::Ack(ack), None, 0, None);
            }
            Codeword::Rqs(rq) => Self::reject(ch, rq.pfix, rq.ident1, rq.ident2),
            Codeword::Rqe(rq) => Self::reject(ch, rq.pfix, rq.ident1, rq.ident2),
            Codeword::Rqc(rq) => Self::reject(ch, rq.pfix, rq.ident1, rq.ident2),
            Codeword::Rqq(rq) => Self::reject(ch, rq.pfix, rq.ident1, rq.ident2),
            Codeword::Rqx(_) | Codeword::Rqt(_) => mpt_core::unimplemented_log!("no call to cancel or divert for {}", msg),
            _ => {}
        }
    }
}
