use mpt_config::CfgChannel;
use mpt_core::ident::DUMMYI;
use mpt_core::{CODEWORD_MASK, ChannelNumber, ChannelRole, Direction, Syscode};
use mpt_pdus::codewords::ahoy::Ahy;
use mpt_pdus::codewords::aloha::Aloha;
use mpt_pdus::codewords::sync::Ccsc;
use mpt_pdus::enums::aloha_function::AlohaFunction;
use mpt_pdus::{Codeword, decode_inbound};

use crate::channel::completions::{ReplyCallback, RxCompletion, TxCompletion};
use crate::channel::fault::ChannelFault;
use crate::channel::handler::RequestHandler;
use crate::channel::state::ChannelState;
use crate::channel::tx_queue::{TxItem, TxQueue};
use crate::modem::{ModemControl, ModemError};

/// Control channel frames per Aloha frame. The full invitation number goes
/// out on the first of them, zero on the rest.
pub const ALOHA_FRAME_CYCLES: u8 = 5;

/// Aloha delay parameter sent in every invitation
const ALOHA_WT: u8 = 6;

/// Controller for one physical channel.
///
/// Driven by its modem: [`Channel::tx_tick`] once per transmit slot, returning
/// the on-air word to send, and [`Channel::rx_tick`] once per receive slot with
/// whatever codeword was received. Collaborators queue outbound codewords with
/// [`Channel::enqueue_control`] and [`Channel::enqueue_traffic`].
pub struct Channel {
    number: ChannelNumber,
    syscode: Syscode,
    modem: Box<dyn ModemControl>,
    handler: Option<Box<dyn RequestHandler>>,
    running: bool,

    state: ChannelState,
    /// Aloha frame counter, counts down from ALOHA_FRAME_CYCLES
    aloha_count: u8,

    control_queue: TxQueue,
    traffic_queue: TxQueue,

    /// Completion of the codeword sent on the previous tick
    tx_complete: Option<TxCompletion>,
    /// Receive slots still withdrawn from random access
    tx_reserved: usize,
    /// Reply collector armed by the previous tick, not yet listening
    tx_reserved_item: Option<RxCompletion>,
    /// Reply collector currently listening
    rx_complete: Option<RxCompletion>,

    /// Identification payload waiting for the next frame boundary
    ident: Option<String>,
    /// Sent on the previous tick, logged at the start of the next
    last_cw: Option<Codeword>,
}

impl Channel {
    pub fn new(number: ChannelNumber, syscode: Syscode, state: ChannelState, modem: Box<dyn ModemControl>) -> Self {
        Self {
            number,
            syscode,
            modem,
            handler: None,
            running: false,
            state,
            aloha_count: 0,
            control_queue: TxQueue::new(),
            traffic_queue: TxQueue::new(),
            tx_complete: None,
            tx_reserved: 0,
            tx_reserved_item: None,
            rx_complete: None,
            ident: None,
            last_cw: None,
        }
    }

    /// Builds a channel from its configuration entry. Control channels start
    /// in the CCSC/Aloha cycle, traffic channels quiescent.
    pub fn from_config(cfg: &CfgChannel, modem: Box<dyn ModemControl>) -> Self {
        let state = match cfg.role {
            ChannelRole::Control => ChannelState::Decide,
            ChannelRole::Traffic => ChannelState::TrafficQuiescent,
        };
        let mut ch = Self::new(cfg.number, cfg.syscode, state, modem);
        if let Some(ref ident) = cfg.ident {
            ch.set_ident(ident);
        }
        ch
    }

    pub fn set_handler(&mut self, handler: Box<dyn RequestHandler>) {
        self.handler = Some(handler);
    }

    pub fn start(&mut self) -> Result<(), ModemError> {
        tracing::info!(ch = self.number, "starting in state {}", self.state);
        self.modem.start()?;
        self.running = true;
        Ok(())
    }

    /// Stops ticking. Queues and state are kept for a later `start`.
    pub fn stop(&mut self) -> Result<(), ModemError> {
        tracing::info!(ch = self.number, "stopping");
        self.running = false;
        self.modem.stop()
    }

    pub fn bridge(&mut self, enabled: bool) -> Result<(), ModemError> {
        tracing::info!(ch = self.number, "audio bridge {}", if enabled { "on" } else { "off" });
        self.modem.set_bridge(enabled)
    }

    /// Queues a one-shot identification payload, sent at the next Aloha frame boundary
    pub fn set_ident(&mut self, payload: &str) {
        self.ident = Some(payload.to_ascii_uppercase());
    }

    /// Called by the modem when the identification sequence has finished
    pub fn ident_done(&mut self) {
        mpt_core::assert_warn!(
            self.state == ChannelState::IdentSequence,
            "ch {} ident done in state {}",
            self.number,
            self.state
        );
        tracing::debug!(ch = self.number, "ident done");
        self.state = ChannelState::Decide;
    }

    pub fn force_state(&mut self, state: ChannelState) {
        tracing::debug!(ch = self.number, "state {} -> {} (forced)", self.state, state);
        self.state = state;
    }

    /// Queues a codeword for the control channel cycle.
    ///
    /// `tx_complete` runs on the tick after the codeword went out. A nonzero
    /// `reply_len` withdraws that many following receive slots and collects
    /// what arrives in them for `reply_complete`.
    pub fn enqueue_control(
        &mut self,
        cw: Codeword,
        tx_complete: Option<TxCompletion>,
        reply_len: usize,
        reply_complete: Option<ReplyCallback>,
    ) {
        let item = Self::build_item(cw, tx_complete, reply_len, reply_complete);
        self.control_queue.push_back(item);
    }

    /// Queues a codeword for the traffic channel, sent after a SYNT marker.
    /// Same arguments as [`Channel::enqueue_control`].
    pub fn enqueue_traffic(
        &mut self,
        cw: Codeword,
        tx_complete: Option<TxCompletion>,
        reply_len: usize,
        reply_complete: Option<ReplyCallback>,
    ) {
        let item = Self::build_item(cw, tx_complete, reply_len, reply_complete);
        self.traffic_queue.push_back(item);
    }

    fn build_item(
        cw: Codeword,
        tx_complete: Option<TxCompletion>,
        reply_len: usize,
        reply_complete: Option<ReplyCallback>,
    ) -> TxItem {
        let rx_complete = if reply_len > 0 {
            Some(RxCompletion::new(reply_len, reply_complete))
        } else {
            None
        };
        TxItem { cw, tx_complete, rx_complete }
    }

    /// Transmit slot. Returns the 64-bit on-air word, or None to send nothing.
    pub fn tx_tick(&mut self) -> Option<u64> {
        if !self.running {
            tracing::trace!(ch = self.number, "tx tick while stopped");
            return None;
        }
        match self.tx_tick_impl() {
            Ok(cw) => cw.map(|cw| cw.to_wire()),
            Err(e) => {
                tracing::error!(ch = self.number, "{} fault: {}", Direction::Tx, e);
                None
            }
        }
    }

    /// Receive slot carrying a codeword (FCS already stripped)
    pub fn rx_tick(&mut self, cw: u64) {
        if !self.running {
            tracing::trace!(ch = self.number, "rx tick while stopped");
            return;
        }
        if let Err(e) = self.rx_tick_impl(cw & CODEWORD_MASK) {
            tracing::error!(ch = self.number, "{} fault: {}", Direction::Rx, e);
        }
    }

    fn tx_tick_impl(&mut self) -> Result<Option<Codeword>, ChannelFault> {
        if let Some(cw) = self.last_cw.take() {
            tracing::debug!(ch = self.number, "-> {}", cw);
        }

        if let Some(complete) = self.tx_complete.take() {
            if let Some(next) = complete(self) {
                tracing::debug!(ch = self.number, "state {} -> {} (completion)", self.state, next);
                self.state = next;
            }
        }

        // Reply slots reserved by the previous codeword start now
        if let Some(item) = self.tx_reserved_item.take() {
            if let Some(prev) = self.rx_complete.take() {
                tracing::debug!(ch = self.number, "reply superseded, {} of {} codewords missing", prev.remaining(), prev.size());
                prev.time_out(self);
            }
            self.rx_complete = Some(item);
        }

        // Transmit slots are the time base for reply timeouts
        self.drive_reply_timeout();

        let cw = match self.state {
            ChannelState::Decide => self.tx_decide()?,
            ChannelState::ControlCodeword => Some(self.tx_control_codeword()),
            ChannelState::TrafficQuiescent => {
                self.aloha_count = 0;
                if self.traffic_queue.is_empty() {
                    None
                } else {
                    self.state = ChannelState::TrafficCodeword;
                    Some(Codeword::Traffic)
                }
            }
            ChannelState::TrafficCodeword => {
                self.state = ChannelState::TrafficQuiescent;
                let item = self.traffic_queue.pop_front().ok_or(ChannelFault::TrafficQueueEmpty)?;
                Some(self.install(item))
            }
            ChannelState::IdentSequence => None,
        };

        if let Some(cw) = cw {
            self.last_cw = Some(cw);
        }
        Ok(cw)
    }

    fn tx_decide(&mut self) -> Result<Option<Codeword>, ChannelFault> {
        // Identification only goes out between Aloha frames
        let ident = if self.aloha_count == 0 { self.ident.take() } else { None };
        match ident {
            Some(payload) => {
                tracing::info!(ch = self.number, "sending ident {:?}", payload);
                self.modem.send_ident(&payload)?;
                self.state = ChannelState::IdentSequence;
                Ok(None)
            }
            None => {
                self.state = ChannelState::ControlCodeword;
                Ok(Some(Codeword::Ccsc(Ccsc::new(self.syscode))))
            }
        }
    }

    fn tx_control_codeword(&mut self) -> Codeword {
        self.state = ChannelState::Decide;

        let mut n = 0;
        if self.aloha_count == 0 {
            self.aloha_count = ALOHA_FRAME_CYCLES;
            n = ALOHA_FRAME_CYCLES;
        }
        self.aloha_count = self.aloha_count.saturating_sub(1);

        // Slots withdrawn for a multi-codeword reply
        if self.tx_reserved > 0 {
            self.tx_reserved -= 1;
        }
        if self.tx_reserved > 0 {
            // Filler keeps random access off the reserved slot
            return Codeword::Ahy(Ahy::dummy());
        }

        if let Some(item) = self.control_queue.pop_front() {
            return self.install(item);
        }

        Codeword::Aloha(Aloha {
            function: AlohaFunction::Alh,
            pfix: 0,
            ident1: DUMMYI,
            chan4: (self.number & 0xF) as u8,
            wt: ALOHA_WT,
            rsvd: 0,
            m: 0,
            n,
        })
    }

    /// Takes ownership of a dequeued item's completions and returns its codeword
    fn install(&mut self, item: TxItem) -> Codeword {
        mpt_core::assert_warn!(self.tx_reserved_item.is_none(), "ch {} reply collector replaced", self.number);
        self.tx_complete = item.tx_complete;
        self.tx_reserved = 0;
        if let Some(rx) = item.rx_complete {
            self.tx_reserved = rx.size();
            self.tx_reserved_item = Some(rx);
        }
        item.cw
    }

    fn drive_reply_timeout(&mut self) {
        let Some(mut rx) = self.rx_complete.take() else {
            return;
        };
        if rx.tick() {
            tracing::debug!(ch = self.number, "reply timed out, {} of {} codewords missing", rx.remaining(), rx.size());
            rx.time_out(self);
        } else {
            self.rx_complete = Some(rx);
        }
    }

    fn rx_tick_impl(&mut self, cw: u64) -> Result<(), ChannelFault> {
        // Solicited reply in a reserved slot
        if let Some(mut rx) = self.rx_complete.take() {
            tracing::debug!(ch = self.number, "<- RSVD 0x{:012x}", cw);
            if rx.add_cw(cw)? {
                rx.succeed(self);
            } else {
                self.rx_complete = Some(rx);
            }
            return Ok(());
        }

        // Random access
        let Some(msg) = decode_inbound(cw) else {
            tracing::trace!(ch = self.number, "<- 0x{:012x} not decodable", cw);
            return Ok(());
        };
        tracing::debug!(ch = self.number, "<- 0x{:012x} {}", cw, msg);

        match self.handler.take() {
            Some(mut handler) => {
                handler.handle_request(self, msg);
                // Keep a handler installed from inside the call
                if self.handler.is_none() {
                    self.handler = Some(handler);
                }
            }
            None => tracing::warn!(ch = self.number, "no request handler, dropping {}", msg),
        }
        Ok(())
    }

    pub fn number(&self) -> ChannelNumber {
        self.number
    }

    pub fn syscode(&self) -> Syscode {
        self.syscode
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn aloha_counter(&self) -> u8 {
        self.aloha_count
    }

    pub fn ident_pending(&self) -> bool {
        self.ident.is_some()
    }

    /// True while a reply collector is armed or listening
    pub fn reply_pending(&self) -> bool {
        self.rx_complete.is_some() || self.tx_reserved_item.is_some()
    }

    /// (control, traffic) queue lengths
    pub fn queue_lengths(&self) -> (usize, usize) {
        (self.control_queue.len(), self.traffic_queue.len())
    }
}

#[cfg(test)]
mod tests {
    use mpt_pdus::codewords::gtc::Gtc;

    use super::*;

    struct NullModem;

    impl ModemControl for NullModem {
        fn start(&mut self) -> Result<(), ModemError> {
            Ok(())
        }
        fn stop(&mut self) -> Result<(), ModemError> {
            Ok(())
        }
        fn send_ident(&mut self, _payload: &str) -> Result<(), ModemError> {
            Err(ModemError::Disconnected)
        }
        fn set_bridge(&mut self, _enabled: bool) -> Result<(), ModemError> {
            Ok(())
        }
    }

    fn started(state: ChannelState) -> Channel {
        let mut ch = Channel::new(1, 0x3201, state, Box::new(NullModem));
        ch.start().unwrap();
        ch
    }

    #[test]
    fn test_stopped_channel_is_silent() {
        let mut ch = Channel::new(1, 0x3201, ChannelState::Decide, Box::new(NullModem));
        assert_eq!(ch.tx_tick(), None);
        assert_eq!(ch.state(), ChannelState::Decide);
        ch.start().unwrap();
        assert!(ch.tx_tick().is_some());
        ch.stop().unwrap();
        assert_eq!(ch.tx_tick(), None);
        assert_eq!(ch.state(), ChannelState::ControlCodeword);
    }

    #[test]
    fn test_traffic_fault_is_contained() {
        let mut ch = started(ChannelState::TrafficCodeword);
        assert_eq!(ch.tx_tick(), None);
        // Still alive, back in quiescent state
        assert_eq!(ch.state(), ChannelState::TrafficQuiescent);
        assert_eq!(ch.tx_tick(), None);
    }

    #[test]
    fn test_ident_fault_falls_back_to_ccsc() {
        let mut ch = started(ChannelState::Decide);
        ch.set_ident("tsc");
        assert_eq!(ch.tx_tick(), None);
        assert!(!ch.ident_pending());
        assert_eq!(ch.state(), ChannelState::Decide);
        let word = ch.tx_tick().unwrap();
        assert_eq!(word, Codeword::Ccsc(Ccsc::new(0x3201)).to_wire());
    }

    #[test]
    fn test_completion_forces_state() {
        let mut ch = started(ChannelState::Decide);
        let gtc = Gtc { pfix: 0, ident1: 3, d: false, chan: 2, ident2: 4, n: 0 };
        ch.enqueue_control(Codeword::Gtc(gtc), Some(Box::new(|_: &mut Channel| Some(ChannelState::TrafficQuiescent))), 0, None);
        ch.tx_tick(); // CCSC
        assert_eq!(ch.tx_tick(), Some(Codeword::Gtc(gtc).to_wire()));
        // Completion runs before dispatch, quiescent traffic channel sends nothing
        assert_eq!(ch.tx_tick(), None);
        assert_eq!(ch.state(), ChannelState::TrafficQuiescent);
    }
}
