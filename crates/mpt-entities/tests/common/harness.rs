use std::cell::RefCell;
use std::rc::Rc;

use mpt_config::CfgChannel;
use mpt_core::ident::DUMMYI;
use mpt_entities::Channel;
use mpt_pdus::Codeword;
use mpt_pdus::codewords::aloha::Aloha;
use mpt_pdus::codewords::sync::Ccsc;
use mpt_pdus::enums::aloha_function::AlohaFunction;

use super::recording::{ModemCall, RecordingHandler, RecordingModem};

pub const TEST_SYSCODE: u16 = 0x3201;
pub const TEST_CHANNEL: u16 = 1;

/// Control channel 1 on system 0x3201, no identification
pub fn default_test_channel() -> CfgChannel {
    CfgChannel::new(TEST_CHANNEL, TEST_SYSCODE)
}

pub fn wire(cw: Codeword) -> Option<u64> {
    Some(cw.to_wire())
}

pub fn ccsc() -> Option<u64> {
    wire(Codeword::Ccsc(Ccsc::new(TEST_SYSCODE)))
}

/// The idle Aloha a channel built from [`default_test_channel`] sends
pub fn alh(n: u8) -> Option<u64> {
    wire(Codeword::Aloha(Aloha {
        function: AlohaFunction::Alh,
        pfix: 0,
        ident1: DUMMYI,
        chan4: TEST_CHANNEL as u8,
        wt: 6,
        rsvd: 0,
        m: 0,
        n,
    }))
}

/// A started channel wired to a recording modem and request handler
pub struct ChannelHarness {
    pub channel: Channel,
    pub modem_calls: Rc<RefCell<Vec<ModemCall>>>,
    pub requests: Rc<RefCell<Vec<Codeword>>>,
}

impl ChannelHarness {
    pub fn new(cfg: CfgChannel) -> Self {
        let (modem, modem_calls) = RecordingModem::new();
        let (handler, requests) = RecordingHandler::new();
        let mut channel = Channel::from_config(&cfg, Box::new(modem));
        channel.set_handler(Box::new(handler));
        channel.start().unwrap();
        Self { channel, modem_calls, requests }
    }

    pub fn tx(&mut self) -> Option<u64> {
        self.channel.tx_tick()
    }

    /// One full slot: transmit tick, then a receive tick if something arrived
    pub fn slot(&mut self, rx: Option<u64>) -> Option<u64> {
        let word = self.channel.tx_tick();
        if let Some(cw) = rx {
            self.channel.rx_tick(cw);
        }
        word
    }

    /// `n` slots with nothing received, returning what went out
    pub fn run_idle(&mut self, n: usize) -> Vec<Option<u64>> {
        (0..n).map(|_| self.slot(None)).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}
