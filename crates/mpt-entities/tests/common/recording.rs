use std::cell::RefCell;
use std::rc::Rc;

use mpt_entities::{Channel, ModemControl, ModemError, RequestHandler};
use mpt_pdus::Codeword;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemCall {
    Start,
    Stop,
    Ident(String),
    Bridge(bool),
}

/// Modem stand-in that only records what the channel asked of it
pub struct RecordingModem {
    calls: Rc<RefCell<Vec<ModemCall>>>,
}

impl RecordingModem {
    pub fn new() -> (Self, Rc<RefCell<Vec<ModemCall>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (Self { calls: calls.clone() }, calls)
    }
}

impl ModemControl for RecordingModem {
    fn start(&mut self) -> Result<(), ModemError> {
        self.calls.borrow_mut().push(ModemCall::Start);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ModemError> {
        self.calls.borrow_mut().push(ModemCall::Stop);
        Ok(())
    }

    fn send_ident(&mut self, payload: &str) -> Result<(), ModemError> {
        self.calls.borrow_mut().push(ModemCall::Ident(payload.to_string()));
        Ok(())
    }

    fn set_bridge(&mut self, enabled: bool) -> Result<(), ModemError> {
        self.calls.borrow_mut().push(ModemCall::Bridge(enabled));
        Ok(())
    }
}

/// Request handler collecting every decoded inbound message
pub struct RecordingHandler {
    requests: Rc<RefCell<Vec<Codeword>>>,
}

impl RecordingHandler {
    pub fn new() -> (Self, Rc<RefCell<Vec<Codeword>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        (Self { requests: requests.clone() }, requests)
    }
}

impl RequestHandler for RecordingHandler {
    fn handle_request(&mut self, _ch: &mut Channel, msg: Codeword) {
        tracing::debug!("handler got {}", msg);
        self.requests.borrow_mut().push(msg);
    }
}
