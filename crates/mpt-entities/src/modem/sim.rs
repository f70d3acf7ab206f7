use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};

use mpt_config::{CfgChannel, SharedConfig};
use mpt_core::ChannelNumber;

use super::morse::MorseKeyer;
use super::rx_input::RxInput;
use super::tx_log::{TxLogMsg, spawn_tx_logger};
use super::{ModemControl, ModemError};
use crate::Channel;

/// Placeholder in `rx_input_file`/`tx_log_file` replaced by the channel number
pub const CHANNEL_PLACEHOLDER: &str = "{ch}";

/// Operations the channel asked its modem for, picked up by [`SimModem`]
/// between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemRequest {
    Start,
    Stop,
    Ident(String),
    Bridge(bool),
}

/// The channel's end of the simulated modem
pub struct SimModemLink {
    requests: Sender<ModemRequest>,
}

impl SimModemLink {
    fn send(&self, req: ModemRequest) -> Result<(), ModemError> {
        self.requests.send(req).map_err(|_| ModemError::Disconnected)
    }
}

impl ModemControl for SimModemLink {
    fn start(&mut self) -> Result<(), ModemError> {
        self.send(ModemRequest::Start)
    }

    fn stop(&mut self) -> Result<(), ModemError> {
        self.send(ModemRequest::Stop)
    }

    fn send_ident(&mut self, payload: &str) -> Result<(), ModemError> {
        self.send(ModemRequest::Ident(payload.to_string()))
    }

    fn set_bridge(&mut self, enabled: bool) -> Result<(), ModemError> {
        self.send(ModemRequest::Bridge(enabled))
    }
}

/// Operator commands for a running [`SimModem`], e.g. from a console thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCommand {
    SetIdent(String),
    Start,
    Stop,
    Bridge(bool),
}

/// Software stand-in for the radio modem.
///
/// Owns its [`Channel`] and drives it one slot per [`SimModem::tick`]: a
/// transmit tick whose word goes to the optional TX log, then a receive tick
/// fed from the optional RX input script. Identification sequences hold the
/// channel for as many slots as the Morse keyer would take.
pub struct SimModem {
    config: SharedConfig,
    channel: Channel,
    requests: Receiver<ModemRequest>,
    commands: Receiver<SimCommand>,

    rx_input: Option<RxInput<Box<dyn BufRead>>>,
    tx_log: Option<(Sender<TxLogMsg>, JoinHandle<()>)>,

    slot_ms: u64,
    realtime: bool,
    /// Transmitter keyed, as far as the modem is concerned
    keyed: bool,

    /// Slots left in the identification sequence being sent
    ident_slots_left: Option<u64>,
    ident_payload: Option<String>,
    ident_interval_slots: Option<u64>,
    slots_since_ident: u64,

    ticks: u64,
}

impl SimModem {
    pub fn new(config: SharedConfig, ch_cfg: &CfgChannel, commands: Receiver<SimCommand>) -> Result<Self, ModemError> {
        let cfg = config.config();
        let (req_tx, req_rx) = unbounded();
        let link = SimModemLink { requests: req_tx };
        let channel = Channel::from_config(ch_cfg, Box::new(link));

        let rx_input = match cfg.modem.rx_input_file {
            Some(ref path) => {
                let path = channel_path(path, ch_cfg.number);
                tracing::info!(ch = ch_cfg.number, "rx input from {}", path);
                Some(RxInput::open(&path)?)
            }
            None => None,
        };

        let tx_log = match cfg.modem.tx_log_file {
            Some(ref path) => {
                let path = channel_path(path, ch_cfg.number);
                tracing::info!(ch = ch_cfg.number, "tx log to {}", path);
                Some(spawn_tx_logger(&path, format!("tx-log-ch{}", ch_cfg.number))?)
            }
            None => None,
        };

        let ident_interval_slots = ch_cfg
            .ident_interval_secs
            .map(|secs| (secs * 1000 / cfg.modem.slot_ms).max(1));

        Ok(Self {
            config,
            channel,
            requests: req_rx,
            commands,
            rx_input,
            tx_log,
            slot_ms: cfg.modem.slot_ms,
            realtime: cfg.modem.realtime,
            keyed: false,
            ident_slots_left: None,
            ident_payload: ch_cfg.ident.clone(),
            ident_interval_slots,
            slots_since_ident: 0,
            ticks: 0,
        })
    }

    /// Replaces the receive input, e.g. with an in-memory script
    pub fn with_rx_reader(mut self, reader: Box<dyn BufRead>) -> Self {
        self.rx_input = Some(RxInput::from_reader(reader));
        self
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut Channel {
        &mut self.channel
    }

    pub fn is_keyed(&self) -> bool {
        self.keyed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One slot: transmit tick, then receive tick
    pub fn tick(&mut self) {
        self.drain_commands();
        self.drain_requests();

        let word = self.channel.tx_tick();
        let msg = match word {
            Some(w) => TxLogMsg::Word(w),
            None => TxLogMsg::Silence,
        };
        let log_failed = match self.tx_log {
            Some((ref sink, _)) => sink.send(msg).is_err(),
            None => false,
        };
        if log_failed {
            tracing::warn!(ch = self.channel.number(), "tx log thread gone, closing log");
            self.tx_log = None;
        }
        // Identification starts in the transmit tick
        self.drain_requests();

        if let Some(cw) = self.next_rx_slot() {
            self.channel.rx_tick(cw);
        }
        self.drain_requests();

        self.drive_ident();
        self.ticks += 1;
    }

    /// Ticks until `running` is cleared, or for `num_ticks` slots
    pub fn run(&mut self, num_ticks: Option<u64>, running: &AtomicBool) {
        if let Err(e) = self.channel.start() {
            tracing::error!(ch = self.channel.number(), "failed to start: {}", e);
            return;
        }

        let slot = Duration::from_millis(self.slot_ms);
        let mut deadline = Instant::now();
        let mut count: u64 = 0;

        while running.load(Ordering::SeqCst) {
            self.tick();

            count += 1;
            if let Some(num_ticks) = num_ticks {
                if count >= num_ticks {
                    break;
                }
            }

            if self.realtime {
                deadline += slot;
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                } else {
                    // Fell behind; don't try to catch up with a burst of slots
                    deadline = now;
                }
            }
        }

        tracing::info!(ch = self.channel.number(), "modem stopped after {} slots", self.ticks);
        if let Err(e) = self.channel.stop() {
            tracing::warn!(ch = self.channel.number(), "stop: {}", e);
        }
        self.drain_requests();
    }

    fn next_rx_slot(&mut self) -> Option<u64> {
        let input = self.rx_input.as_mut()?;
        match input.next_slot() {
            Ok(cw) => cw,
            Err(e) => {
                tracing::warn!(ch = self.channel.number(), "rx input: {}", e);
                None
            }
        }
    }

    fn drain_commands(&mut self) {
        while let Ok(cmd) = self.commands.try_recv() {
            tracing::debug!(ch = self.channel.number(), "command {:?}", cmd);
            let res = match cmd {
                SimCommand::SetIdent(payload) => {
                    self.channel.set_ident(&payload);
                    Ok(())
                }
                SimCommand::Start => self.channel.start(),
                SimCommand::Stop => self.channel.stop(),
                SimCommand::Bridge(enabled) => self.channel.bridge(enabled),
            };
            if let Err(e) = res {
                tracing::warn!(ch = self.channel.number(), "command failed: {}", e);
            }
        }
    }

    fn drain_requests(&mut self) {
        while let Ok(req) = self.requests.try_recv() {
            let number = self.channel.number();
            match req {
                ModemRequest::Start => self.keyed = true,
                ModemRequest::Stop => {
                    self.keyed = false;
                    // Cancelled identification still hands the channel back
                    if self.ident_slots_left.take().is_some() {
                        self.channel.ident_done();
                    }
                }
                ModemRequest::Ident(payload) => {
                    let ms = MorseKeyer::duration_ms(&payload);
                    let slots = ms.div_ceil(self.slot_ms).max(1);
                    tracing::debug!(ch = number, "ident {:?}: {} ms, {} slots", payload, ms, slots);
                    self.ident_slots_left = Some(slots);
                    self.slots_since_ident = 0;
                }
                ModemRequest::Bridge(enabled) => {
                    let mut state = self.config.state_write();
                    if enabled {
                        state.bridged.insert(number);
                    } else {
                        state.bridged.remove(&number);
                    }
                }
            }
        }
    }

    fn drive_ident(&mut self) {
        if let Some(left) = self.ident_slots_left {
            if left <= 1 {
                self.ident_slots_left = None;
                self.channel.ident_done();
            } else {
                self.ident_slots_left = Some(left - 1);
            }
        }

        let Some(interval) = self.ident_interval_slots else {
            return;
        };
        self.slots_since_ident += 1;
        if self.slots_since_ident >= interval {
            self.slots_since_ident = 0;
            if let Some(ref payload) = self.ident_payload {
                if !self.channel.ident_pending() {
                    self.channel.set_ident(payload);
                }
            }
        }
    }
}

impl Drop for SimModem {
    fn drop(&mut self) {
        if let Some((sink, handle)) = self.tx_log.take() {
            let _ = sink.send(TxLogMsg::Shutdown);
            if handle.join().is_err() {
                tracing::warn!(ch = self.channel.number(), "tx log thread panicked");
            }
        }
    }
}

fn channel_path(template: &str, number: ChannelNumber) -> String {
    template.replace(CHANNEL_PLACEHOLDER, &number.to_string())
}
