use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use mpt_core::{CHANNEL_NUMBER_MASK, ChannelNumber, ChannelRole, SYSCODE_MASK, Syscode};

/// The modem backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ModemBackend {
    Undefined,
    /// No modem attached. Channels are built but never ticked; for testing
    None,
    /// Software modem: ticks from a timer, inbound codewords from a file
    Sim,
}

/// Slot length at 1200 bit/s: 64 bits is 53.3 ms
pub const DEFAULT_SLOT_MS: u64 = 53;

/// Modem I/O configuration
#[derive(Debug, Clone)]
pub struct CfgModem {
    pub backend: ModemBackend,

    /// Hex codewords fed to the receive path, one line per receive slot
    pub rx_input_file: Option<String>,
    /// Every transmitted on-air word is appended here as a hex line
    pub tx_log_file: Option<String>,

    pub slot_ms: u64,
    /// Sleep between slots. Disable to run scripted input as fast as possible
    pub realtime: bool,
}

impl Default for CfgModem {
    fn default() -> Self {
        Self {
            backend: ModemBackend::Undefined,
            rx_input_file: None,
            tx_log_file: None,
            slot_ms: DEFAULT_SLOT_MS,
            realtime: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CfgChannel {
    /// 10 bits, sent in Aloha CHAN4 (low 4 bits) and GTC/MAINT/CLEAR
    pub number: ChannelNumber,
    /// 15 bits, sent in CCSC
    pub syscode: Syscode,
    /// Control channels start in the CCSC/Aloha cycle, traffic channels quiescent
    pub role: ChannelRole,
    /// Morse identification payload, sent between frames
    pub ident: Option<String>,
    /// Re-send the identification this often. None sends it once at start
    pub ident_interval_secs: Option<u64>,
}

impl CfgChannel {
    pub fn new(number: ChannelNumber, syscode: Syscode) -> Self {
        Self {
            number,
            syscode,
            role: ChannelRole::Control,
            ident: None,
            ident_interval_secs: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StackConfig {
    pub debug_log: Option<String>,
    pub modem: CfgModem,
    pub channels: Vec<CfgChannel>,
}

impl StackConfig {
    pub fn new(channels: Vec<CfgChannel>) -> Self {
        StackConfig {
            debug_log: None,
            modem: CfgModem::default(),
            channels,
        }
    }

    /// Validate that all required configuration fields are properly set.
    pub fn validate(&self) -> Result<(), String> {
        if self.modem.backend == ModemBackend::Undefined {
            return Err("modem backend must be defined".to_string());
        }
        if self.modem.slot_ms == 0 {
            return Err("modem slot_ms must be nonzero".to_string());
        }
        if self.channels.is_empty() {
            return Err("at least one [[channel]] must be configured".to_string());
        }

        let mut seen = BTreeSet::new();
        for ch in &self.channels {
            if ch.number & !CHANNEL_NUMBER_MASK != 0 {
                return Err(format!("channel number {} does not fit in 10 bits", ch.number));
            }
            if ch.syscode & !SYSCODE_MASK != 0 {
                return Err(format!("channel {}: syscode 0x{:x} does not fit in 15 bits", ch.number, ch.syscode));
            }
            if !seen.insert(ch.number) {
                return Err(format!("channel {} configured more than once", ch.number));
            }
            if let Some(ref ident) = ch.ident {
                if ident.trim().is_empty() {
                    return Err(format!("channel {}: ident must not be empty", ch.number));
                }
            }
            if ch.ident_interval_secs == Some(0) {
                return Err(format!("channel {}: ident_interval_secs must be nonzero", ch.number));
            }
        }

        Ok(())
    }

    pub fn channel(&self, number: ChannelNumber) -> Option<&CfgChannel> {
        self.channels.iter().find(|c| c.number == number)
    }
}

/// Mutable, stack-editable state (lock-protected).
#[derive(Debug, Clone, Default)]
pub struct StackState {
    /// Channels whose audio is currently bridged (receive audio repeated on transmit)
    pub bridged: BTreeSet<ChannelNumber>,
}

/// Global shared configuration: immutable config + mutable state.
#[derive(Clone)]
pub struct SharedConfig {
    /// Read-only configuration (immutable after construction).
    cfg: Arc<StackConfig>,
    /// Mutable state guarded with RwLock (write by the stack, read by others).
    state: Arc<RwLock<StackState>>,
}

impl SharedConfig {
    pub fn from_config(cfg: StackConfig) -> Result<Self, String> {
        Self::from_parts(cfg, StackState::default())
    }

    pub fn from_parts(cfg: StackConfig, state: StackState) -> Result<Self, String> {
        cfg.validate()?;
        Ok(Self {
            cfg: Arc::new(cfg),
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<StackConfig> {
        Arc::clone(&self.cfg)
    }

    /// Read guard for mutable state.
    pub fn state_read(&self) -> std::sync::RwLockReadGuard<'_, StackState> {
        // A writer that panicked left consistent data behind; keep serving it
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Write guard for mutable state.
    pub fn state_write(&self) -> std::sync::RwLockWriteGuard<'_, StackState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
