use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use mpt_core::ChannelRole;

use super::stack_config::{CfgChannel, CfgModem, ModemBackend, SharedConfig, StackConfig};

pub const EXPECTED_CONFIG_VERSION: &str = "0.1";

/// Build `SharedConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    if root.config_version != EXPECTED_CONFIG_VERSION {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, EXPECTED_CONFIG_VERSION
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref modem) = root.modem {
        if !modem.extra.is_empty() {
            return Err(format!("Unrecognized fields: modem::{:?}", sorted_keys(&modem.extra)).into());
        }
    }
    for ch in &root.channel {
        if !ch.extra.is_empty() {
            return Err(format!("Unrecognized fields in channel {}: {:?}", ch.number, sorted_keys(&ch.extra)).into());
        }
    }

    let mut cfg = StackConfig {
        debug_log: root.debug_log,
        modem: CfgModem::default(),
        channels: Vec::with_capacity(root.channel.len()),
    };

    if let Some(modem) = root.modem {
        apply_modem_patch(&mut cfg.modem, modem);
    }

    for ch in root.channel {
        cfg.channels.push(apply_channel_dto(ch));
    }

    Ok(SharedConfig::from_config(cfg)?)
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    from_reader(BufReader::new(f))
}

fn apply_modem_patch(dst: &mut CfgModem, src: ModemDto) {
    dst.backend = src.backend;
    dst.rx_input_file = src.rx_input_file;
    dst.tx_log_file = src.tx_log_file;
    if let Some(v) = src.slot_ms {
        dst.slot_ms = v;
    }
    if let Some(v) = src.realtime {
        dst.realtime = v;
    }
}

fn apply_channel_dto(src: ChannelDto) -> CfgChannel {
    let mut ch = CfgChannel::new(src.number, src.syscode);
    if let Some(mode) = src.mode {
        ch.role = mode;
    }
    ch.ident = src.ident;
    ch.ident_interval_secs = src.ident_interval_secs;
    ch
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    modem: Option<ModemDto>,

    #[serde(default)]
    channel: Vec<ChannelDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct ModemDto {
    pub backend: ModemBackend,
    pub rx_input_file: Option<String>,
    pub tx_log_file: Option<String>,
    pub slot_ms: Option<u64>,
    pub realtime: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct ChannelDto {
    pub number: u16,
    pub syscode: u16,
    pub mode: Option<ChannelRole>,
    pub ident: Option<String>,
    pub ident_interval_secs: Option<u64>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
