use clap::Parser;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};

use mpt_config::{CfgChannel, ModemBackend, SharedConfig, toml_config};
use mpt_core::debug;
use mpt_core::version::STACK_VERSION;
use mpt_entities::modem::sim::{SimCommand, SimModem};

mod console;
mod demo_handler;

use demo_handler::DemoHandler;

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            println!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

/// Builds the simulated modem and its channel, then ticks it until shutdown
fn run_channel(cfg: SharedConfig, ch_cfg: CfgChannel, commands: Receiver<SimCommand>, ticks: Option<u64>, running: Arc<AtomicBool>) {
    let mut modem = match SimModem::new(cfg, &ch_cfg, commands) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(ch = ch_cfg.number, "failed to set up modem: {}", e);
            return;
        }
    };
    modem.channel_mut().set_handler(Box::new(DemoHandler::new()));
    modem.run(ticks, &running);
}

fn spawn_channels(cfg: &SharedConfig, ticks: Option<u64>, running: &Arc<AtomicBool>) -> (Vec<Sender<SimCommand>>, Vec<JoinHandle<()>>) {
    let mut senders = Vec::new();
    let mut handles = Vec::new();

    for ch_cfg in cfg.config().channels.iter() {
        let (cmd_tx, cmd_rx) = unbounded();
        let cfg = cfg.clone();
        let ch_cfg = ch_cfg.clone();
        let running = running.clone();
        let name = format!("ch{}", ch_cfg.number);
        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || run_channel(cfg, ch_cfg, cmd_rx, ticks, running))
            .expect("failed to spawn channel thread");
        senders.push(cmd_tx);
        handles.push(handle);
    }

    (senders, handles)
}

#[derive(Parser, Debug)]
#[command(
    author,
    version = STACK_VERSION,
    about = "MPT1327 trunked system controller",
    long_about = "Runs MPT1327 control and traffic channels on a simulated modem using the provided TOML configuration"
)]
struct Args {
    /// Config file (required)
    #[arg(help = "TOML config with modem and channel parameters")]
    config: String,

    /// Run this many slots and exit, instead of running until Ctrl+C
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() {
    eprintln!("░█▀▀░█▀█░█▀▀░▀█▀░▀█▀░█▀▀░█▀▀");
    eprintln!("░▀▀█░█░█░█▀▀░░█░░░█░░▀▀█░█░░");
    eprintln!("░▀▀▀░▀▀▀░▀░░░░▀░░░▀░░▀▀▀░▀▀▀\n");
    eprintln!(" -> MPT1327 trunked system controller {}\n", STACK_VERSION);

    let args = Args::parse();
    let cfg = load_config_from_toml(&args.config);
    let _log_guard = debug::setup_logging_default(cfg.config().debug_log.clone());

    match cfg.config().modem.backend {
        ModemBackend::Sim => {}
        ModemBackend::None => {
            tracing::info!("modem backend None, {} channel(s) configured, nothing to run", cfg.config().channels.len());
            return;
        }
        ModemBackend::Undefined => {
            tracing::error!("modem backend undefined");
            std::process::exit(1);
        }
    }

    // Set up Ctrl+C handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("failed to set Ctrl+C handler");

    let (senders, handles) = spawn_channels(&cfg, args.ticks, &running);
    if let Err(e) = console::spawn_console(senders, running.clone()) {
        tracing::warn!("no operator console: {}", e);
    }

    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("channel thread panicked");
        }
    }
    tracing::info!("all channels stopped");
}
