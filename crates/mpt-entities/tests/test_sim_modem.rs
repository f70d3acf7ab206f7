mod common;

use std::io::Cursor;
use std::sync::atomic::AtomicBool;

use crossbeam_channel::unbounded;
use mpt_config::{ModemBackend, SharedConfig, StackConfig};
use mpt_core::debug;
use mpt_entities::ChannelState;
use mpt_entities::modem::sim::{SimCommand, SimModem};

use common::{alh, ccsc, default_test_channel};

fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("softtsc_{}_{}", std::process::id(), name));
    path
}

#[test]
fn test_tx_log_per_channel() {
    debug::setup_logging_verbose();
    let template = temp_path("tx-{ch}.log");
    let ch_cfg = default_test_channel();

    let mut cfg = StackConfig::new(vec![ch_cfg.clone()]);
    cfg.modem.backend = ModemBackend::Sim;
    cfg.modem.realtime = false;
    cfg.modem.tx_log_file = Some(template.to_string_lossy().into_owned());
    let config = SharedConfig::from_config(cfg).unwrap();

    let (_cmd_tx, cmd_rx) = unbounded::<SimCommand>();
    let mut modem = SimModem::new(config, &ch_cfg, cmd_rx).unwrap();
    let running = AtomicBool::new(true);
    modem.run(Some(4), &running);
    drop(modem);

    let log_path = temp_path("tx-1.log");
    let contents = std::fs::read_to_string(&log_path).unwrap();
    let expected: String = [ccsc(), alh(5), ccsc(), alh(0)]
        .iter()
        .map(|w| format!("{:016x}\n", w.unwrap()))
        .collect();
    assert_eq!(contents, expected);
    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn test_scripted_ident_and_requests() {
    debug::setup_logging_verbose();
    let mut ch_cfg = default_test_channel();
    ch_cfg.ident = Some("E".to_string());

    let mut cfg = StackConfig::new(vec![ch_cfg.clone()]);
    cfg.modem.backend = ModemBackend::Sim;
    cfg.modem.realtime = false;
    cfg.modem.slot_ms = 1000;
    let config = SharedConfig::from_config(cfg).unwrap();

    // RQR arrives while the identification is on air
    let script = "# ident slot\n9002_6c55_81cd\n";
    let (cmd_tx, cmd_rx) = unbounded();
    let mut modem = SimModem::new(config, &ch_cfg, cmd_rx)
        .unwrap()
        .with_rx_reader(Box::new(Cursor::new(script)));

    let seen = std::rc::Rc::new(std::cell::RefCell::new(0usize));
    let counter = seen.clone();
    modem.channel_mut().set_handler(Box::new(
        move |_: &mut mpt_entities::Channel, _: mpt_pdus::Codeword| *counter.borrow_mut() += 1,
    ));

    let running = AtomicBool::new(true);
    // "E" is 533 ms, one slot of 1 s
    modem.run(Some(3), &running);
    assert_eq!(*seen.borrow(), 1);
    assert!(!modem.channel().ident_pending());

    // Mid-frame, so the new identification waits
    cmd_tx.send(SimCommand::Start).unwrap();
    cmd_tx.send(SimCommand::SetIdent("t".to_string())).unwrap();
    modem.tick();
    assert!(modem.channel().is_running());
    assert!(modem.channel().ident_pending());
    assert_eq!(modem.channel().state(), ChannelState::ControlCodeword);
}
