use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::Sender;
use mpt_entities::modem::sim::SimCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConsoleCmd {
    Sim(SimCommand),
    Quit,
}

fn parse_line(line: &str) -> Option<ConsoleCmd> {
    let line = line.trim();
    match line {
        "" => None,
        "x" => Some(ConsoleCmd::Quit),
        "start" => Some(ConsoleCmd::Sim(SimCommand::Start)),
        "stop" => Some(ConsoleCmd::Sim(SimCommand::Stop)),
        "bridge on" => Some(ConsoleCmd::Sim(SimCommand::Bridge(true))),
        "bridge off" => Some(ConsoleCmd::Sim(SimCommand::Bridge(false))),
        _ => match line.strip_prefix('m') {
            Some(text) if !text.trim().is_empty() => Some(ConsoleCmd::Sim(SimCommand::SetIdent(text.trim().to_string()))),
            _ => {
                eprintln!("commands: m<text> | start | stop | bridge on | bridge off | x");
                None
            }
        },
    }
}

/// Reads operator commands from stdin and sends them to every channel.
/// The thread is left detached; it ends with the process.
pub fn spawn_console(channels: Vec<Sender<SimCommand>>, running: Arc<AtomicBool>) -> std::io::Result<()> {
    thread::Builder::new().name("console".to_string()).spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_line(&line) {
                Some(ConsoleCmd::Quit) => {
                    tracing::info!("console: quit");
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                Some(ConsoleCmd::Sim(cmd)) => {
                    for ch in &channels {
                        let _ = ch.send(cmd.clone());
                    }
                }
                None => {}
            }
        }
    })?;
    Ok(())
}
