use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, unbounded};

#[derive(Debug, Clone)]
pub enum TxLogMsg {
    /// On-air word sent in a slot
    Word(u64),
    /// Slot with nothing transmitted
    Silence,
    Shutdown,
}

/// Spawns a background thread appending one hex line per transmit slot to
/// `path`, so file writes never delay a tick. The file is created (truncated)
/// before this returns. Send `Shutdown` and join to flush.
pub fn spawn_tx_logger<P: AsRef<Path>>(path: P, thread_name: String) -> io::Result<(Sender<TxLogMsg>, JoinHandle<()>)> {
    let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
    let (sender, receiver) = unbounded::<TxLogMsg>();

    let handle = thread::Builder::new().name(thread_name).spawn(move || {
        let mut out = BufWriter::new(file);
        while let Ok(msg) = receiver.recv() {
            let res = match msg {
                TxLogMsg::Word(word) => writeln!(out, "{:016x}", word),
                TxLogMsg::Silence => writeln!(out, "-"),
                TxLogMsg::Shutdown => break,
            };
            if let Err(e) = res {
                tracing::warn!("tx log: write failed: {}", e);
                break;
            }
        }
        let _ = out.flush();
    })?;

    Ok((sender, handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_hex_lines() {
        let mut path = std::env::temp_dir();
        path.push(format!("softtsc_txlog_{}.txt", std::process::id()));

        let (tx, handle) = spawn_tx_logger(&path, "tx-log-test".to_string()).unwrap();
        tx.send(TxLogMsg::Word(0x4A89_740B_AAAA_C4D7)).unwrap();
        tx.send(TxLogMsg::Silence).unwrap();
        tx.send(TxLogMsg::Shutdown).unwrap();
        handle.join().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "4a89740baaaac4d7\n-\n");
        let _ = std::fs::remove_file(&path);
    }
}
