use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mpt_core::{CODEWORD_MASK, CodewordDeframer};

use super::ModemError;

/// Hex digits in a bare 48-bit codeword. Anything longer is an on-air word with FCS.
const CODEWORD_HEX_DIGITS: usize = 12;

/// Scripted receive input for the simulated modem, one line per receive slot.
///
/// A line holds a 48-bit codeword in hex, or a 64-bit on-air word which goes
/// through the deframer and is dropped if its FCS is wrong. Blank lines and
/// `-` are slots with nothing received; `#` starts a comment.
pub struct RxInput<R: BufRead> {
    reader: R,
    line_no: usize,
    eof: bool,
    deframer: CodewordDeframer,
    pending: VecDeque<u64>,
}

impl RxInput<Box<dyn BufRead>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ModemError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(Box::new(BufReader::new(file))))
    }
}

impl<R: BufRead> RxInput<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            eof: false,
            deframer: CodewordDeframer::new(),
            pending: VecDeque::new(),
        }
    }

    /// The codeword received in the next slot, if any. Silence after the end of input.
    pub fn next_slot(&mut self) -> Result<Option<u64>, ModemError> {
        if let Some(cw) = self.pending.pop_front() {
            return Ok(Some(cw));
        }
        if self.eof {
            return Ok(None);
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            tracing::info!("rx input: end of input after {} lines", self.line_no);
            self.eof = true;
            return Ok(None);
        }
        self.line_no += 1;

        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() || content == "-" {
            return Ok(None);
        }

        let hex = content.trim_start_matches("0x").trim_start_matches("0X").replace('_', "");
        let value = u64::from_str_radix(&hex, 16).map_err(|e| ModemError::Input {
            line: self.line_no,
            reason: format!("{:?}: {}", content, e),
        })?;

        if hex.len() <= CODEWORD_HEX_DIGITS {
            return Ok(Some(value & CODEWORD_MASK));
        }

        self.pending.extend(self.deframer.push_word(value));
        if self.pending.is_empty() {
            tracing::debug!("rx input: line {}: no codeword in 0x{:016x}", self.line_no, value);
        }
        Ok(self.pending.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use mpt_core::fcs_add;

    use super::*;

    #[test]
    fn test_codewords_and_silence() {
        let input = "8000_1c40_0040\n\n-\n0x9002_6c55_81cd  # RQR\n";
        let mut rx = RxInput::from_reader(Cursor::new(input));
        assert_eq!(rx.next_slot(), Ok(Some(0x8000_1c40_0040)));
        assert_eq!(rx.next_slot(), Ok(None));
        assert_eq!(rx.next_slot(), Ok(None));
        assert_eq!(rx.next_slot(), Ok(Some(0x9002_6c55_81cd)));
        assert_eq!(rx.next_slot(), Ok(None));
        assert_eq!(rx.next_slot(), Ok(None));
    }

    #[test]
    fn test_wire_words_checked() {
        let good = fcs_add(0x8000_1c40_0040);
        let input = format!("{:016x}\n{:016x}\n", good, good ^ 0x10);
        let mut rx = RxInput::from_reader(Cursor::new(input));
        assert_eq!(rx.next_slot(), Ok(Some(0x8000_1c40_0040)));
        assert_eq!(rx.next_slot(), Ok(None));
    }

    #[test]
    fn test_bad_line() {
        let mut rx = RxInput::from_reader(Cursor::new("8000\nxyz\n"));
        assert_eq!(rx.next_slot(), Ok(Some(0x8000)));
        assert!(matches!(rx.next_slot(), Err(ModemError::Input { line: 2, .. })));
    }
}
