use std::collections::VecDeque;

use mpt_pdus::Codeword;

use super::completions::{RxCompletion, TxCompletion};

/// One pending outbound codeword and what to do once it has gone out
pub struct TxItem {
    pub cw: Codeword,
    /// Invoked on the tick after `cw` was sent
    pub tx_complete: Option<TxCompletion>,
    /// Receive slots reserved after `cw` for a solicited reply
    pub rx_complete: Option<RxCompletion>,
}

impl TxItem {
    pub fn new(cw: Codeword) -> Self {
        Self { cw, tx_complete: None, rx_complete: None }
    }
}

impl core::fmt::Debug for TxItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TxItem")
            .field("cw", &self.cw)
            .field("tx_complete", &self.tx_complete.is_some())
            .field("rx_complete", &self.rx_complete)
            .finish()
    }
}

/// Unbounded FIFO of pending outbound codewords
#[derive(Debug, Default)]
pub struct TxQueue {
    items: VecDeque<TxItem>,
}

impl TxQueue {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    pub fn push_back(&mut self, item: TxItem) {
        self.items.push_back(item);
    }

    pub fn pop_front(&mut self) -> Option<TxItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
