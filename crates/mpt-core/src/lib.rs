//! Core utilities for SoftTSC
//!
//! This crate provides fundamental types and utilities used across the MPT1327 stack:
//! - The frame check sequence (FCS) and on-air codeword framing
//! - Reserved identities and ident rendering
//! - Logging setup and common macros

pub mod debug;
pub mod direction;
pub mod fcs;
pub mod framing;
pub mod ident;
pub mod version;

// Re-export commonly used items
pub use direction::Direction;
pub use fcs::{CODEWORD_MASK, fcs};
pub use framing::{CodewordDeframer, PREAMBLE, SYNC, SYNT, TRAFFIC_SYNC_WORD, fcs_add};
pub use ident::{Ident, IdentDisplay};

use serde::Deserialize;

/// 10-bit channel number
pub type ChannelNumber = u16;

/// 15-bit system identity code broadcast in CCSC/DCSC
pub type Syscode = u16;

pub const CHANNEL_NUMBER_MASK: u16 = 0x3FF;
pub const SYSCODE_MASK: u16 = 0x7FFF;

/// What a physical channel is used for when the controller starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum ChannelRole {
    #[default]
    Control,
    Traffic,
}
