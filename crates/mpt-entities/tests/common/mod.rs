#![allow(dead_code)]

pub mod harness;
pub mod recording;

pub use harness::{ChannelHarness, alh, ccsc, default_test_channel, wire};
pub use recording::{ModemCall, RecordingHandler, RecordingModem};
