//! SoftTSC configuration management
//!
//! This crate provides configuration loading and parsing for SoftTSC:
//! - TOML configuration file parsing
//! - Stack configuration structures (modem backend, per-channel settings)
//! - Shared runtime state

pub mod stack_config;
pub mod toml_config;

pub use stack_config::*;
pub use toml_config::*;
