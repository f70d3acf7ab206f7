pub mod controller;
pub mod completions;
pub mod fault;
pub mod handler;
pub mod state;
pub mod tx_queue;
