//! MPT1327 codeword codec
//!
//! Every codeword is a 48-bit value. Outbound (TSC to radio unit) messages are
//! built from typed structs and packed with `to_cw()`; inbound messages
//! solicited or sent at random by radio units are recovered with
//! [`decode_inbound`]. `Display` on every type gives the diagnostic rendering
//! used in TX/RX logs.

pub mod codeword;
pub mod codewords;
pub mod decode;
pub mod enums;
pub mod fields;
pub mod parse_error;

pub use codeword::Codeword;
pub use decode::decode_inbound;
pub use parse_error::CodewordParseErr;
