//! Command frame decoding.
//!
//! A frame is `tag:u8` followed by a tag-specific payload. Standard-protocol
//! tags carry a 4-byte little-endian code sent with a 32-bit length; the
//! custom tags carry a delay, a raw waveform or a Panasonic raw packet.
//! Custom tag values are resolved through the configured `TagTable`, so the
//! reservation can differ between device revisions.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::CommandError;
pub use layout::StandardProtocol;
pub use parser::{Command, parse_command};
