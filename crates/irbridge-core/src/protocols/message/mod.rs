//! Message framing.
//!
//! A message is a frame count followed by that many length-prefixed frames:
//! `count:u8, { len:u8, bytes:u8{len} }*count`. The decoder walks the buffer
//! in a single forward pass, never reading past its end, and verifies that
//! the frames consume the message exactly.
//!
//! Overruns end decoding; trailing or missing bytes are reported after the
//! frames that did decode.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::MessageError;
pub use parser::{CommandFrame, DecodedMessage, FrameDecoder, decode_frames};
