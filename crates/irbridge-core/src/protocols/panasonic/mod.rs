//! Panasonic raw byte-stream encoding.
//!
//! Same pulse scheme as the stock Panasonic protocol, without its fixed
//! 16-bit address / 32-bit data split: any number of bytes is sent, each
//! least-significant bit first. The waveform is a header mark/space pair,
//! one mark plus a one/zero space per bit, and a trailing mark followed by a
//! zero-length space that closes the transmission.

pub mod encoder;
pub mod layout;

pub use encoder::{PanasonicPulses, encode_panasonic_raw};
