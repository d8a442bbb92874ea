//! Raw mark/space waveform payloads.
//!
//! A raw payload is a carrier frequency followed by an interval list:
//! `freq:u32, interval:(u16|u32)*`. Intervals alternate mark and space,
//! starting with a mark, in microseconds. The interval width is not carried
//! on the wire; it comes from the dispatch configuration.
//!
//! Intervals are decoded with bounds-checked copies, so a payload that starts
//! at an odd offset in the message decodes to the same values as an aligned
//! one. A remainder that is not a whole number of intervals is rejected.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::RawError;
pub use layout::IntervalWidth;
pub use parser::{RawWaveform, parse_raw_waveform};
