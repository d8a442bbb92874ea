use serde::{Deserialize, Serialize};

use super::error::RawError;
use super::layout::IntervalWidth;
use super::reader::RawReader;

/// Carrier frequency and interval list ready for the transmitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWaveform {
    /// Carrier frequency in Hz.
    pub frequency: u32,
    /// Mark/space durations in microseconds, starting with a mark.
    pub intervals: Vec<u32>,
}

impl RawWaveform {
    /// Sum of every interval, in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.intervals.iter().map(|&us| u64::from(us)).sum()
    }
}

/// Decode a raw payload (`freq:u32` followed by intervals of `width`).
///
/// An empty interval list is valid.
pub fn parse_raw_waveform(payload: &[u8], width: IntervalWidth) -> Result<RawWaveform, RawError> {
    let reader = RawReader::new(payload, width);
    let frequency = reader.read_frequency()?;
    let intervals = reader.read_intervals()?;
    Ok(RawWaveform {
        frequency,
        intervals,
    })
}
