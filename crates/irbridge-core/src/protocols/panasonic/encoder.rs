use std::iter::FusedIterator;

use super::layout;
use crate::transmitter::Pulse;

/// Pulse train for a Panasonic raw packet.
///
/// Walks header, data bits (LSB first) and trailer in order; exhausted once
/// the closing space has been produced.
#[derive(Debug, Clone)]
pub struct PanasonicPulses<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> PanasonicPulses<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of pulses emitted for a packet of `len` bytes.
    pub fn pulse_count(len: usize) -> usize {
        layout::HEADER_PULSES
            + len * layout::BITS_PER_BYTE * layout::PULSES_PER_BIT
            + layout::TRAILER_PULSES
    }

    /// Total on-air time in microseconds, excluding carrier setup.
    pub fn total_duration_us(data: &[u8]) -> u64 {
        let ones: u64 = data.iter().map(|byte| u64::from(byte.count_ones())).sum();
        let bits = (data.len() * layout::BITS_PER_BYTE) as u64;
        let zeros = bits - ones;
        u64::from(layout::HDR_MARK_US + layout::HDR_SPACE_US)
            + bits * u64::from(layout::BIT_MARK_US)
            + ones * u64::from(layout::ONE_SPACE_US)
            + zeros * u64::from(layout::ZERO_SPACE_US)
            + u64::from(layout::BIT_MARK_US + layout::END_SPACE_US)
    }

    fn pulse_at(&self, position: usize) -> Option<Pulse> {
        let data_pulses = self.data.len() * layout::BITS_PER_BYTE * layout::PULSES_PER_BIT;
        let trailer_start = layout::HEADER_PULSES + data_pulses;

        match position {
            0 => Some(Pulse::mark(layout::HDR_MARK_US)),
            1 => Some(Pulse::space(layout::HDR_SPACE_US)),
            p if p < trailer_start => {
                let k = p - layout::HEADER_PULSES;
                if k % layout::PULSES_PER_BIT == 0 {
                    return Some(Pulse::mark(layout::BIT_MARK_US));
                }
                let bit_index = k / layout::PULSES_PER_BIT;
                let byte = self.data[bit_index / layout::BITS_PER_BYTE];
                let mask = 1u8 << (bit_index % layout::BITS_PER_BYTE);
                let space = if byte & mask != 0 {
                    layout::ONE_SPACE_US
                } else {
                    layout::ZERO_SPACE_US
                };
                Some(Pulse::space(space))
            }
            p if p == trailer_start => Some(Pulse::mark(layout::BIT_MARK_US)),
            p if p == trailer_start + 1 => Some(Pulse::space(layout::END_SPACE_US)),
            _ => None,
        }
    }
}

impl Iterator for PanasonicPulses<'_> {
    type Item = Pulse;

    fn next(&mut self) -> Option<Pulse> {
        let pulse = self.pulse_at(self.position)?;
        self.position += 1;
        Some(pulse)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Self::pulse_count(self.data.len()).saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PanasonicPulses<'_> {}
impl FusedIterator for PanasonicPulses<'_> {}

/// Encode `data` into the full Panasonic raw pulse train.
///
/// # Examples
/// ```
/// use irbridge_core::protocols::panasonic::encode_panasonic_raw;
///
/// let pulses = encode_panasonic_raw(&[0x01]);
/// assert_eq!(pulses.len(), 20);
/// assert_eq!(pulses[3].duration_us, 3 * 432);
/// ```
pub fn encode_panasonic_raw(data: &[u8]) -> Vec<Pulse> {
    PanasonicPulses::new(data).collect()
}
