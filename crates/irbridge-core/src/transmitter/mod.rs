//! Infrared transmitter boundary.
//!
//! The dispatcher never touches hardware; it drives an [`IrTransmitter`]
//! handed to it for the duration of one message. Every call blocks until the
//! transmission (or delay) is complete.

mod error;
mod recording;

pub use error::TransmitterError;
pub use recording::{RecordingTransmitter, TransmitterCall};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocols::command::StandardProtocol;

/// One carrier-on (mark) or carrier-off (space) interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    pub mark: bool,
    pub duration_us: u32,
}

impl Pulse {
    pub fn mark(duration_us: u32) -> Self {
        Self {
            mark: true,
            duration_us,
        }
    }

    pub fn space(duration_us: u32) -> Self {
        Self {
            mark: false,
            duration_us,
        }
    }
}

/// Output side of the dispatcher.
pub trait IrTransmitter {
    /// Send `code` using a library protocol encoder.
    fn send_generic_code(
        &mut self,
        protocol: StandardProtocol,
        code: u32,
        bits: u8,
    ) -> Result<(), TransmitterError>;

    /// Send alternating mark/space intervals (µs) at `frequency` Hz.
    fn send_raw_intervals(
        &mut self,
        frequency: u32,
        intervals: &[u32],
    ) -> Result<(), TransmitterError>;

    /// Send an explicit pulse train at `frequency` Hz.
    fn send_raw_waveform(
        &mut self,
        frequency: u32,
        pulses: &[Pulse],
    ) -> Result<(), TransmitterError>;

    /// Block the caller; real transmitters just sleep.
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
