use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{IrTransmitter, Pulse, TransmitterError};
use crate::protocols::command::StandardProtocol;

/// A transmitter call as observed by [`RecordingTransmitter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum TransmitterCall {
    GenericCode {
        protocol: StandardProtocol,
        code: u32,
        bits: u8,
    },
    RawIntervals {
        frequency: u32,
        intervals: Vec<u32>,
    },
    RawWaveform {
        frequency: u32,
        pulses: Vec<Pulse>,
    },
    Delay {
        millis: u64,
    },
}

/// Transmitter that records every call instead of emitting infrared.
///
/// Delays are recorded, not slept, so dry runs and tests finish instantly.
///
/// # Examples
/// ```
/// use irbridge_core::{IrTransmitter, RecordingTransmitter, TransmitterCall};
///
/// let mut tx = RecordingTransmitter::new();
/// tx.send_raw_intervals(38_000, &[900, 450])?;
/// assert_eq!(
///     tx.calls(),
///     &[TransmitterCall::RawIntervals { frequency: 38_000, intervals: vec![900, 450] }]
/// );
/// # Ok::<(), irbridge_core::TransmitterError>(())
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransmitter {
    calls: Vec<TransmitterCall>,
}

impl RecordingTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[TransmitterCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<TransmitterCall> {
        self.calls
    }
}

impl IrTransmitter for RecordingTransmitter {
    fn send_generic_code(
        &mut self,
        protocol: StandardProtocol,
        code: u32,
        bits: u8,
    ) -> Result<(), TransmitterError> {
        self.calls.push(TransmitterCall::GenericCode {
            protocol,
            code,
            bits,
        });
        Ok(())
    }

    fn send_raw_intervals(
        &mut self,
        frequency: u32,
        intervals: &[u32],
    ) -> Result<(), TransmitterError> {
        self.calls.push(TransmitterCall::RawIntervals {
            frequency,
            intervals: intervals.to_vec(),
        });
        Ok(())
    }

    fn send_raw_waveform(
        &mut self,
        frequency: u32,
        pulses: &[Pulse],
    ) -> Result<(), TransmitterError> {
        self.calls.push(TransmitterCall::RawWaveform {
            frequency,
            pulses: pulses.to_vec(),
        });
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.calls.push(TransmitterCall::Delay {
            millis: duration.as_millis() as u64,
        });
    }
}
