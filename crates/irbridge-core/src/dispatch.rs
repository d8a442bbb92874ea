use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DispatchConfig};
use crate::protocols::command::{Command, CommandError, parse_command};
use crate::protocols::message::{CommandFrame, FrameDecoder, MessageError};
use crate::protocols::panasonic::{PanasonicPulses, encode_panasonic_raw};
use crate::protocols::panasonic::layout::CARRIER_HZ;
use crate::protocols::raw::RawError;
use crate::source::{SourceError, load_message};
use crate::transmitter::{IrTransmitter, RecordingTransmitter, TransmitterError};
use crate::{Diagnostic, DispatchReport, make_stub_report};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Counters and diagnostics for one dispatched message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub declared_frames: Option<usize>,
    pub frames_decoded: usize,
    pub commands_executed: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl DispatchOutcome {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.frame {
            Some(frame) => warn!(id = %diagnostic.id, frame, "{}", diagnostic.message),
            None => warn!(id = %diagnostic.id, "{}", diagnostic.message),
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Decodes messages and drives a transmitter, one command at a time.
///
/// The dispatcher borrows the transmitter exclusively; a message is fully
/// transmitted before `dispatch_message` returns.
pub struct Dispatcher<'t, T: IrTransmitter> {
    transmitter: &'t mut T,
    config: DispatchConfig,
}

impl<'t, T: IrTransmitter> Dispatcher<'t, T> {
    pub fn new(transmitter: &'t mut T, config: DispatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transmitter,
            config,
        })
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Decode `message` and transmit its commands in order.
    ///
    /// Malformed frames are reported and skipped; a framing error stops the
    /// remaining frames but keeps what was already sent. The configured
    /// message gap is always observed at the end.
    pub fn dispatch_message(&mut self, message: &[u8]) -> DispatchOutcome {
        info!(size = message.len(), "message arrived");
        let mut outcome = DispatchOutcome::default();
        let mut decoder = FrameDecoder::new(message);

        for item in decoder.by_ref() {
            match item {
                Ok(frame) => {
                    outcome.frames_decoded += 1;
                    self.dispatch_frame(&frame, &mut outcome);
                }
                Err(err) => outcome.report(Diagnostic::from_message_error(&err)),
            }
        }
        outcome.declared_frames = decoder.declared_frames();

        if self.config.message_gap_ms > 0 {
            self.transmitter
                .delay(Duration::from_millis(u64::from(self.config.message_gap_ms)));
        }
        outcome
    }

    fn dispatch_frame(&mut self, frame: &CommandFrame<'_>, outcome: &mut DispatchOutcome) {
        let command = match parse_command(frame.bytes, &self.config) {
            Ok(command) => command,
            Err(err) => {
                outcome.report(Diagnostic::from_command_error(frame.index, &err));
                return;
            }
        };

        debug!(frame = frame.index, kind = command.kind(), "dispatching command");
        match self.execute(&command) {
            Ok(()) => outcome.commands_executed += 1,
            Err(err) => outcome.report(Diagnostic::from_transmitter_error(frame.index, &err)),
        }
    }

    /// Run a single decoded command against the transmitter.
    pub fn execute(&mut self, command: &Command<'_>) -> Result<(), TransmitterError> {
        match command {
            Command::Standard {
                protocol,
                code,
                bits,
            } => self.transmitter.send_generic_code(*protocol, *code, *bits),
            Command::Delay { millis } => {
                self.transmitter
                    .delay(Duration::from_millis(u64::from(*millis)));
                Ok(())
            }
            Command::Raw(waveform) => {
                debug!(
                    frequency = waveform.frequency,
                    intervals = ?waveform.intervals,
                    duration_us = waveform.duration_us(),
                    "raw waveform"
                );
                self.transmitter
                    .send_raw_intervals(waveform.frequency, &waveform.intervals)
            }
            Command::PanasonicRaw(data) => {
                debug!(
                    bytes = data.len(),
                    duration_us = PanasonicPulses::total_duration_us(data),
                    "panasonic raw"
                );
                let pulses = encode_panasonic_raw(data);
                self.transmitter.send_raw_waveform(CARRIER_HZ, &pulses)
            }
        }
    }
}

impl Diagnostic {
    pub fn from_message_error(err: &MessageError) -> Self {
        let id = match err {
            MessageError::EmptyMessage => "IR-EMPTY-MESSAGE",
            MessageError::FrameOverrun { .. } => "IR-FRAME-OVERRUN",
            MessageError::TrailingOrTruncatedData { .. } => "IR-TRAILING-DATA",
        };
        let frame = match err {
            MessageError::FrameOverrun { index, .. } => Some(*index),
            _ => None,
        };
        Self::new(id, frame, err.to_string())
    }

    pub fn from_command_error(frame: usize, err: &CommandError) -> Self {
        let id = match err {
            CommandError::EmptyFrame => "IR-EMPTY-FRAME",
            CommandError::UnexpectedPayloadSize { .. } => "IR-PAYLOAD-SIZE",
            CommandError::UnknownEncoding { .. } => "IR-UNKNOWN-ENCODING",
            CommandError::Raw(RawError::InvalidRawLength { .. }) => "IR-RAW-LENGTH",
        };
        Self::new(id, Some(frame), err.to_string())
    }

    pub fn from_transmitter_error(frame: usize, err: &TransmitterError) -> Self {
        Self::new("IR-TRANSMIT", Some(frame), err.to_string())
    }
}

/// Dispatch `message` against a recording transmitter and build a report.
pub fn dispatch_to_report(
    input_path: &str,
    message: &[u8],
    config: DispatchConfig,
) -> Result<DispatchReport, ConfigError> {
    let mut transmitter = RecordingTransmitter::new();
    let mut report = make_stub_report(input_path, message.len() as u64, config.clone());
    let outcome = Dispatcher::new(&mut transmitter, config)?.dispatch_message(message);

    report.frames_declared = outcome.declared_frames;
    report.frames_decoded = outcome.frames_decoded;
    report.commands_executed = outcome.commands_executed;
    report.diagnostics = outcome.diagnostics;
    report.calls = transmitter.into_calls();
    Ok(report)
}

/// Load a `.bin` or `.hex` message file and dry-run it.
pub fn dispatch_file(path: &Path, config: DispatchConfig) -> Result<DispatchReport, DispatchError> {
    let message = load_message(path)?;
    Ok(dispatch_to_report(
        &path.display().to_string(),
        &message,
        config,
    )?)
}
