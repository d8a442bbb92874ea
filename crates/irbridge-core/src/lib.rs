//! irbridge core library: infrared command messages to transmitter calls.
//!
//! A message is a compact binary list of commands. This crate splits it into
//! frames, decodes each frame into a command (standard protocol code, delay,
//! raw interval list, or Panasonic raw byte stream) and drives an injected
//! [`IrTransmitter`] with the result, in order and synchronously.
//!
//! Decoding is byte-oriented and side-effect free; protocol layers follow a
//! layout/reader/parser/error split so no parser indexes bytes directly and
//! every read is bounds-checked. Malformed input degrades to skipped frames
//! plus diagnostics, never a panic.
//!
//! Invariants:
//! - Frames are dispatched in message order; a framing error stops further
//!   frames but keeps what was already transmitted.
//! - Custom tag values come from a validated, versioned [`TagTable`].
//! - Decoded values never depend on the alignment of the input buffer.
//!
//! # Examples
//! ```
//! use irbridge_core::{DispatchConfig, Dispatcher, RecordingTransmitter, TransmitterCall};
//!
//! let message = [0x01, 0x03, 0xEF, 0x0A, 0x00];
//! let mut tx = RecordingTransmitter::new();
//! let outcome = Dispatcher::new(&mut tx, DispatchConfig::default())?.dispatch_message(&message);
//! assert!(outcome.diagnostics.is_empty());
//! assert_eq!(tx.calls()[0], TransmitterCall::Delay { millis: 10 });
//! # Ok::<(), irbridge_core::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};

mod config;
mod dispatch;
pub mod protocols;
mod source;
mod transmitter;

pub use config::{
    ConfigError, DEFAULT_MESSAGE_GAP_MS, DispatchConfig, IntervalWidth, TagClass, TagRevision,
    TagTable,
};
pub use dispatch::{
    DispatchError, DispatchOutcome, Dispatcher, dispatch_file, dispatch_to_report,
};
pub use source::{MessageFormat, SourceError, load_message, parse_hex_message};
pub use transmitter::{IrTransmitter, Pulse, RecordingTransmitter, TransmitterCall, TransmitterError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the caller does not stamp the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Result of a dry-run dispatch of one message.
///
/// # Examples
/// ```
/// use irbridge_core::{DispatchConfig, make_stub_report};
///
/// let report = make_stub_report("message.hex", 11, DispatchConfig::default());
/// assert_eq!(report.report_version, irbridge_core::REPORT_VERSION);
/// assert!(report.calls.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp of report generation.
    pub generated_at: String,
    pub input: InputInfo,
    /// Configuration the message was decoded with.
    pub config: DispatchConfig,
    /// Frame count announced by the message, when it had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames_declared: Option<usize>,
    pub frames_decoded: usize,
    pub commands_executed: usize,
    /// Transmitter calls in the order they were made.
    pub calls: Vec<TransmitterCall>,
    /// Decode and dispatch problems in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input message metadata embedded in reports.
///
/// # Examples
/// ```
/// use irbridge_core::InputInfo;
///
/// let input = InputInfo {
///     path: "message.bin".to_string(),
///     bytes: 11,
/// };
/// assert_eq!(input.bytes, 11);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided, or `-` for inline hex.
    pub path: String,
    /// Message size in bytes.
    pub bytes: u64,
}

/// A reported decode or dispatch problem; never affects control flow.
///
/// # Examples
/// ```
/// use irbridge_core::Diagnostic;
///
/// let diagnostic = Diagnostic::new("IR-UNKNOWN-ENCODING", Some(0), "unexpected encoding: 66");
/// assert_eq!(diagnostic.frame, Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier (e.g. `IR-FRAME-OVERRUN`).
    pub id: String,
    /// Index of the frame concerned, if the problem is frame-specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    pub fn new(id: impl Into<String>, frame: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            frame,
            message: message.into(),
        }
    }
}

/// Build a report with base fields filled and empty results.
pub fn make_stub_report(input_path: &str, input_bytes: u64, config: DispatchConfig) -> DispatchReport {
    DispatchReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "irbridge".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        config,
        frames_declared: None,
        frames_decoded: 0,
        commands_executed: 0,
        calls: vec![],
        diagnostics: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let mut report = make_stub_report("-", 0, DispatchConfig::default());
        report
            .diagnostics
            .push(Diagnostic::new("IR-EMPTY-MESSAGE", None, "empty message"));

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("frames_declared").is_none());
        assert!(value["diagnostics"][0].get("frame").is_none());
        assert!(value["config"]["tags"].get("raw_aliases").is_none());
        assert_eq!(value["config"]["interval_width"], "u16");
        assert_eq!(value["config"]["tags"]["revision"], "current");
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = make_stub_report("message.hex", 4, DispatchConfig::default());
        report.calls.push(TransmitterCall::RawWaveform {
            frequency: 36_700,
            pulses: vec![Pulse::mark(432), Pulse::space(0)],
        });
        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: DispatchReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.calls, report.calls);
        assert_eq!(parsed.config, report.config);
    }
}
