use super::error::CommandError;
use super::layout::{self, StandardProtocol};
use super::reader::CommandReader;
use crate::config::{DispatchConfig, TagClass};
use crate::protocols::raw::{RawWaveform, parse_raw_waveform};

/// A decoded command, ready to be executed against a transmitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Standard {
        protocol: StandardProtocol,
        code: u32,
        bits: u8,
    },
    Delay {
        millis: u16,
    },
    Raw(RawWaveform),
    PanasonicRaw(&'a [u8]),
}

impl Command<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Standard { .. } => "standard",
            Command::Delay { .. } => "delay",
            Command::Raw(_) => "raw",
            Command::PanasonicRaw(_) => "panasonic_raw",
        }
    }
}

/// Decode one frame (`tag` followed by payload) according to `config`.
///
/// # Examples
/// ```
/// use irbridge_core::DispatchConfig;
/// use irbridge_core::protocols::command::{Command, StandardProtocol, parse_command};
///
/// let frame = [3, 0x78, 0x56, 0x34, 0x12];
/// let command = parse_command(&frame, &DispatchConfig::default())?;
/// assert_eq!(
///     command,
///     Command::Standard { protocol: StandardProtocol::Nec, code: 0x1234_5678, bits: 32 }
/// );
/// # Ok::<(), irbridge_core::protocols::command::CommandError>(())
/// ```
pub fn parse_command<'a>(
    frame: &'a [u8],
    config: &DispatchConfig,
) -> Result<Command<'a>, CommandError> {
    let reader = CommandReader::new(frame);
    let tag = reader.read_tag()?;

    match config.tags.classify(tag) {
        TagClass::Standard(protocol) => {
            let code = reader.require_payload::<{ layout::STANDARD_CODE_LEN }>(tag)?;
            let code = u32::from_le_bytes(code);
            Ok(Command::Standard {
                protocol,
                code,
                bits: (layout::STANDARD_CODE_LEN * 8) as u8,
            })
        }
        TagClass::Delay => {
            let millis = reader.require_payload::<{ layout::DELAY_LEN }>(tag)?;
            let millis = u16::from_le_bytes(millis);
            Ok(Command::Delay { millis })
        }
        TagClass::Raw => {
            let waveform = parse_raw_waveform(reader.payload(), config.interval_width)?;
            Ok(Command::Raw(waveform))
        }
        TagClass::PanasonicRaw => Ok(Command::PanasonicRaw(reader.payload())),
        TagClass::Unknown => Err(CommandError::UnknownEncoding { tag }),
    }
}
