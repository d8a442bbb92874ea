use thiserror::Error;

use crate::protocols::raw::RawError;

/// Errors returned while decoding a single command frame.
///
/// Each of these skips the frame it occurred in; the rest of the message is
/// still processed.
///
/// # Examples
/// ```
/// use irbridge_core::protocols::command::CommandError;
///
/// let err = CommandError::UnknownEncoding { tag: 0x42 };
/// assert!(err.to_string().contains("unexpected encoding: 66"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty frame: missing encoding tag")]
    EmptyFrame,
    #[error("unexpected payload size for encoding {tag}: need {expected} bytes, got {actual}")]
    UnexpectedPayloadSize {
        tag: u8,
        expected: usize,
        actual: usize,
    },
    #[error("unexpected encoding: {tag}")]
    UnknownEncoding { tag: u8 },
    #[error(transparent)]
    Raw(#[from] RawError),
}
