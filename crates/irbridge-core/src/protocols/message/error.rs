use thiserror::Error;

/// Errors returned while splitting a message into frames.
///
/// # Examples
/// ```
/// use irbridge_core::protocols::message::MessageError;
///
/// let err = MessageError::FrameOverrun { index: 1, declared: 9, remaining: 2 };
/// assert!(err.to_string().contains("overruns"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("empty message: missing frame count")]
    EmptyMessage,
    #[error("frame {index} length {declared} overruns message ({remaining} bytes remain)")]
    FrameOverrun {
        index: usize,
        declared: usize,
        remaining: usize,
    },
    #[error(
        "parsed contents not exhaustive: {decoded_frames}/{declared_frames} frames consumed {consumed} of {length} bytes"
    )]
    TrailingOrTruncatedData {
        declared_frames: usize,
        decoded_frames: usize,
        consumed: usize,
        length: usize,
    },
}
