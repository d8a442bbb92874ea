use thiserror::Error;

/// Errors returned by raw waveform decoding.
///
/// # Examples
/// ```
/// use irbridge_core::protocols::raw::RawError;
///
/// let err = RawError::InvalidRawLength { length: 7, width: 2 };
/// assert!(err.to_string().contains("invalid raw payload length"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawError {
    #[error(
        "invalid raw payload length {length}: need a 4-byte frequency plus whole {width}-byte intervals"
    )]
    InvalidRawLength { length: usize, width: usize },
}
