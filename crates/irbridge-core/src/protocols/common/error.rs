use thiserror::Error;

/// Errors returned by [`ByteReader`](super::ByteReader).
///
/// # Examples
/// ```
/// use irbridge_core::protocols::common::ReadError;
///
/// let err = ReadError::OutOfBounds { offset: 3, width: 4, len: 5 };
/// assert!(err.to_string().contains("out of bounds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("read out of bounds: {width} bytes at offset {offset}, buffer holds {len}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
}
