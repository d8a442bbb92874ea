use super::error::MessageError;
use super::layout;
use crate::protocols::common::ByteReader;

pub struct MessageReader<'a> {
    inner: ByteReader<'a>,
}

impl<'a> MessageReader<'a> {
    pub fn new(message: &'a [u8]) -> Self {
        Self {
            inner: ByteReader::new(message),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn read_frame_count(&self) -> Result<usize, MessageError> {
        self.inner
            .read_u8(layout::COUNT_OFFSET)
            .map(usize::from)
            .map_err(|_| MessageError::EmptyMessage)
    }

    /// Read the length prefix at `offset`; `None` when the message ends first.
    pub fn read_frame_len(&self, offset: usize) -> Option<usize> {
        self.inner.read_u8(offset).ok().map(usize::from)
    }

    pub fn read_frame(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        self.inner.read_slice(offset, len).ok()
    }
}
