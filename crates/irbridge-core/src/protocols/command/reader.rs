use super::error::CommandError;
use super::layout;
use crate::protocols::common::ByteReader;

pub struct CommandReader<'a> {
    inner: ByteReader<'a>,
}

impl<'a> CommandReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self {
            inner: ByteReader::new(frame),
        }
    }

    pub fn read_tag(&self) -> Result<u8, CommandError> {
        self.inner
            .read_u8(layout::TAG_OFFSET)
            .map_err(|_| CommandError::EmptyFrame)
    }

    /// Bytes after the tag; empty when the frame is empty or tag-only.
    pub fn payload(&self) -> &'a [u8] {
        self.inner
            .read_tail(layout::PAYLOAD_OFFSET)
            .unwrap_or_default()
    }

    /// Payload of exactly `N` bytes, otherwise a size error for `tag`.
    pub fn require_payload<const N: usize>(&self, tag: u8) -> Result<[u8; N], CommandError> {
        let payload = self.payload();
        <[u8; N]>::try_from(payload).map_err(|_| CommandError::UnexpectedPayloadSize {
            tag,
            expected: N,
            actual: payload.len(),
        })
    }
}
