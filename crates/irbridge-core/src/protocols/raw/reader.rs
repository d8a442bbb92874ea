use super::error::RawError;
use super::layout::{self, IntervalWidth};
use crate::protocols::common::ByteReader;

pub struct RawReader<'a> {
    inner: ByteReader<'a>,
    width: IntervalWidth,
}

impl<'a> RawReader<'a> {
    pub fn new(payload: &'a [u8], width: IntervalWidth) -> Self {
        Self {
            inner: ByteReader::new(payload),
            width,
        }
    }

    fn invalid_length(&self) -> RawError {
        RawError::InvalidRawLength {
            length: self.inner.len(),
            width: self.width.bytes(),
        }
    }

    pub fn read_frequency(&self) -> Result<u32, RawError> {
        self.inner
            .read_u32_le(layout::FREQUENCY_OFFSET)
            .map_err(|_| self.invalid_length())
    }

    pub fn read_intervals(&self) -> Result<Vec<u32>, RawError> {
        let tail = self
            .inner
            .read_tail(layout::INTERVALS_OFFSET)
            .map_err(|_| self.invalid_length())?;
        let chunks = tail.chunks_exact(self.width.bytes());
        if !chunks.remainder().is_empty() {
            return Err(self.invalid_length());
        }
        Ok(chunks
            .map(|chunk| match self.width {
                IntervalWidth::U16 => u32::from(u16::from_le_bytes([chunk[0], chunk[1]])),
                IntervalWidth::U32 => u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::RawReader;
    use crate::protocols::raw::{IntervalWidth, RawError};

    #[test]
    fn reads_u16_intervals() {
        let payload = [0x10, 0x00, 0x00, 0x00, 0x84, 0x03, 0xC2, 0x01];
        let reader = RawReader::new(&payload, IntervalWidth::U16);
        assert_eq!(reader.read_frequency().unwrap(), 16);
        assert_eq!(reader.read_intervals().unwrap(), vec![900, 450]);
    }

    #[test]
    fn reads_u32_intervals() {
        let payload = [0, 0, 0, 0, 0x40, 0x42, 0x0F, 0x00];
        let reader = RawReader::new(&payload, IntervalWidth::U32);
        assert_eq!(reader.read_intervals().unwrap(), vec![1_000_000]);
    }

    #[test]
    fn partial_interval_is_rejected() {
        let payload = [0, 0, 0, 0, 0x01, 0x02, 0x03];
        let reader = RawReader::new(&payload, IntervalWidth::U32);
        assert_eq!(
            reader.read_intervals(),
            Err(RawError::InvalidRawLength {
                length: 7,
                width: 4
            })
        );
    }

    #[test]
    fn short_frequency_is_rejected() {
        let payload = [0x01, 0x02];
        let reader = RawReader::new(&payload, IntervalWidth::U16);
        assert!(matches!(
            reader.read_frequency(),
            Err(RawError::InvalidRawLength { length: 2, .. })
        ));
    }
}
