use super::error::ReadError;

/// Bounds-checked little-endian reads at arbitrary offsets.
///
/// Values are copied out of the byte slice, so the alignment of `offset`
/// relative to the target type never matters.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ReadError> {
        self.read_array::<1>(offset).map(|[b]| b)
    }

    pub fn read_u16_le(&self, offset: usize) -> Result<u16, ReadError> {
        self.read_array(offset).map(u16::from_le_bytes)
    }

    pub fn read_u32_le(&self, offset: usize) -> Result<u32, ReadError> {
        self.read_array(offset).map(u32::from_le_bytes)
    }

    /// Borrow `width` bytes starting at `offset`.
    pub fn read_slice(&self, offset: usize, width: usize) -> Result<&'a [u8], ReadError> {
        offset
            .checked_add(width)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(ReadError::OutOfBounds {
                offset,
                width,
                len: self.bytes.len(),
            })
    }

    /// Borrow everything from `offset` to the end of the buffer.
    pub fn read_tail(&self, offset: usize) -> Result<&'a [u8], ReadError> {
        self.bytes.get(offset..).ok_or(ReadError::OutOfBounds {
            offset,
            width: 0,
            len: self.bytes.len(),
        })
    }

    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], ReadError> {
        let bytes = self.read_slice(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::ByteReader;
    use crate::protocols::common::ReadError;

    #[test]
    fn reads_little_endian_at_odd_offsets() {
        let bytes = [0xAA, 0x01, 0x02, 0x03, 0x04, 0x05];
        let reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8(0).unwrap(), 0xAA);
        assert_eq!(reader.read_u16_le(1).unwrap(), 0x0201);
        assert_eq!(reader.read_u32_le(1).unwrap(), 0x0403_0201);
        assert_eq!(reader.read_u32_le(2).unwrap(), 0x0504_0302);
    }

    #[test]
    fn read_past_end_is_reported() {
        let bytes = [0x01, 0x02, 0x03];
        let reader = ByteReader::new(&bytes);
        let err = reader.read_u32_le(0).unwrap_err();
        assert_eq!(
            err,
            ReadError::OutOfBounds {
                offset: 0,
                width: 4,
                len: 3
            }
        );
        assert!(reader.read_u8(3).is_err());
    }

    #[test]
    fn read_slice_rejects_offset_overflow() {
        let bytes = [0u8; 4];
        let reader = ByteReader::new(&bytes);
        assert!(reader.read_slice(usize::MAX, 2).is_err());
    }

    #[test]
    fn read_tail_allows_empty_remainder() {
        let bytes = [1u8, 2];
        let reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_tail(2).unwrap(), &[] as &[u8]);
        assert!(reader.read_tail(3).is_err());
    }
}
