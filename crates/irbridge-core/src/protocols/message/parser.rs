use std::iter::FusedIterator;

use super::error::MessageError;
use super::layout;
use super::reader::MessageReader;

/// A borrowed view of one frame inside a message, length prefix excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame<'a> {
    /// Zero-based position of the frame within the message.
    pub index: usize,
    /// Offset of the first frame byte within the message.
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl CommandFrame<'_> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum DecodeState {
    Start,
    Frames {
        declared: usize,
        next_index: usize,
        cursor: usize,
    },
    Done,
}

/// Single-pass iterator over the frames of a message.
///
/// Yields every frame that fits, then at most one terminal error. Once an
/// error or the final frame has been yielded the iterator is exhausted.
///
/// # Examples
/// ```
/// use irbridge_core::protocols::message::FrameDecoder;
///
/// let message = [2, 1, 0xAA, 2, 0xBB, 0xCC];
/// let frames: Vec<_> = FrameDecoder::new(&message).collect::<Result<_, _>>()?;
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[1].bytes, &[0xBB, 0xCC]);
/// # Ok::<(), irbridge_core::protocols::message::MessageError>(())
/// ```
pub struct FrameDecoder<'a> {
    reader: MessageReader<'a>,
    state: DecodeState,
    declared: Option<usize>,
}

impl<'a> FrameDecoder<'a> {
    pub fn new(message: &'a [u8]) -> Self {
        Self {
            reader: MessageReader::new(message),
            state: DecodeState::Start,
            declared: None,
        }
    }

    /// Frame count announced by the message, once it has been read.
    pub fn declared_frames(&self) -> Option<usize> {
        self.declared
    }

    fn finish(
        &mut self,
        err: Option<MessageError>,
    ) -> Option<Result<CommandFrame<'a>, MessageError>> {
        self.state = DecodeState::Done;
        err.map(Err)
    }
}

impl<'a> Iterator for FrameDecoder<'a> {
    type Item = Result<CommandFrame<'a>, MessageError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            DecodeState::Done => None,
            DecodeState::Start => match self.reader.read_frame_count() {
                Ok(declared) => {
                    self.declared = Some(declared);
                    self.state = DecodeState::Frames {
                        declared,
                        next_index: 0,
                        cursor: layout::FIRST_FRAME_OFFSET,
                    };
                    self.next()
                }
                Err(err) => self.finish(Some(err)),
            },
            DecodeState::Frames {
                declared,
                next_index,
                cursor,
            } => {
                let length = self.reader.len();
                let truncated = MessageError::TrailingOrTruncatedData {
                    declared_frames: declared,
                    decoded_frames: next_index,
                    consumed: cursor,
                    length,
                };

                if next_index == declared {
                    let err = (cursor != length).then_some(truncated);
                    return self.finish(err);
                }

                let Some(frame_len) = self.reader.read_frame_len(cursor) else {
                    return self.finish(Some(truncated));
                };
                let start = cursor + layout::FRAME_LEN_PREFIX;
                let Some(bytes) = self.reader.read_frame(start, frame_len) else {
                    return self.finish(Some(MessageError::FrameOverrun {
                        index: next_index,
                        declared: frame_len,
                        remaining: length.saturating_sub(start),
                    }));
                };

                self.state = DecodeState::Frames {
                    declared,
                    next_index: next_index + 1,
                    cursor: start + frame_len,
                };
                Some(Ok(CommandFrame {
                    index: next_index,
                    offset: start,
                    bytes,
                }))
            }
        }
    }
}

impl FusedIterator for FrameDecoder<'_> {}

/// Every frame of a message plus the terminal error, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage<'a> {
    pub declared_frames: Option<usize>,
    pub frames: Vec<CommandFrame<'a>>,
    pub error: Option<MessageError>,
}

impl DecodedMessage<'_> {
    /// Bytes covered by the count byte and every decoded frame with its prefix.
    pub fn consumed(&self) -> usize {
        let frames: usize = self
            .frames
            .iter()
            .map(|frame| layout::FRAME_LEN_PREFIX + frame.len())
            .sum();
        match self.declared_frames {
            Some(_) => layout::COUNT_LEN + frames,
            None => 0,
        }
    }
}

/// Decode a whole message eagerly.
pub fn decode_frames(message: &[u8]) -> DecodedMessage<'_> {
    let mut decoder = FrameDecoder::new(message);
    let mut frames = Vec::new();
    let mut error = None;
    for item in decoder.by_ref() {
        match item {
            Ok(frame) => frames.push(frame),
            Err(err) => error = Some(err),
        }
    }
    DecodedMessage {
        declared_frames: decoder.declared_frames(),
        frames,
        error,
    }
}
