//! Control-stream framing.
//!
//! Every control message travels as:
//!
//! ```text
//! +----------------+--------------------+------------------+
//! | Type tag       | Payload length     | Payload          |
//! | 2 bytes (BE16) | 4 bytes (BE32)     | `length` bytes   |
//! +----------------+--------------------+------------------+
//! ```
//!
//! The codec knows nothing about message semantics; unknown tags are framed
//! like any other and left to the dispatch layer.

use crate::core::constants::{FRAME_HEADER_SIZE, MAX_PAYLOAD_SIZE};
use crate::core::{ConnectionError, ConnectionResult};

/// One complete control message as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Message type tag.
    pub tag: u16,
    /// Schema-encoded payload.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a frame from a tag and payload.
    pub fn new(tag: u16, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    /// Serialize header and payload.
    ///
    /// Fails with [`ConnectionError::FrameTooLarge`] when the payload exceeds
    /// [`MAX_PAYLOAD_SIZE`].
    pub fn encode(&self) -> ConnectionResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    /// Append header and payload to `buf`. Nothing is written on error.
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> ConnectionResult<()> {
        let too_large = || ConnectionError::FrameTooLarge {
            len: self.payload.len(),
            max: MAX_PAYLOAD_SIZE,
        };
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(too_large());
        }
        let len = u32::try_from(self.payload.len()).map_err(|_| too_large())?;

        buf.extend_from_slice(&self.tag.to_be_bytes());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(&self.payload);
        Ok(())
    }

    /// Total encoded size.
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_SIZE + self.payload.len()
    }
}

/// Read the `(tag, length)` header at the start of `buf`, if complete.
pub fn peek_header(buf: &[u8]) -> Option<(u16, u32)> {
    let header = buf.get(..FRAME_HEADER_SIZE)?;
    let tag = u16::from_be_bytes([header[0], header[1]]);
    let len = u32::from_be_bytes([header[2], header[3], header[4], header[5]]);
    Some((tag, len))
}

/// Split as many complete frames as possible off the front of `buf`.
///
/// Returns the unconsumed remainder and the frames in wire order. The
/// remainder always starts at the header of the first incomplete frame, so
/// calling again with more bytes appended resumes exactly where this call
/// stopped.
pub fn extract_frames(buf: &[u8]) -> (&[u8], Vec<Frame>) {
    let mut frames = Vec::new();
    let mut rest = buf;

    while let Some((tag, len)) = peek_header(rest) {
        let end = match FRAME_HEADER_SIZE.checked_add(len as usize) {
            Some(end) if end <= rest.len() => end,
            _ => break,
        };
        frames.push(Frame::new(tag, rest[FRAME_HEADER_SIZE..end].to_vec()));
        rest = &rest[end..];
    }

    (rest, frames)
}

/// Owned receive buffer feeding [`extract_frames`].
#[derive(Debug, Default, Clone)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append newly received bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Remove and return every complete frame; partial data stays buffered.
    pub fn drain_frames(&mut self) -> Vec<Frame> {
        let (rest, frames) = extract_frames(&self.buf);
        let consumed = self.buf.len() - rest.len();
        self.buf.drain(..consumed);
        frames
    }

    /// Bytes buffered but not yet framed.
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }

    /// Payload length declared by the buffered header, if one is complete.
    pub fn declared_len(&self) -> Option<usize> {
        peek_header(&self.buf).map(|(_, len)| len as usize)
    }

    /// Discard everything buffered.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_header_layout() {
        let frame = Frame::new(7, b"hello".to_vec());
        let bytes = frame.encode().unwrap();
        assert_eq!(hex::encode(&bytes[..FRAME_HEADER_SIZE]), "000700000005");
        assert_eq!(&bytes[FRAME_HEADER_SIZE..], b"hello");
        assert_eq!(frame.encoded_len(), bytes.len());
    }

    #[test]
    fn test_oversized_payload_is_not_encoded() {
        let frame = Frame::new(11, vec![0; MAX_PAYLOAD_SIZE + 1]);
        let mut buf = vec![0xff];
        assert!(matches!(
            frame.encode_into(&mut buf),
            Err(ConnectionError::FrameTooLarge { len, max })
                if len == MAX_PAYLOAD_SIZE + 1 && max == MAX_PAYLOAD_SIZE
        ));
        assert_eq!(buf, vec![0xff]);

        let largest = Frame::new(11, vec![0; MAX_PAYLOAD_SIZE]);
        assert_eq!(largest.encode().unwrap().len(), largest.encoded_len());
    }

    #[test]
    fn test_extract_single_frame() {
        let bytes = Frame::new(7, b"hello".to_vec()).encode().unwrap();
        let (rest, frames) = extract_frames(&bytes);
        assert!(rest.is_empty());
        assert_eq!(frames, vec![Frame::new(7, b"hello".to_vec())]);
    }

    #[test]
    fn test_short_header_is_held_back() {
        let bytes = hex::decode("00070000").unwrap();
        let (rest, frames) = extract_frames(&bytes);
        assert!(frames.is_empty());
        assert_eq!(rest, &bytes[..]);
    }

    #[test]
    fn test_partial_payload_is_held_back() {
        // Header declares 10 bytes, only 4 follow.
        let bytes = hex::decode("000b0000000a61626364").unwrap();
        let (rest, frames) = extract_frames(&bytes);
        assert!(frames.is_empty());
        assert_eq!(rest, &bytes[..]);
    }

    #[test]
    fn test_remainder_starts_at_incomplete_header() {
        let mut bytes = Frame::new(3, vec![1, 2]).encode().unwrap();
        let tail = Frame::new(9, vec![0; 8]).encode().unwrap();
        bytes.extend_from_slice(&tail[..10]);

        let (rest, frames) = extract_frames(&bytes);
        assert_eq!(frames, vec![Frame::new(3, vec![1, 2])]);
        assert_eq!(rest, &tail[..10]);
    }

    #[test]
    fn test_unknown_tag_and_empty_payload_are_framed() {
        let mut bytes = Frame::new(999, Vec::new()).encode().unwrap();
        bytes.extend(Frame::new(11, b"x".to_vec()).encode().unwrap());

        let (rest, frames) = extract_frames(&bytes);
        assert!(rest.is_empty());
        assert_eq!(
            frames,
            vec![Frame::new(999, Vec::new()), Frame::new(11, b"x".to_vec())]
        );
    }

    #[test]
    fn test_frame_buffer_resumes() {
        let bytes = Frame::new(5, b"sync".to_vec()).encode().unwrap();
        let mut buffer = FrameBuffer::new();

        buffer.extend(&bytes[..3]);
        assert!(buffer.drain_frames().is_empty());
        assert_eq!(buffer.declared_len(), None);

        buffer.extend(&bytes[3..8]);
        assert!(buffer.drain_frames().is_empty());
        assert_eq!(buffer.declared_len(), Some(4));
        assert_eq!(buffer.pending_len(), 8);

        buffer.extend(&bytes[8..]);
        assert_eq!(buffer.drain_frames(), vec![Frame::new(5, b"sync".to_vec())]);
        assert_eq!(buffer.pending_len(), 0);
    }

    #[test]
    fn test_frame_buffer_clear() {
        let mut buffer = FrameBuffer::with_capacity(64);
        buffer.extend(&[0, 1, 0, 0]);
        buffer.clear();
        assert_eq!(buffer.pending_len(), 0);
    }

    fn arb_frames() -> impl Strategy<Value = Vec<Frame>> {
        prop::collection::vec(
            (any::<u16>(), prop::collection::vec(any::<u8>(), 0..64))
                .prop_map(|(tag, payload)| Frame::new(tag, payload)),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn test_chunked_feed_matches_whole_feed(
            frames in arb_frames(),
            cuts in prop::collection::vec(any::<usize>(), 0..16),
        ) {
            let mut stream = Vec::new();
            for frame in &frames {
                frame.encode_into(&mut stream).unwrap();
            }

            let (rest, whole) = extract_frames(&stream);
            prop_assert!(rest.is_empty());
            prop_assert_eq!(&whole, &frames);

            let mut points: Vec<usize> = cuts
                .into_iter()
                .map(|c| if stream.is_empty() { 0 } else { c % stream.len() })
                .collect();
            points.push(0);
            points.push(stream.len());
            points.sort_unstable();

            let mut buffer = FrameBuffer::new();
            let mut chunked = Vec::new();
            for pair in points.windows(2) {
                buffer.extend(&stream[pair[0]..pair[1]]);
                chunked.extend(buffer.drain_frames());
            }

            prop_assert_eq!(buffer.pending_len(), 0);
            prop_assert_eq!(chunked, frames);
        }
    }
}
