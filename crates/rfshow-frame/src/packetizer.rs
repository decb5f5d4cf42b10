use std::iter::FusedIterator;
use std::slice::Chunks;

use bytes::{BufMut, BytesMut};

use crate::codec::{RadioFrame, FRAME_SIZE, PAYLOAD_SIZE};

/// Number of frames needed to carry `len` channel values.
pub fn frame_count(len: usize) -> usize {
    len.div_ceil(PAYLOAD_SIZE)
}

/// Slice channel values into radio frames, in sequence order.
///
/// Frame `i` carries values `[i * 30, min((i + 1) * 30, len))`. The sequence
/// byte is `i` truncated to one byte. An empty input yields no frames.
pub fn split(values: &[u8]) -> Vec<RadioFrame> {
    frames(values).collect()
}

/// Lazy form of [`split`].
pub fn frames(values: &[u8]) -> Frames<'_> {
    Frames {
        chunks: values.chunks(PAYLOAD_SIZE),
        index: 0,
    }
}

/// Append the on-air bytes of every frame for `values` to `dst`.
pub fn encode_frames(values: &[u8], dst: &mut BytesMut) {
    dst.reserve(frame_count(values.len()) * FRAME_SIZE);
    for frame in frames(values) {
        dst.put_slice(frame.as_bytes());
    }
}

/// Iterator over the frames of one channel value slice.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    chunks: Chunks<'a, u8>,
    index: usize,
}

impl Iterator for Frames<'_> {
    type Item = RadioFrame;

    fn next(&mut self) -> Option<RadioFrame> {
        let chunk = self.chunks.next()?;
        // One-byte field: wraps every 256 frames.
        let sequence = (self.index % 256) as u8;
        self.index += 1;
        Some(RadioFrame::encode(sequence, chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}
