use std::fmt;

use crate::error::{FrameError, Result};

/// On-air frame size: payload (30) + sequence (1) + reserved (1) = 32 bytes.
pub const FRAME_SIZE: usize = 32;

/// Channel values carried per frame.
pub const PAYLOAD_SIZE: usize = 30;

/// Offset of the frame sequence index.
pub const SEQUENCE_OFFSET: usize = 30;

/// Offset of the reserved byte (always zero on send).
pub const RESERVED_OFFSET: usize = 31;

/// One fixed-size radio frame.
///
/// Layout:
/// ```text
/// ┌──────────────────────────────┬──────────┬──────────┐
/// │ Channel values (30B)         │ Sequence │ Reserved │
/// │ zero-padded in the last frame│ (1B)     │ (1B) = 0 │
/// └──────────────────────────────┴──────────┴──────────┘
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadioFrame([u8; FRAME_SIZE]);

impl RadioFrame {
    /// Build a frame from up to [`PAYLOAD_SIZE`] channel values.
    pub fn new(sequence: u8, payload: &[u8]) -> Result<Self> {
        if payload.len() > PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: PAYLOAD_SIZE,
            });
        }
        Ok(Self::encode(sequence, payload))
    }

    /// Caller guarantees `payload.len() <= PAYLOAD_SIZE`.
    pub(crate) fn encode(sequence: u8, payload: &[u8]) -> Self {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[..payload.len()].copy_from_slice(payload);
        bytes[SEQUENCE_OFFSET] = sequence;
        bytes[RESERVED_OFFSET] = 0;
        Self(bytes)
    }

    /// Parse a frame received off the air.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; FRAME_SIZE] = bytes.try_into().map_err(|_| FrameError::InvalidLength {
            len: bytes.len(),
            expected: FRAME_SIZE,
        })?;
        Ok(Self(raw))
    }

    /// Zero-based position of this frame within one send.
    pub fn sequence(&self) -> u8 {
        self.0[SEQUENCE_OFFSET]
    }

    /// The 30 payload bytes, including any zero padding.
    pub fn payload(&self) -> &[u8] {
        &self.0[..PAYLOAD_SIZE]
    }

    pub fn reserved(&self) -> u8 {
        self.0[RESERVED_OFFSET]
    }

    /// The first channel number (1-based) this frame carries.
    pub fn first_channel(&self) -> usize {
        usize::from(self.sequence()) * PAYLOAD_SIZE + 1
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; FRAME_SIZE] {
        self.0
    }
}

impl AsRef<[u8]> for RadioFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for RadioFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioFrame")
            .field("sequence", &self.sequence())
            .field("payload", &self.payload())
            .field("reserved", &self.reserved())
            .finish()
    }
}
