//! Fixed-size radio framing for channel value arrays.
//!
//! A channel array of up to 512 values is sliced into 32-byte frames:
//! - 30 channel values, zero-padded in the final frame
//! - 1 byte zero-based sequence index (wraps at 256)
//! - 1 reserved byte, always zero
//!
//! Framing is pure and deterministic; no I/O happens here.

pub mod channel;
pub mod codec;
pub mod error;
pub mod packetizer;

pub use channel::{ChannelCount, MAX_CHANNELS};
pub use codec::{RadioFrame, FRAME_SIZE, PAYLOAD_SIZE, RESERVED_OFFSET, SEQUENCE_OFFSET};
pub use error::{FrameError, Result};
pub use packetizer::{encode_frames, frame_count, frames, split, Frames};
