//! Channel addressing.
//!
//! Channels are numbered from 1. A channel set holds between 1 and
//! [`MAX_CHANNELS`] values, fixed when it is created.

use std::fmt;

use crate::error::{FrameError, Result};

/// Maximum number of addressable channels.
pub const MAX_CHANNELS: usize = 512;

/// A validated channel count in `[1, MAX_CHANNELS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelCount(usize);

impl ChannelCount {
    /// The full 512-channel universe.
    pub const MAX: ChannelCount = ChannelCount(MAX_CHANNELS);

    pub fn new(count: usize) -> Result<Self> {
        if count == 0 || count > MAX_CHANNELS {
            return Err(FrameError::InvalidChannelCount {
                count,
                max: MAX_CHANNELS,
            });
        }
        Ok(Self(count))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Returns true if `channel` is a valid 1-based channel number.
    pub fn contains(self, channel: usize) -> bool {
        (1..=self.0).contains(&channel)
    }
}

impl Default for ChannelCount {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<usize> for ChannelCount {
    type Error = FrameError;

    fn try_from(count: usize) -> Result<Self> {
        Self::new(count)
    }
}

impl From<ChannelCount> for usize {
    fn from(count: ChannelCount) -> usize {
        count.0
    }
}

impl fmt::Display for ChannelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
