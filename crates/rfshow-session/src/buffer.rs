use rfshow_frame::ChannelCount;

use crate::error::{Result, SessionError};

/// A fixed-length, 1-based array of channel values.
///
/// Every mutator validates its arguments before touching the values, so a
/// failed call leaves the buffer unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBuffer {
    values: Vec<u8>,
}

impl ChannelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(count: ChannelCount) -> Self {
        Self {
            values: vec![0; count.get()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a buffer holds at least one channel.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set one channel (1-based).
    pub fn set_one(&mut self, value: u8, channel: usize) -> Result<()> {
        if channel < 1 || channel > self.values.len() {
            return Err(self.out_of_range(channel, 1));
        }
        self.values[channel - 1] = value;
        Ok(())
    }

    /// Overwrite a contiguous run of channels starting at `start` (1-based).
    ///
    /// An empty `values` is a no-op.
    pub fn set_range(&mut self, values: &[u8], start: usize) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let count = self.values.len();
        if start < 1 || start > count || start - 1 + values.len() > count {
            return Err(self.out_of_range(start, values.len()));
        }
        let offset = start - 1;
        self.values[offset..offset + values.len()].copy_from_slice(values);
        Ok(())
    }

    /// Replace every channel.
    pub fn set_all(&mut self, values: &[u8]) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(SessionError::LengthMismatch {
                expected: self.values.len(),
                actual: values.len(),
            });
        }
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Zero every channel.
    pub fn clear(&mut self) {
        self.values.fill(0);
    }

    /// Value of one channel (1-based).
    pub fn get(&self, channel: usize) -> Option<u8> {
        channel
            .checked_sub(1)
            .and_then(|index| self.values.get(index))
            .copied()
    }

    /// An independent copy of the current values.
    pub fn snapshot(&self) -> Vec<u8> {
        self.values.clone()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    fn out_of_range(&self, channel: usize, len: usize) -> SessionError {
        SessionError::OutOfRange {
            channel,
            len,
            count: self.values.len(),
        }
    }
}
