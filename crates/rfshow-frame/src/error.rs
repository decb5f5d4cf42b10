/// Errors that can occur while building or inspecting radio frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A raw frame does not have the fixed 32-byte size.
    #[error("invalid frame length ({len} bytes, expected {expected})")]
    InvalidLength { len: usize, expected: usize },

    /// A frame payload exceeds the per-frame channel capacity.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The requested channel count is outside the addressable range.
    #[error("channel count {count} out of range [1-{max}]")]
    InvalidChannelCount { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
