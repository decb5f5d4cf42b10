use std::fmt;
use std::path::PathBuf;

use rfshow_transport::TransportError;

/// Where a radio communication failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommStage {
    /// A step of the configure sequence.
    Configure(ConfigStep),
    /// Transmitting frame `sequence`; `frames_sent` frames already went out.
    Transmit { sequence: u8, frames_sent: usize },
}

/// The ordered steps of radio configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStep {
    PowerDown,
    ResetConfig,
    EnableCrc,
    SetChannel,
    SetDataRate,
    EnableNoAck,
    ResetInterrupts,
    FlushRx,
    FlushTx,
    PowerUp,
    OpenPipe,
}

impl fmt::Display for ConfigStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigStep::PowerDown => "power down",
            ConfigStep::ResetConfig => "reset config",
            ConfigStep::EnableCrc => "enable crc",
            ConfigStep::SetChannel => "set channel",
            ConfigStep::SetDataRate => "set data rate",
            ConfigStep::EnableNoAck => "enable no-ack",
            ConfigStep::ResetInterrupts => "reset interrupts",
            ConfigStep::FlushRx => "flush rx",
            ConfigStep::FlushTx => "flush tx",
            ConfigStep::PowerUp => "power up",
            ConfigStep::OpenPipe => "open pipe",
        };
        f.write_str(name)
    }
}

impl fmt::Display for CommStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommStage::Configure(step) => write!(f, "configure ({step})"),
            CommStage::Transmit {
                sequence,
                frames_sent,
            } => write!(f, "frame {sequence} ({frames_sent} already sent)"),
        }
    }
}

/// Errors that can occur in session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A channel number or range does not fit the channel count.
    #[error("channel {channel} (+{len} values) out of range [1-{count}]")]
    OutOfRange {
        channel: usize,
        len: usize,
        count: usize,
    },

    /// A full replacement does not match the channel count.
    #[error("expected {expected} channel values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A send was attempted before a successful configure.
    #[error("radio session is not configured")]
    NotConfigured,

    /// The radio failed while configuring or transmitting.
    #[error("radio communication failed at {stage}: {source}")]
    Communication {
        stage: CommStage,
        #[source]
        source: TransportError,
    },

    /// The periodic transmitter is already running.
    #[error("periodic transmitter already started")]
    StartedTwice,

    /// The transmitter thread could not be spawned.
    #[error("failed to spawn transmitter thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A radio or controller configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Frame-level error (invalid channel count).
    #[error("frame error: {0}")]
    Frame(#[from] rfshow_frame::FrameError),

    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// True for failures reported by the radio itself.
    pub fn is_communication(&self) -> bool {
        matches!(self, SessionError::Communication { .. })
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
