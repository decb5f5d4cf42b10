use std::path::Path;
use std::time::Duration;

use rfshow_frame::ChannelCount;
use rfshow_transport::{
    DataPipe, DataRate, OutputPower, MAX_ADDRESS_WIDTH, MAX_RF_CHANNEL, MIN_ADDRESS_WIDTH,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Slowest, most reliable data rate.
pub const DATA_RATE: DataRate = DataRate::Kbps250;

/// 0 dBm.
pub const OUTPUT_POWER: OutputPower = OutputPower::Max;

/// Pipe used when listening.
pub const RECEIVE_PIPE: DataPipe = DataPipe::P1;

/// Default refresh cadence of the periodic transmitter.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(500);

/// Default RF channel.
pub const DEFAULT_RF_CHANNEL: u8 = 76;

/// Default pipe address.
pub const DEFAULT_PIPE_ADDRESS: [u8; 5] = [0xD2, 0xF2, 0xF2, 0xF2, 0xF2];

/// Radio direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RfMode {
    #[serde(alias = "tx")]
    Transmit,
    #[serde(alias = "rx")]
    Receive,
}

/// Parameters applied by `RadioSession::configure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioConfig {
    /// RF channel (0..=127).
    pub rf_channel: u8,
    /// Pipe address, 3 to 5 bytes.
    pub pipe_address: Vec<u8>,
    pub mode: RfMode,
}

impl RadioConfig {
    pub fn new(rf_channel: u8, pipe_address: impl Into<Vec<u8>>, mode: RfMode) -> Result<Self> {
        let config = Self {
            rf_channel,
            pipe_address: pipe_address.into(),
            mode,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rf_channel > MAX_RF_CHANNEL {
            return Err(SessionError::InvalidConfig(format!(
                "rf_channel {} exceeds {MAX_RF_CHANNEL}",
                self.rf_channel
            )));
        }
        let width = self.pipe_address.len();
        if !(MIN_ADDRESS_WIDTH..=MAX_ADDRESS_WIDTH).contains(&width) {
            return Err(SessionError::InvalidConfig(format!(
                "pipe_address must be {MIN_ADDRESS_WIDTH}..={MAX_ADDRESS_WIDTH} bytes, got {width}"
            )));
        }
        Ok(())
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            rf_channel: DEFAULT_RF_CHANNEL,
            pipe_address: DEFAULT_PIPE_ADDRESS.to_vec(),
            mode: RfMode::Transmit,
        }
    }
}

/// Controller settings, loadable from JSON.
///
/// ```json
/// {
///   "channel_count": 6,
///   "refresh_period_ms": 500,
///   "radio": { "rf_channel": 76, "pipe_address": [210, 242, 242, 242, 242], "mode": "transmit" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub channel_count: usize,
    pub refresh_period_ms: u64,
    pub radio: RadioConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            channel_count: ChannelCount::MAX.get(),
            refresh_period_ms: DEFAULT_REFRESH_PERIOD.as_millis() as u64,
            radio: RadioConfig::default(),
        }
    }
}

impl ControllerConfig {
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| SessionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&input)
    }

    pub fn validate(&self) -> Result<()> {
        ChannelCount::new(self.channel_count)?;
        if self.refresh_period_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "refresh_period_ms must be greater than zero".to_string(),
            ));
        }
        self.radio.validate()
    }

    pub fn channel_count(&self) -> Result<ChannelCount> {
        Ok(ChannelCount::new(self.channel_count)?)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_period_ms)
    }
}
