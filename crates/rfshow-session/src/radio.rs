use rfshow_frame::{frames, ChannelCount};
use rfshow_transport::{Transceiver, TransportError};
use tracing::{debug, info, trace};

use crate::config::{RadioConfig, RfMode, DATA_RATE, OUTPUT_POWER, RECEIVE_PIPE};
use crate::error::{CommStage, ConfigStep, Result, SessionError};

/// A configured transceiver that sends channel values as radio frames.
///
/// The session owns the transceiver exclusively. `send` blocks for the
/// duration of the transmission.
pub struct RadioSession<T> {
    transceiver: T,
    channel_count: ChannelCount,
    mode: Option<RfMode>,
}

impl<T: Transceiver> RadioSession<T> {
    pub fn new(transceiver: T, channel_count: ChannelCount) -> Self {
        Self {
            transceiver,
            channel_count,
            mode: None,
        }
    }

    /// Apply `config`, fully resetting the transceiver first.
    ///
    /// Steps run in a fixed order: power down, reset config, 16-bit CRC,
    /// channel, data rate and power, no-ack payloads, clear interrupts and
    /// both FIFOs, power up, open the pipe. The first failing step aborts
    /// the call and leaves the session unconfigured.
    pub fn configure(&mut self, config: &RadioConfig) -> Result<()> {
        config.validate()?;
        self.mode = None;

        let t = &mut self.transceiver;
        step(ConfigStep::PowerDown, t.power_down())?;
        step(ConfigStep::ResetConfig, t.reset_config())?;
        step(ConfigStep::EnableCrc, t.enable_crc16())?;
        step(
            ConfigStep::SetChannel,
            t.set_frequency_channel(config.rf_channel),
        )?;
        step(
            ConfigStep::SetDataRate,
            t.set_data_rate_and_power(DATA_RATE, OUTPUT_POWER),
        )?;
        step(ConfigStep::EnableNoAck, t.enable_no_ack_payloads())?;
        step(ConfigStep::ResetInterrupts, t.reset_interrupts())?;
        step(ConfigStep::FlushRx, t.flush_rx())?;
        step(ConfigStep::FlushTx, t.flush_tx())?;
        step(ConfigStep::PowerUp, t.power_up())?;
        match config.mode {
            RfMode::Transmit => step(
                ConfigStep::OpenPipe,
                t.open_writing_pipe(&config.pipe_address),
            )?,
            RfMode::Receive => step(
                ConfigStep::OpenPipe,
                t.open_reading_pipe(RECEIVE_PIPE, &config.pipe_address),
            )?,
        }

        self.mode = Some(config.mode);
        info!(
            rf_channel = config.rf_channel,
            mode = ?config.mode,
            "radio configured"
        );
        Ok(())
    }

    /// Frame `values` and transmit every frame in sequence order.
    ///
    /// Returns the number of frames sent. An empty slice sends nothing. The
    /// first transmission error aborts the remaining frames; frames already
    /// on air are not retracted.
    pub fn send(&mut self, values: &[u8]) -> Result<usize> {
        if self.mode.is_none() {
            return Err(SessionError::NotConfigured);
        }
        if values.is_empty() {
            return Ok(0);
        }
        if values.len() > self.channel_count.get() {
            return Err(SessionError::OutOfRange {
                channel: 1,
                len: values.len(),
                count: self.channel_count.get(),
            });
        }

        let mut sent = 0usize;
        for frame in frames(values) {
            trace!(sequence = frame.sequence(), "sending frame");
            self.transceiver
                .send_no_ack(frame.as_bytes())
                .map_err(|source| SessionError::Communication {
                    stage: CommStage::Transmit {
                        sequence: frame.sequence(),
                        frames_sent: sent,
                    },
                    source,
                })?;
            sent += 1;
        }
        debug!(channels = values.len(), frames = sent, "sent channel values");
        Ok(sent)
    }

    pub fn is_configured(&self) -> bool {
        self.mode.is_some()
    }

    /// Mode applied by the last successful configure.
    pub fn mode(&self) -> Option<RfMode> {
        self.mode
    }

    pub fn channel_count(&self) -> ChannelCount {
        self.channel_count
    }

    /// Borrow the underlying transceiver.
    pub fn get_ref(&self) -> &T {
        &self.transceiver
    }

    /// Consume the session and return the transceiver.
    pub fn into_inner(self) -> T {
        self.transceiver
    }
}

fn step(which: ConfigStep, result: std::result::Result<(), TransportError>) -> Result<()> {
    debug!(step = %which, "configure");
    result.map_err(|source| SessionError::Communication {
        stage: CommStage::Configure(which),
        source,
    })
}

impl<T> std::fmt::Debug for RadioSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioSession")
            .field("channel_count", &self.channel_count)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
