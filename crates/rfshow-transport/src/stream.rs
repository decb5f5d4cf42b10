use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::error::{Result, TransportError};
use crate::traits::{
    DataPipe, DataRate, OutputPower, Transceiver, MAX_ADDRESS_WIDTH, MAX_PAYLOAD_SIZE,
    MAX_RF_CHANNEL, MIN_ADDRESS_WIDTH,
};

/// Register-level state mirrored by a [`StreamTransceiver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    pub powered: bool,
    pub crc16: bool,
    pub rf_channel: u8,
    pub data_rate: DataRate,
    pub output_power: OutputPower,
    pub no_ack_enabled: bool,
    pub writing_pipe: Option<Vec<u8>>,
    pub reading_pipes: Vec<(DataPipe, Vec<u8>)>,
}

impl Default for LinkState {
    fn default() -> Self {
        Self {
            powered: false,
            crc16: false,
            rf_channel: 2,
            data_rate: DataRate::Mbps2,
            output_power: OutputPower::Max,
            no_ack_enabled: false,
            writing_pipe: None,
            reading_pipes: Vec::new(),
        }
    }
}

/// A transceiver that forwards every transmitted payload to a byte stream.
///
/// Useful for radio bridges reached over a serial port or socket, and for
/// capturing the exact bytes that would go on air. Every payload is written
/// at the fixed 32-byte width.
pub struct StreamTransceiver<W> {
    inner: W,
    buf: BytesMut,
    state: LinkState,
}

impl<W: Write> StreamTransceiver<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_PAYLOAD_SIZE),
            state: LinkState::default(),
        }
    }

    /// Current mirrored register state.
    pub fn state(&self) -> &LinkState {
        &self.state
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the transceiver and return the inner stream.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_all(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(TransportError::LinkClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }
}

fn check_address(address: &[u8]) -> Result<()> {
    if !(MIN_ADDRESS_WIDTH..=MAX_ADDRESS_WIDTH).contains(&address.len()) {
        return Err(TransportError::AddressWidth {
            len: address.len(),
            min: MIN_ADDRESS_WIDTH,
            max: MAX_ADDRESS_WIDTH,
        });
    }
    Ok(())
}

impl<W: Write + Send> Transceiver for StreamTransceiver<W> {
    fn power_down(&mut self) -> Result<()> {
        self.state.powered = false;
        Ok(())
    }

    fn reset_config(&mut self) -> Result<()> {
        // CONFIG reset value: 8-bit CRC, powered down.
        self.state.crc16 = false;
        self.state.powered = false;
        Ok(())
    }

    fn enable_crc16(&mut self) -> Result<()> {
        self.state.crc16 = true;
        Ok(())
    }

    fn set_frequency_channel(&mut self, channel: u8) -> Result<()> {
        if channel > MAX_RF_CHANNEL {
            return Err(TransportError::RfChannel(channel));
        }
        self.state.rf_channel = channel;
        Ok(())
    }

    fn set_data_rate_and_power(&mut self, rate: DataRate, power: OutputPower) -> Result<()> {
        self.state.data_rate = rate;
        self.state.output_power = power;
        Ok(())
    }

    fn enable_no_ack_payloads(&mut self) -> Result<()> {
        self.state.no_ack_enabled = true;
        Ok(())
    }

    fn reset_interrupts(&mut self) -> Result<()> {
        Ok(())
    }

    fn flush_rx(&mut self) -> Result<()> {
        Ok(())
    }

    fn flush_tx(&mut self) -> Result<()> {
        self.buf.clear();
        Ok(())
    }

    fn power_up(&mut self) -> Result<()> {
        self.state.powered = true;
        Ok(())
    }

    fn open_writing_pipe(&mut self, address: &[u8]) -> Result<()> {
        check_address(address)?;
        self.state.writing_pipe = Some(address.to_vec());
        Ok(())
    }

    fn open_reading_pipe(&mut self, pipe: DataPipe, address: &[u8]) -> Result<()> {
        check_address(address)?;
        self.state.reading_pipes.retain(|(p, _)| *p != pipe);
        self.state.reading_pipes.push((pipe, address.to_vec()));
        Ok(())
    }

    fn send_no_ack(&mut self, payload: &[u8; MAX_PAYLOAD_SIZE]) -> Result<()> {
        if !self.state.powered {
            return Err(TransportError::PoweredDown);
        }
        if self.state.writing_pipe.is_none() {
            return Err(TransportError::NoWritingPipe);
        }

        self.buf.clear();
        self.buf.put_slice(payload);
        trace!(channel = self.state.rf_channel, "writing payload to link");
        self.write_all()
    }
}

impl<W> std::fmt::Debug for StreamTransceiver<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTransceiver")
            .field("state", &self.state)
            .finish()
    }
}
