use std::fmt;

use crate::error::Result;

/// Largest payload a single transmission can carry.
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Highest RF channel number (7-bit field).
pub const MAX_RF_CHANNEL: u8 = 127;

/// Narrowest pipe address the transceiver accepts.
pub const MIN_ADDRESS_WIDTH: usize = 3;

/// Widest pipe address the transceiver accepts.
pub const MAX_ADDRESS_WIDTH: usize = 5;

/// Over-the-air data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    Kbps250,
    Mbps1,
    Mbps2,
}

/// Transmit output power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPower {
    /// -18 dBm.
    Min,
    /// -12 dBm.
    Low,
    /// -6 dBm.
    High,
    /// 0 dBm.
    Max,
}

/// Receive pipe index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPipe {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl DataPipe {
    pub fn index(self) -> u8 {
        match self {
            DataPipe::P0 => 0,
            DataPipe::P1 => 1,
            DataPipe::P2 => 2,
            DataPipe::P3 => 3,
            DataPipe::P4 => 4,
            DataPipe::P5 => 5,
        }
    }
}

impl fmt::Display for DataPipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.index())
    }
}

/// Low-level operations of an nRF24-class packet radio.
///
/// Register access, SPI and GPIO handling live behind this trait. Callers
/// sequence these primitives into a full configuration; an implementation
/// only needs to perform each step and report whether it succeeded.
pub trait Transceiver: Send {
    /// Enter power-down mode.
    fn power_down(&mut self) -> Result<()>;

    /// Restore the base configuration register to its reset value.
    fn reset_config(&mut self) -> Result<()>;

    /// Enable the 16-bit CRC.
    fn enable_crc16(&mut self) -> Result<()>;

    /// Tune to an RF channel (0..=127).
    fn set_frequency_channel(&mut self, channel: u8) -> Result<()>;

    /// Select data rate and output power together.
    fn set_data_rate_and_power(&mut self, rate: DataRate, power: OutputPower) -> Result<()>;

    /// Allow payloads to be written with the no-acknowledge command.
    fn enable_no_ack_payloads(&mut self) -> Result<()>;

    /// Clear pending RX_DR, TX_DS and MAX_RT flags.
    fn reset_interrupts(&mut self) -> Result<()>;

    /// Discard the receive FIFO.
    fn flush_rx(&mut self) -> Result<()>;

    /// Discard the transmit FIFO.
    fn flush_tx(&mut self) -> Result<()>;

    /// Leave power-down mode (standby-I).
    fn power_up(&mut self) -> Result<()>;

    /// Open the transmit pipe towards `address`.
    fn open_writing_pipe(&mut self, address: &[u8]) -> Result<()>;

    /// Open receive `pipe` listening on `address`.
    fn open_reading_pipe(&mut self, pipe: DataPipe, address: &[u8]) -> Result<()>;

    /// Transmit one full-width payload without requesting an acknowledgement
    /// (blocking).
    fn send_no_ack(&mut self, payload: &[u8; MAX_PAYLOAD_SIZE]) -> Result<()>;
}

impl<T: Transceiver + ?Sized> Transceiver for Box<T> {
    fn power_down(&mut self) -> Result<()> {
        (**self).power_down()
    }

    fn reset_config(&mut self) -> Result<()> {
        (**self).reset_config()
    }

    fn enable_crc16(&mut self) -> Result<()> {
        (**self).enable_crc16()
    }

    fn set_frequency_channel(&mut self, channel: u8) -> Result<()> {
        (**self).set_frequency_channel(channel)
    }

    fn set_data_rate_and_power(&mut self, rate: DataRate, power: OutputPower) -> Result<()> {
        (**self).set_data_rate_and_power(rate, power)
    }

    fn enable_no_ack_payloads(&mut self) -> Result<()> {
        (**self).enable_no_ack_payloads()
    }

    fn reset_interrupts(&mut self) -> Result<()> {
        (**self).reset_interrupts()
    }

    fn flush_rx(&mut self) -> Result<()> {
        (**self).flush_rx()
    }

    fn flush_tx(&mut self) -> Result<()> {
        (**self).flush_tx()
    }

    fn power_up(&mut self) -> Result<()> {
        (**self).power_up()
    }

    fn open_writing_pipe(&mut self, address: &[u8]) -> Result<()> {
        (**self).open_writing_pipe(address)
    }

    fn open_reading_pipe(&mut self, pipe: DataPipe, address: &[u8]) -> Result<()> {
        (**self).open_reading_pipe(pipe, address)
    }

    fn send_no_ack(&mut self, payload: &[u8; MAX_PAYLOAD_SIZE]) -> Result<()> {
        (**self).send_no_ack(payload)
    }
}
