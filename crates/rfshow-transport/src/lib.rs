//! Packet radio transceiver abstraction.
//!
//! The lowest layer of rfshow. A [`Transceiver`] exposes the individual
//! steps of an nRF24-class radio (power, CRC, channel, data rate, pipes,
//! no-ack transmit). Hardware drivers implement it; the session layer
//! sequences the steps.
//!
//! [`StreamTransceiver`] forwards transmitted payloads to any `Write`
//! stream, for radio bridges and for capturing traffic.

pub mod error;
pub mod stream;
pub mod traits;

pub use error::{Result, TransportError};
pub use stream::{LinkState, StreamTransceiver};
pub use traits::{
    DataPipe, DataRate, OutputPower, Transceiver, MAX_ADDRESS_WIDTH, MAX_PAYLOAD_SIZE,
    MAX_RF_CHANNEL, MIN_ADDRESS_WIDTH,
};
