//! Channel buffers, radio sessions and periodic transmission.
//!
//! Two controller flavours sit on top of a [`RadioSession`]:
//!
//! - [`SyncController`] keeps a single buffer; edits and sends happen on the
//!   caller's thread.
//! - [`ShowController`] keeps a staging buffer and a committed snapshot.
//!   A [`PeriodicTransmitter`] re-sends the snapshot so receivers that lose
//!   a frame converge on the next refresh.
//!
//! ```no_run
//! use std::time::Duration;
//! use rfshow_session::{RadioConfig, ShowController};
//! use rfshow_frame::ChannelCount;
//! # fn demo<T: rfshow_transport::Transceiver + 'static>(radio: T) -> rfshow_session::Result<()> {
//! let controller = ShowController::new(radio, ChannelCount::new(6)?);
//! controller.start(&RadioConfig::default(), Duration::from_millis(500))?;
//! controller.set_range(&[255, 0, 255], 1)?;
//! controller.commit()?;
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod config;
pub mod controller;
pub mod error;
pub mod periodic;
#[cfg(feature = "async")]
pub mod periodic_async;
pub mod radio;
pub mod sync;

#[cfg(test)]
mod testing;

pub use buffer::ChannelBuffer;
pub use config::{
    ControllerConfig, RadioConfig, RfMode, DATA_RATE, DEFAULT_PIPE_ADDRESS,
    DEFAULT_REFRESH_PERIOD, DEFAULT_RF_CHANNEL, OUTPUT_POWER, RECEIVE_PIPE,
};
pub use controller::ShowController;
pub use error::{CommStage, ConfigStep, Result, SessionError};
pub use periodic::{PeriodicTransmitter, Transmit};
#[cfg(feature = "async")]
pub use periodic_async::AsyncTransmitter;
pub use radio::RadioSession;
pub use sync::SyncController;
