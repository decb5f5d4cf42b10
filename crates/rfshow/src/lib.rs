//! Stream show-control channel values over nRF24 packet radios.
//!
//! A universe of up to 512 one-byte channel values is cut into 32-byte radio
//! frames (30 value bytes, a sequence byte, a reserved byte) and pushed to
//! receivers on a fixed refresh cadence.
//!
//! # Crate Structure
//!
//! - [`transport`]: Transceiver step surface and a stream-backed implementation
//! - [`frame`]: Packetizer and frame layout
//! - [`session`]: Channel buffers, radio sessions and periodic transmission

/// Re-export transport types.
pub mod transport {
    pub use rfshow_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use rfshow_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use rfshow_session::*;
}
