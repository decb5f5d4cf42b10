/// Errors raised by a packet radio transceiver.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// An I/O error occurred on the underlying link (SPI bridge, serial port, socket).
    #[error("transceiver I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The pipe address width is not supported by the transceiver.
    #[error("unsupported pipe address width ({len} bytes, expected {min}..={max})")]
    AddressWidth { len: usize, min: usize, max: usize },

    /// The RF channel is outside the transceiver's 7-bit range.
    #[error("rf channel {0} out of range (max 127)")]
    RfChannel(u8),

    /// A payload was handed to the transceiver while it was powered down.
    #[error("transceiver is powered down")]
    PoweredDown,

    /// A payload was handed to the transceiver before a writing pipe was opened.
    #[error("no writing pipe open")]
    NoWritingPipe,

    /// The remote end of the link stopped accepting bytes.
    #[error("link closed")]
    LinkClosed,

    /// The device reported a failure it could not describe as I/O.
    #[error("device error: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
