use rfshow_frame::ChannelCount;
use rfshow_transport::Transceiver;

use crate::buffer::ChannelBuffer;
use crate::config::{ControllerConfig, RadioConfig};
use crate::error::Result;
use crate::radio::RadioSession;

/// Single-buffer controller: edits and sends happen on the caller's thread.
///
/// Exclusive access is enforced by `&mut self`; wrap it in a mutex to share
/// it between threads.
#[derive(Debug)]
pub struct SyncController<T> {
    buffer: ChannelBuffer,
    session: RadioSession<T>,
}

impl<T: Transceiver> SyncController<T> {
    pub fn new(transceiver: T, channel_count: ChannelCount) -> Self {
        Self {
            buffer: ChannelBuffer::new(channel_count),
            session: RadioSession::new(transceiver, channel_count),
        }
    }

    pub fn from_config(transceiver: T, config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(transceiver, config.channel_count()?))
    }

    pub fn configure(&mut self, radio: &RadioConfig) -> Result<()> {
        self.session.configure(radio)
    }

    pub fn is_configured(&self) -> bool {
        self.session.is_configured()
    }

    pub fn channel_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_one(&mut self, value: u8, channel: usize) -> Result<()> {
        self.buffer.set_one(value, channel)
    }

    pub fn set_range(&mut self, values: &[u8], start: usize) -> Result<()> {
        self.buffer.set_range(values, start)
    }

    pub fn set_all(&mut self, values: &[u8]) -> Result<()> {
        self.buffer.set_all(values)
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.buffer.snapshot()
    }

    /// Transmit the current values; returns the number of frames sent.
    pub fn send(&mut self) -> Result<usize> {
        self.session.send(self.buffer.as_slice())
    }

    pub fn set_all_and_send(&mut self, values: &[u8]) -> Result<usize> {
        self.buffer.set_all(values)?;
        self.send()
    }

    pub fn into_inner(self) -> T {
        self.session.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use rfshow_frame::RadioFrame;

    use super::*;
    use crate::error::SessionError;
    use crate::testing::MockTransceiver;

    fn controller(count: usize) -> (SyncController<MockTransceiver>, MockTransceiver) {
        let radio = MockTransceiver::new();
        let probe = radio.clone();
        let mut controller = SyncController::new(radio, ChannelCount::new(count).unwrap());
        controller.configure(&RadioConfig::default()).unwrap();
        (controller, probe)
    }

    #[test]
    fn rgb_lamps_go_out_in_one_frame() {
        let (mut controller, probe) = controller(6);
        controller.set_range(&[255, 0, 255], 1).unwrap();
        controller.set_range(&[0, 255, 255], 4).unwrap();

        assert_eq!(controller.send().unwrap(), 1);

        let sent = probe.sent();
        let frame = RadioFrame::from_bytes(&sent[0]).unwrap();
        assert_eq!(&frame.payload()[..6], &[255, 0, 255, 0, 255, 255]);
        assert!(frame.payload()[6..].iter().all(|b| *b == 0));
        assert_eq!(frame.sequence(), 0);
    }

    #[test]
    fn full_universe_is_eighteen_frames() {
        let (mut controller, probe) = controller(512);
        let values: Vec<u8> = (0..512).map(|i| (i % 251) as u8).collect();

        assert_eq!(controller.set_all_and_send(&values).unwrap(), 18);

        let sent = probe.sent();
        let mut rebuilt = Vec::new();
        for frame in &sent {
            rebuilt.extend_from_slice(&frame[..30]);
        }
        assert_eq!(&rebuilt[..512], &values[..]);
        assert_eq!(sent[17][31], 0);
    }

    #[test]
    fn set_all_and_send_rejects_wrong_length_without_sending() {
        let (mut controller, probe) = controller(6);
        assert!(matches!(
            controller.set_all_and_send(&[1, 2, 3]),
            Err(SessionError::LengthMismatch { .. })
        ));
        assert!(probe.sent().is_empty());
        assert_eq!(controller.snapshot(), vec![0; 6]);
    }

    #[test]
    fn send_requires_configure() {
        let radio = MockTransceiver::new();
        let mut controller = SyncController::new(radio, ChannelCount::new(4).unwrap());
        assert!(!controller.is_configured());
        assert!(matches!(
            controller.send(),
            Err(SessionError::NotConfigured)
        ));
    }

    #[test]
    fn reset_zeroes_values() {
        let (mut controller, _probe) = controller(3);
        controller.set_all(&[1, 2, 3]).unwrap();
        controller.reset();
        assert_eq!(controller.snapshot(), vec![0; 3]);
    }

    #[test]
    fn failed_send_leaves_values_intact() {
        let (mut controller, probe) = controller(3);
        controller.set_one(42, 2).unwrap();
        probe.fail_all_sends(true);

        assert!(controller.send().unwrap_err().is_communication());
        assert_eq!(controller.snapshot(), vec![0, 42, 0]);
    }
}
