//! In-memory transceiver for unit tests.

use std::mem::discriminant;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rfshow_transport::{
    DataPipe, DataRate, OutputPower, Result, Transceiver, TransportError, MAX_PAYLOAD_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    PowerDown,
    ResetConfig,
    EnableCrc16,
    SetChannel(u8),
    SetDataRate(DataRate, OutputPower),
    EnableNoAck,
    ResetInterrupts,
    FlushRx,
    FlushTx,
    PowerUp,
    OpenWritingPipe(Vec<u8>),
    OpenReadingPipe(DataPipe, Vec<u8>),
}

#[derive(Default)]
struct State {
    ops: Vec<Op>,
    sent: Vec<Vec<u8>>,
    send_attempts: usize,
    fail_on: Option<Op>,
    fail_send_at: Option<usize>,
    fail_all_sends: bool,
    send_delay: Option<Duration>,
}

/// Records every operation; clones share the same record.
#[derive(Clone, Default)]
pub struct MockTransceiver {
    state: Arc<Mutex<State>>,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.state.lock().unwrap().ops.clone()
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }

    /// Fail the next operation of the same kind as `op`.
    pub fn fail_on(&self, op: Op) {
        self.state.lock().unwrap().fail_on = Some(op);
    }

    /// Fail the send attempt with this zero-based index.
    pub fn fail_send_at(&self, attempt: usize) {
        self.state.lock().unwrap().fail_send_at = Some(attempt);
    }

    pub fn fail_all_sends(&self, fail: bool) {
        self.state.lock().unwrap().fail_all_sends = fail;
    }

    pub fn set_send_delay(&self, delay: Duration) {
        self.state.lock().unwrap().send_delay = Some(delay);
    }

    fn record(&self, op: Op) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let fail = state
            .fail_on
            .as_ref()
            .is_some_and(|f| discriminant(f) == discriminant(&op));
        state.ops.push(op);
        if fail {
            state.fail_on = None;
            return Err(TransportError::Device("injected failure".to_string()));
        }
        Ok(())
    }
}

impl Transceiver for MockTransceiver {
    fn power_down(&mut self) -> Result<()> {
        self.record(Op::PowerDown)
    }

    fn reset_config(&mut self) -> Result<()> {
        self.record(Op::ResetConfig)
    }

    fn enable_crc16(&mut self) -> Result<()> {
        self.record(Op::EnableCrc16)
    }

    fn set_frequency_channel(&mut self, channel: u8) -> Result<()> {
        self.record(Op::SetChannel(channel))
    }

    fn set_data_rate_and_power(&mut self, rate: DataRate, power: OutputPower) -> Result<()> {
        self.record(Op::SetDataRate(rate, power))
    }

    fn enable_no_ack_payloads(&mut self) -> Result<()> {
        self.record(Op::EnableNoAck)
    }

    fn reset_interrupts(&mut self) -> Result<()> {
        self.record(Op::ResetInterrupts)
    }

    fn flush_rx(&mut self) -> Result<()> {
        self.record(Op::FlushRx)
    }

    fn flush_tx(&mut self) -> Result<()> {
        self.record(Op::FlushTx)
    }

    fn power_up(&mut self) -> Result<()> {
        self.record(Op::PowerUp)
    }

    fn open_writing_pipe(&mut self, address: &[u8]) -> Result<()> {
        self.record(Op::OpenWritingPipe(address.to_vec()))
    }

    fn open_reading_pipe(&mut self, pipe: DataPipe, address: &[u8]) -> Result<()> {
        self.record(Op::OpenReadingPipe(pipe, address.to_vec()))
    }

    fn send_no_ack(&mut self, payload: &[u8; MAX_PAYLOAD_SIZE]) -> Result<()> {
        let delay = self.state.lock().unwrap().send_delay;
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let mut state = self.state.lock().unwrap();
        let attempt = state.send_attempts;
        state.send_attempts += 1;
        if state.fail_all_sends || state.fail_send_at == Some(attempt) {
            return Err(TransportError::LinkClosed);
        }
        state.sent.push(payload.to_vec());
        Ok(())
    }
}
