use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use rfshow_frame::ChannelCount;
use rfshow_transport::Transceiver;
use tracing::debug;

use crate::buffer::ChannelBuffer;
use crate::config::{ControllerConfig, RadioConfig};
use crate::error::{Result, SessionError};
use crate::periodic::{PeriodicTransmitter, Transmit};
use crate::radio::RadioSession;

/// Double-buffered channel controller.
///
/// Edits land in a *staging* buffer. `commit` copies staging into the
/// *active* snapshot and transmits it; the periodic transmitter re-sends the
/// active snapshot on its own thread. Staging and active are guarded by
/// separate locks, so a long transmission never blocks staging edits.
///
/// Lock order: the periodic lock, when taken, comes first; the staging lock
/// is always released before the output lock is taken.
pub struct ShowController<T> {
    periodic: Mutex<PeriodicTransmitter>,
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    staging: Mutex<Staging>,
    output: Mutex<Output<T>>,
}

struct Staging {
    buffer: ChannelBuffer,
    generation: u64,
}

struct Output<T> {
    values: Vec<u8>,
    generation: u64,
    session: RadioSession<T>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Transceiver> Transmit for Shared<T> {
    fn transmit(&self) -> Result<usize> {
        let mut output = lock(&self.output);
        let Output {
            values, session, ..
        } = &mut *output;
        session.send(values)
    }
}

impl<T: Transceiver> Shared<T> {
    fn edit<R>(&self, f: impl FnOnce(&mut ChannelBuffer) -> Result<R>) -> Result<R> {
        let mut staging = lock(&self.staging);
        let result = f(&mut staging.buffer)?;
        staging.generation += 1;
        Ok(result)
    }

    /// Apply `f` to staging and take a copy, all under the staging lock.
    fn edit_and_copy(
        &self,
        f: impl FnOnce(&mut ChannelBuffer) -> Result<()>,
    ) -> Result<(Vec<u8>, u64)> {
        let mut staging = lock(&self.staging);
        f(&mut staging.buffer)?;
        staging.generation += 1;
        Ok((staging.buffer.snapshot(), staging.generation))
    }

    fn install_and_send(&self, values: Vec<u8>, generation: u64) -> Result<usize> {
        let mut output = lock(&self.output);
        if generation >= output.generation {
            output.values = values;
            output.generation = generation;
        } else {
            debug!(
                generation,
                active = output.generation,
                "newer snapshot already active"
            );
        }
        let Output {
            values, session, ..
        } = &mut *output;
        session.send(values)
    }
}

impl<T: Transceiver + 'static> ShowController<T> {
    /// Create a controller with zero-filled staging and active buffers.
    pub fn new(transceiver: T, channel_count: ChannelCount) -> Self {
        let shared = Shared {
            staging: Mutex::new(Staging {
                buffer: ChannelBuffer::new(channel_count),
                generation: 0,
            }),
            output: Mutex::new(Output {
                values: vec![0; channel_count.get()],
                generation: 0,
                session: RadioSession::new(transceiver, channel_count),
            }),
        };
        Self {
            periodic: Mutex::new(PeriodicTransmitter::new()),
            shared: Arc::new(shared),
        }
    }

    pub fn from_config(transceiver: T, config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(transceiver, config.channel_count()?))
    }

    /// Configure the radio, zero and commit the channels, then start the
    /// periodic transmitter.
    ///
    /// The periodic lock is held for the whole call, so a concurrent `start`
    /// waits and then fails with `StartedTwice` without touching the radio or
    /// staging.
    pub fn start(&self, radio: &RadioConfig, period: Duration) -> Result<()> {
        let mut periodic = lock(&self.periodic);
        if periodic.is_running() {
            return Err(SessionError::StartedTwice);
        }
        if period.is_zero() {
            return Err(SessionError::InvalidConfig(
                "refresh period must be greater than zero".to_string(),
            ));
        }
        self.configure(radio)?;
        self.reset_and_commit()?;
        periodic.start(period, self.transmit_target())
    }

    pub fn configure(&self, radio: &RadioConfig) -> Result<()> {
        lock(&self.shared.output).session.configure(radio)
    }

    pub fn is_configured(&self) -> bool {
        lock(&self.shared.output).session.is_configured()
    }

    pub fn channel_count(&self) -> usize {
        lock(&self.shared.staging).buffer.len()
    }

    pub fn set_one(&self, value: u8, channel: usize) -> Result<()> {
        self.shared.edit(|buf| buf.set_one(value, channel))
    }

    pub fn set_range(&self, values: &[u8], start: usize) -> Result<()> {
        self.shared.edit(|buf| buf.set_range(values, start))
    }

    pub fn set_all(&self, values: &[u8]) -> Result<()> {
        self.shared.edit(|buf| buf.set_all(values))
    }

    /// Zero staging without committing.
    pub fn reset(&self) {
        let mut staging = lock(&self.shared.staging);
        staging.buffer.clear();
        staging.generation += 1;
    }

    /// Copy of the staging values.
    pub fn snapshot(&self) -> Vec<u8> {
        lock(&self.shared.staging).buffer.snapshot()
    }

    /// Copy of the last committed values.
    pub fn active_snapshot(&self) -> Vec<u8> {
        lock(&self.shared.output).values.clone()
    }

    /// Copy staging into active and transmit it.
    pub fn commit(&self) -> Result<usize> {
        let (values, generation) = {
            let staging = lock(&self.shared.staging);
            (staging.buffer.snapshot(), staging.generation)
        };
        self.shared.install_and_send(values, generation)
    }

    /// Zero staging, then commit.
    pub fn reset_and_commit(&self) -> Result<usize> {
        let (values, generation) = self.shared.edit_and_copy(|buf| {
            buf.clear();
            Ok(())
        })?;
        self.shared.install_and_send(values, generation)
    }

    /// Replace every staging value, then commit.
    pub fn set_all_and_commit(&self, values: &[u8]) -> Result<usize> {
        let (values, generation) = self.shared.edit_and_copy(|buf| buf.set_all(values))?;
        self.shared.install_and_send(values, generation)
    }

    /// Send the active snapshot again without committing.
    pub fn retransmit(&self) -> Result<usize> {
        self.shared.transmit()
    }

    /// Start re-sending the active snapshot every `period`.
    pub fn start_periodic(&self, period: Duration) -> Result<()> {
        lock(&self.periodic).start(period, self.transmit_target())
    }

    /// Stop the periodic transmitter; returns false if it was not running.
    pub fn stop_periodic(&self) -> bool {
        lock(&self.periodic).stop()
    }

    pub fn is_periodic_running(&self) -> bool {
        lock(&self.periodic).is_running()
    }

    /// A non-owning handle for driving transmissions from another scheduler.
    pub fn transmit_target(&self) -> Weak<dyn Transmit> {
        let shared: Arc<dyn Transmit> = self.shared.clone();
        Arc::downgrade(&shared)
    }
}

impl<T> std::fmt::Debug for ShowController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowController").finish_non_exhaustive()
    }
}
