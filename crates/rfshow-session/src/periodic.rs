use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};

/// Something that can push its current committed snapshot over the air.
pub trait Transmit: Send + Sync {
    /// Send the current snapshot; returns the number of frames sent.
    fn transmit(&self) -> Result<usize>;
}

/// Re-sends a committed snapshot at a fixed cadence on a dedicated thread.
///
/// The transmitter only holds a weak reference to its target. When the
/// target is dropped the worker exits on its next tick.
///
/// `stop` lets an in-flight tick finish and guarantees no tick starts after
/// it returns. A failed tick is logged and the cadence continues.
#[derive(Default)]
pub struct PeriodicTransmitter {
    worker: Option<Worker>,
}

struct Worker {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl PeriodicTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Transmit once immediately, then every `period`.
    pub fn start(&mut self, period: Duration, target: Weak<dyn Transmit>) -> Result<()> {
        if self.worker.is_some() {
            return Err(SessionError::StartedTwice);
        }
        if period.is_zero() {
            return Err(SessionError::InvalidConfig(
                "refresh period must be greater than zero".to_string(),
            ));
        }

        let (stop, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("rfshow-periodic".to_string())
            .spawn(move || run(period, target, stop_rx))
            .map_err(SessionError::Spawn)?;

        info!(period_ms = period.as_millis() as u64, "periodic transmitter started");
        self.worker = Some(Worker { stop, handle });
        Ok(())
    }

    /// Cancel future ticks and wait for an in-flight one to complete.
    ///
    /// Returns false if the transmitter was not running.
    pub fn stop(&mut self) -> bool {
        let Some(worker) = self.worker.take() else {
            return false;
        };
        // The worker may already have exited; a closed channel is fine.
        let _ = worker.stop.send(());
        if worker.handle.join().is_err() {
            warn!("periodic transmitter thread panicked");
        }
        info!("periodic transmitter stopped");
        true
    }
}

impl Drop for PeriodicTransmitter {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PeriodicTransmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTransmitter")
            .field("running", &self.is_running())
            .finish()
    }
}

fn run(period: Duration, target: Weak<dyn Transmit>, stop: mpsc::Receiver<()>) {
    let mut next = Instant::now();
    let mut tick = 0u64;

    loop {
        let Some(strong) = target.upgrade() else {
            debug!("transmit target dropped, periodic transmitter exiting");
            return;
        };
        match strong.transmit() {
            Ok(frames) => debug!(tick, frames, "periodic transmit"),
            Err(err) => warn!(tick, error = %err, "periodic transmit failed"),
        }
        drop(strong);
        tick += 1;

        next += period;
        let now = Instant::now();
        if next < now {
            // Fell behind; skip missed ticks rather than bursting.
            next = now + period;
        }

        match stop.recv_timeout(next.saturating_duration_since(now)) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
