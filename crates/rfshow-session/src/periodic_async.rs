//! Periodic transmission as a tokio task.

use std::io;
use std::sync::Weak;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};
use crate::periodic::Transmit;

/// Async counterpart of [`PeriodicTransmitter`](crate::PeriodicTransmitter).
///
/// Each tick runs the blocking transmit on the blocking pool. Cancellation
/// is observed between ticks only, so a tick that has begun always finishes.
/// Dropping the transmitter cancels it without waiting.
pub struct AsyncTransmitter {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AsyncTransmitter {
    /// Spawn on the current runtime; the first tick fires immediately.
    pub fn spawn(period: Duration, target: Weak<dyn Transmit>) -> Result<Self> {
        if period.is_zero() {
            return Err(SessionError::InvalidConfig(
                "refresh period must be greater than zero".to_string(),
            ));
        }
        let runtime = Handle::try_current().map_err(|e| SessionError::Spawn(io::Error::other(e)))?;

        let cancel = CancellationToken::new();
        let handle = runtime.spawn(run(period, target, cancel.clone()));
        info!(period_ms = period.as_millis() as u64, "async transmitter started");

        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    /// Token that stops the transmitter when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel and wait for the task, including an in-flight tick.
    ///
    /// Returns false if it was already stopped.
    pub async fn stop(&mut self) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        self.cancel.cancel();
        if let Err(err) = handle.await {
            warn!(error = %err, "async transmitter task failed");
        }
        info!("async transmitter stopped");
        true
    }
}

impl Drop for AsyncTransmitter {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for AsyncTransmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncTransmitter")
            .field("running", &self.is_running())
            .finish()
    }
}

async fn run(period: Duration, target: Weak<dyn Transmit>, cancel: CancellationToken) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = interval.tick() => {}
        }

        let Some(strong) = target.upgrade() else {
            debug!("transmit target dropped, async transmitter exiting");
            return;
        };
        match task::spawn_blocking(move || strong.transmit()).await {
            Ok(Ok(frames)) => debug!(tick, frames, "periodic transmit"),
            Ok(Err(err)) => warn!(tick, error = %err, "periodic transmit failed"),
            Err(err) => warn!(tick, error = %err, "periodic transmit task failed"),
        }
        tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[derive(Default)]
    struct Counter {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl Transmit for Counter {
        fn transmit(&self) -> Result<usize> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(SessionError::NotConfigured);
            }
            Ok(1)
        }
    }

    fn weak(target: &Arc<Counter>) -> Weak<dyn Transmit> {
        let target: Arc<dyn Transmit> = target.clone();
        Arc::downgrade(&target)
    }

    async fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        for _ in 0..500 {
            if cond() {
                return true;
            }
            time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn ticks_until_stopped() {
        let target = Arc::new(Counter::default());
        let mut tx = AsyncTransmitter::spawn(Duration::from_millis(5), weak(&target)).unwrap();

        assert!(wait_for(|| target.calls.load(Ordering::SeqCst) >= 3).await);
        assert!(tx.stop().await);
        assert!(!tx.stop().await);

        let after = target.calls.load(Ordering::SeqCst);
        time::sleep(Duration::from_millis(30)).await;
        assert_eq!(target.calls.load(Ordering::SeqCst), after);
    }

    #[tokio::test]
    async fn first_tick_is_immediate() {
        let target = Arc::new(Counter::default());
        let mut tx = AsyncTransmitter::spawn(Duration::from_secs(3600), weak(&target)).unwrap();

        assert!(wait_for(|| target.calls.load(Ordering::SeqCst) == 1).await);
        tx.stop().await;
    }

    #[tokio::test]
    async fn failures_keep_the_cadence() {
        let target = Arc::new(Counter::default());
        target.fail.store(true, Ordering::SeqCst);
        let mut tx = AsyncTransmitter::spawn(Duration::from_millis(5), weak(&target)).unwrap();

        assert!(wait_for(|| target.calls.load(Ordering::SeqCst) >= 3).await);
        assert!(tx.is_running());
        tx.stop().await;
    }

    #[tokio::test]
    async fn external_cancel_stops_task() {
        let target = Arc::new(Counter::default());
        let tx = AsyncTransmitter::spawn(Duration::from_millis(5), weak(&target)).unwrap();

        tx.cancel_token().cancel();

        assert!(wait_for(|| !tx.is_running()).await);
    }

    #[tokio::test]
    async fn zero_period_rejected() {
        let target = Arc::new(Counter::default());
        assert!(matches!(
            AsyncTransmitter::spawn(Duration::ZERO, weak(&target)),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn spawn_outside_runtime_fails() {
        let target = Arc::new(Counter::default());
        assert!(matches!(
            AsyncTransmitter::spawn(Duration::from_millis(5), weak(&target)),
            Err(SessionError::Spawn(_))
        ));
    }
}
