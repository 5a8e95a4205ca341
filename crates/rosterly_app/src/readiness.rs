//! Backend readiness probing.
//!
//! On startup the backend may still be migrating or warming up, so the app
//! probes the health endpoint until it answers, then flips a process-wide
//! flag exactly once. The flag never goes back to false.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use rosterly_client::RosterlyApi;

/// Fixed delay between probe attempts. No backoff growth, no retry cap.
pub const PROBE_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeState {
    Polling,
    Ready,
}

/// Observer handle for the readiness flag. Cheap to clone and hand out.
#[derive(Clone)]
pub struct Readiness {
    rx: watch::Receiver<bool>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn state(&self) -> ProbeState {
        if self.is_ready() {
            ProbeState::Ready
        } else {
            ProbeState::Polling
        }
    }

    /// Await the Polling -> Ready transition. Returns immediately when the
    /// backend is already ready.
    pub async fn wait_ready(&mut self) {
        while !*self.rx.borrow_and_update() {
            if self.rx.changed().await.is_err() {
                // Prober dropped without ever reporting ready; nothing more
                // will arrive, so stop waiting.
                return;
            }
        }
    }
}

/// The polling side of the readiness state machine. Constructed once at
/// startup; [`run`](ReadinessProber::run) consumes it, so the Ready state is
/// terminal by construction.
pub struct ReadinessProber {
    api: Arc<dyn RosterlyApi>,
    interval: Duration,
    tx: watch::Sender<bool>,
}

impl ReadinessProber {
    pub fn new(api: Arc<dyn RosterlyApi>) -> (Self, Readiness) {
        Self::with_interval(api, PROBE_INTERVAL)
    }

    pub fn with_interval(api: Arc<dyn RosterlyApi>, interval: Duration) -> (Self, Readiness) {
        let (tx, rx) = watch::channel(false);
        (Self { api, interval, tx }, Readiness { rx })
    }

    /// Probe the health endpoint until it answers, then publish Ready and
    /// stop. Every failure is transient: log it, sleep the fixed interval,
    /// try again. There is no cap and no caller-visible error; if the
    /// backend never comes up this runs for the life of the process.
    pub async fn run(self) {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            match self.api.health().await {
                Ok(_) => {
                    tracing::info!(attempt, "backend is ready");
                    let _ = self.tx.send(true);
                    return;
                }
                Err(err) => {
                    tracing::debug!(attempt, error = %err, "backend not ready yet, retrying");
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockApi;
    use std::sync::atomic::Ordering;
    // tokio's Instant so elapsed time tracks the paused test clock
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn first_probe_success_sets_ready_immediately() {
        let api = Arc::new(MockApi::health_failures_then_ok(0));
        let (prober, readiness) = ReadinessProber::with_interval(api.clone(), PROBE_INTERVAL);
        assert_eq!(readiness.state(), ProbeState::Polling);

        let started = Instant::now();
        prober.run().await;

        assert!(readiness.is_ready());
        assert_eq!(readiness.state(), ProbeState::Ready);
        assert_eq!(api.health_calls.load(Ordering::SeqCst), 1);
        // Paused clock: any sleep would show up in virtual elapsed time.
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn two_failures_then_success_takes_three_attempts_two_intervals() {
        let api = Arc::new(MockApi::health_failures_then_ok(2));
        let (prober, readiness) = ReadinessProber::with_interval(api.clone(), PROBE_INTERVAL);

        let started = Instant::now();
        prober.run().await;

        assert!(readiness.is_ready());
        assert_eq!(api.health_calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), PROBE_INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn n_failures_then_success_means_n_plus_one_attempts() {
        let n = 7;
        let api = Arc::new(MockApi::health_failures_then_ok(n));
        let (prober, _readiness) = ReadinessProber::with_interval(api.clone(), PROBE_INTERVAL);

        prober.run().await;

        assert_eq!(api.health_calls.load(Ordering::SeqCst), n + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_ready_observes_transition_from_spawned_prober() {
        let api = Arc::new(MockApi::health_failures_then_ok(1));
        let (prober, mut readiness) = ReadinessProber::with_interval(api, PROBE_INTERVAL);

        assert!(!readiness.is_ready());
        let handle = tokio::spawn(prober.run());
        readiness.wait_ready().await;
        assert!(readiness.is_ready());
        handle.await.expect("prober task");

        // Prober task is gone; the flag must stay set.
        assert!(readiness.is_ready());
        readiness.wait_ready().await;
    }
}
