//! Periodic polling tasks
//!
//! A [`PollTask`] runs a tick future on a fixed interval until its
//! [`PollHandle`] is dropped or shut down. [`PollHandle::refresh`] runs a
//! tick immediately and restarts the interval.
//!
//! Responses can race: a slow poll may finish after a faster, later one.
//! [`RequestSequencer`] stamps each poll and [`LastApplied`] drops the
//! stale result.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Shortest interval a [`PollTask`] runs at
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Periodic task definition
#[derive(Debug, Clone)]
pub struct PollTask {
    name: &'static str,
    interval: Duration,
}

impl PollTask {
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it
    pub fn new(name: &'static str, interval: Duration) -> Self {
        if interval < MIN_POLL_INTERVAL {
            tracing::warn!(task = %name, interval_ms = interval.as_millis() as u64, "Poll interval too short, using minimum");
        }
        Self {
            name,
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start polling; the first tick runs immediately
    ///
    /// A panicking tick is logged and the task keeps polling.
    pub fn spawn<F, Fut>(self, mut tick: F) -> PollHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let refresh = Arc::new(Notify::new());
        let name = self.name;
        let interval = self.interval;

        let token = cancel.clone();
        let trigger = refresh.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = trigger.notified() => ticker.reset(),
                    _ = ticker.tick() => {}
                }

                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    result = AssertUnwindSafe(tick()).catch_unwind() => {
                        if let Err(panic_info) = result {
                            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                                (*s).to_string()
                            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                                s.clone()
                            } else {
                                "Unknown panic".to_string()
                            };
                            tracing::error!(task = %name, panic = %panic_msg, "Poll tick panicked");
                        }
                    }
                }
            }
            tracing::debug!(task = %name, "Poll task stopped");
        });

        tracing::debug!(task = %name, interval_ms = interval.as_millis() as u64, "Poll task started");
        PollHandle {
            name,
            cancel,
            refresh,
            handle: Some(handle),
        }
    }
}

/// Owner of a running [`PollTask`]; dropping it cancels the task
#[derive(Debug)]
pub struct PollHandle {
    name: &'static str,
    cancel: CancellationToken,
    refresh: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Poll now instead of waiting for the next interval
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Token that fires when the task is cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel the task and wait for it to stop
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(task = %self.name, error = %e, "Poll task did not stop cleanly");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Issues monotonically increasing request numbers, starting at 1
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn last_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

/// Highest sequence number applied so far
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LastApplied(u64);

impl LastApplied {
    /// Record `seq`; false when a newer response was already applied
    pub fn advance(&mut self, seq: u64) -> bool {
        if seq <= self.0 {
            return false;
        }
        self.0 = seq;
        true
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}
