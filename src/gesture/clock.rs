//! Time sources and hold-timer scheduling.
//!
//! The arbiter never talks to the OS clock or spawns timers directly; both
//! concerns are injected so every transition is deterministic under test.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::gesture::arbiter::SessionId;

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock advanced explicitly by the caller (useful for tests).
///
/// Clones share the same offset, so a test can keep a handle while the
/// arbiter owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}

/// Scheduler for the single outstanding hold timer.
///
/// At most one timer is live at any time: scheduling implicitly replaces a
/// prior one, and `cancel` must leave no dangling timer behind. A timer that
/// fires late anyway carries its session id, and the arbiter drops stale ids.
pub trait HoldScheduler: Send {
    fn schedule(&mut self, session: SessionId, delay: Duration);
    fn cancel(&mut self);
}

/// Production scheduler: a tokio sleep task that posts the session id back to
/// the runtime channel, aborted on cancel or replacement.
pub struct TokioHoldScheduler {
    tx: UnboundedSender<SessionId>,
    pending: Option<JoinHandle<()>>,
}

impl TokioHoldScheduler {
    /// Must be constructed inside a tokio runtime; `schedule` spawns onto it.
    pub fn new(tx: UnboundedSender<SessionId>) -> Self {
        Self { tx, pending: None }
    }
}

impl HoldScheduler for TokioHoldScheduler {
    fn schedule(&mut self, session: SessionId, delay: Duration) {
        self.cancel();
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the runtime loop already exited.
            let _ = tx.send(session);
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioHoldScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler that records the pending deadline instead of arming a real
/// timer, so tests fire it by hand (useful for tests).
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Arc<Mutex<Option<(SessionId, Duration)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently armed timer, if any.
    pub fn pending(&self) -> Option<(SessionId, Duration)> {
        *self.pending.lock()
    }

    /// Clear and return the armed timer, as a test stands in for its firing.
    pub fn take_pending(&self) -> Option<(SessionId, Duration)> {
        self.pending.lock().take()
    }
}

impl HoldScheduler for ManualScheduler {
    fn schedule(&mut self, session: SessionId, delay: Duration) {
        *self.pending.lock() = Some((session, delay));
    }

    fn cancel(&mut self) {
        *self.pending.lock() = None;
    }
}
