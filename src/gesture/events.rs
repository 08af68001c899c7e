//! Intent-event contract between the gesture arbiter and its consumers.
//!
//! The arbiter emits these events in transition order; the presentation layer
//! and the screen router are pure downstream consumers and never write back
//! into arbiter state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// Why the control is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionCause {
    /// Control is closed.
    None,
    /// Opened by a quick tap; stays open until an explicit dismissal.
    Tap,
    /// Opened by a sustained hold; auto-dismisses on an indecisive release.
    Hold,
}

/// Which side of the control is tentatively selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    None,
    Left,
    Right,
}

/// Fixed navigation destinations reachable through the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    Capture,
    NewEntry,
}

impl NavigationTarget {
    /// Destination committed by releasing on the given side.
    ///
    /// Returns `None` for [`Side::None`]: no side, no target.
    pub fn for_side(side: Side) -> Option<Self> {
        match side {
            Side::Left => Some(NavigationTarget::Capture),
            Side::Right => Some(NavigationTarget::NewEntry),
            Side::None => None,
        }
    }
}

/// Events emitted by the arbiter, each delivered at most once per logical transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentEvent {
    /// The option affordances became visible.
    Open { cause: ExpansionCause },
    /// The option affordances were dismissed.
    Close,
    /// The tentatively selected side changed (change-only, never redundant).
    Highlight { side: Side },
    /// A navigation to the named destination should occur. Fire-and-forget.
    Navigate { target: NavigationTarget },
}

/// Destination for the arbiter's emitted events, injected at wiring time.
pub trait IntentSink: Send {
    fn emit(&mut self, event: IntentEvent);
}

/// Production sink: forward events onto the runtime's intent channel.
///
/// Send failures mean the receiving loop is gone and the process is shutting
/// down; events are dropped at that point.
impl IntentSink for UnboundedSender<IntentEvent> {
    fn emit(&mut self, event: IntentEvent) {
        let _ = self.send(event);
    }
}

/// Sink that records every emission in order (useful for tests).
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<IntentEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn events(&self) -> Vec<IntentEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events, leaving the sink empty.
    pub fn take(&self) -> Vec<IntentEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl IntentSink for RecordingSink {
    fn emit(&mut self, event: IntentEvent) {
        self.events.lock().push(event);
    }
}
