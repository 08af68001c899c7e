//! Gesture arbitration subsystem.
//!
//! Owns the disambiguation of tap / hold-release / hold-drag gestures on the
//! floating action control. The arbiter in [`arbiter`] is the sole owner of
//! gesture state; everything downstream consumes the intent events defined in
//! [`events`].

pub mod arbiter;
pub mod clock;
pub mod events;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::gesture` rather than reaching into submodules.
pub use arbiter::{ArbiterConfig, ControlState, GestureArbiter, SessionId};
pub use clock::{Clock, HoldScheduler, ManualClock, ManualScheduler, SystemClock, TokioHoldScheduler};
pub use events::{ExpansionCause, IntentEvent, IntentSink, NavigationTarget, RecordingSink, Side};
