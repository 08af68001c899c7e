//! The gesture arbitration state machine.
//!
//! One continuous pointer gesture on the control must resolve to one of three
//! intents: a quick tap toggles the option affordances, a sustained hold opens
//! them for drag-to-select, and a hold-drag past the selection threshold
//! commits to a side's destination. The arbiter consumes the inbound pointer
//! interface plus a hold timer and emits [`IntentEvent`]s; it is the sole
//! owner of disambiguation state.
//!
//! Timing and displacement rules:
//!
//! - a press sustained past the hold delay *arms* the session (one-way latch);
//! - an armed release at or past the selection threshold navigates;
//! - an armed release inside the threshold closes a hold-opened control but
//!   leaves a tap-opened one alone;
//! - an unarmed release within the tap window and tap displacement toggles;
//! - highlights follow a ±hysteresis band and are emitted change-only.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::{Result, RfabError};
use crate::gesture::clock::{Clock, HoldScheduler};
use crate::gesture::events::{ExpansionCause, IntentEvent, IntentSink, NavigationTarget, Side};

/// Milliseconds a press must be sustained before drag selection arms.
const DEFAULT_HOLD_DELAY_MS: u64 = 220;
/// Maximum press duration still treated as a tap.
const DEFAULT_TAP_MAX_DURATION_MS: u64 = 220;
/// Maximum absolute displacement in logical pixels still treated as a tap.
const DEFAULT_TAP_MAX_DISPLACEMENT_PX: f32 = 8.0;
/// Displacement band beyond which a side is tentatively highlighted.
const DEFAULT_ARM_HIGHLIGHT_THRESHOLD_PX: f32 = 20.0;
/// Displacement required at release to commit to a side's destination.
const DEFAULT_SELECT_THRESHOLD_PX: f32 = 56.0;

/// Identifier attached to hold timers so late callbacks from a destroyed
/// session can be recognized and dropped.
pub type SessionId = u64;

/// Tunable timing and displacement thresholds.
///
/// Defaults match the shipped control; overrides come from the configuration
/// file. All displacements are in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbiterConfig {
    pub hold_delay: Duration,
    pub tap_max_duration: Duration,
    pub tap_max_displacement_px: f32,
    pub highlight_threshold_px: f32,
    pub select_threshold_px: f32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            hold_delay: Duration::from_millis(DEFAULT_HOLD_DELAY_MS),
            tap_max_duration: Duration::from_millis(DEFAULT_TAP_MAX_DURATION_MS),
            tap_max_displacement_px: DEFAULT_TAP_MAX_DISPLACEMENT_PX,
            highlight_threshold_px: DEFAULT_ARM_HIGHLIGHT_THRESHOLD_PX,
            select_threshold_px: DEFAULT_SELECT_THRESHOLD_PX,
        }
    }
}

/// Process-wide control state, persisting across gesture sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// Whether the option affordances are currently visible.
    pub expanded: bool,
    /// Which side is tentatively selected. `Side::None` unless expanded.
    pub active_side: Side,
    /// Why the control is open; `None` when closed. Persists across sessions
    /// because a tap-opened control outlives the gesture that opened it.
    pub expansion_cause: ExpansionCause,
}

impl ControlState {
    fn closed() -> Self {
        Self {
            expanded: false,
            active_side: Side::None,
            expansion_cause: ExpansionCause::None,
        }
    }
}

/// Ephemeral per-press bookkeeping; created on press start and destroyed on
/// release or termination.
#[derive(Debug, Clone, Copy)]
struct GestureSession {
    id: SessionId,
    started_at: Instant,
    displacement_x: f32,
    /// One-way latch: set when the hold timer fires, reset only by destroying
    /// the session.
    armed: bool,
}

/// The arbiter. Single-threaded; every operation runs to completion.
///
/// Clock, hold scheduler and event sink are injected at wiring time so the
/// machine is deterministic under test.
pub struct GestureArbiter {
    config: ArbiterConfig,
    clock: Arc<dyn Clock>,
    scheduler: Box<dyn HoldScheduler>,
    sink: Box<dyn IntentSink>,
    control: ControlState,
    session: Option<GestureSession>,
    next_session_id: SessionId,
}

impl GestureArbiter {
    pub fn new(
        config: ArbiterConfig,
        clock: Arc<dyn Clock>,
        scheduler: Box<dyn HoldScheduler>,
        sink: Box<dyn IntentSink>,
    ) -> Self {
        Self {
            config,
            clock,
            scheduler,
            sink,
            control: ControlState::closed(),
            session: None,
            next_session_id: 0,
        }
    }

    /// Snapshot of the persistent control state.
    pub fn control(&self) -> ControlState {
        self.control
    }

    /// A pointer went down on the control.
    ///
    /// Starts a fresh session and arms the hold timer. No intent event is
    /// emitted yet; a press means nothing until time or displacement
    /// disambiguates it.
    pub fn on_press_start(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(RfabError::protocol(
                "on_press_start",
                "press already in progress",
            ));
        }

        let id = self.next_session_id;
        self.next_session_id += 1;
        self.session = Some(GestureSession {
            id,
            started_at: self.clock.now(),
            displacement_x: 0.0,
            armed: false,
        });
        // Implicitly replaces any timer a prior session might have left.
        self.scheduler.schedule(id, self.config.hold_delay);
        Ok(())
    }

    /// The hold timer elapsed for `session`.
    ///
    /// Late firings for a destroyed or superseded session are an expected
    /// race, not an error; they are dropped here.
    pub fn on_timer_fire(&mut self, session: SessionId) {
        let live = match self.session.as_mut() {
            Some(live) if live.id == session => live,
            _ => {
                debug!("dropping stale hold timer for session {session}");
                return;
            }
        };

        live.armed = true;
        if !self.control.expanded {
            self.control.expanded = true;
            self.control.expansion_cause = ExpansionCause::Hold;
            self.sink.emit(IntentEvent::Open {
                cause: ExpansionCause::Hold,
            });
        }
        // Already expanded (opened by a prior tap): the cause stays untouched,
        // which decides what an indecisive release does later.
    }

    /// The pointer moved to a signed horizontal offset from the press origin.
    pub fn on_move(&mut self, dx: f32) -> Result<()> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| RfabError::protocol("on_move", "no press in progress"))?;
        session.displacement_x = dx;

        if session.armed || self.control.expanded {
            let side = if dx <= -self.config.highlight_threshold_px {
                Side::Left
            } else if dx >= self.config.highlight_threshold_px {
                Side::Right
            } else {
                Side::None
            };
            if side != self.control.active_side {
                self.control.active_side = side;
                self.sink.emit(IntentEvent::Highlight { side });
            }
        }
        Ok(())
    }

    /// The pointer was released; resolve the gesture.
    pub fn on_release(&mut self) -> Result<()> {
        let session = self
            .session
            .take()
            .ok_or_else(|| RfabError::protocol("on_release", "no press in progress"))?;
        self.scheduler.cancel();

        let dx = session.displacement_x;
        if session.armed {
            // Threshold first, regardless of elapsed time: a hold released
            // past threshold always wins over tap semantics.
            if dx <= -self.config.select_threshold_px {
                self.close();
                self.navigate(NavigationTarget::Capture);
            } else if dx >= self.config.select_threshold_px {
                self.close();
                self.navigate(NavigationTarget::NewEntry);
            } else {
                match self.control.expansion_cause {
                    // Hold-opened auto-dismisses on an indecisive release.
                    ExpansionCause::Hold => self.close(),
                    // Tap-opened stays open awaiting a discrete option tap.
                    ExpansionCause::Tap | ExpansionCause::None => {}
                }
            }
            return Ok(());
        }

        let dt = self.clock.now() - session.started_at;
        let moved = dx.abs() > self.config.tap_max_displacement_px;
        if !moved && dt < self.config.tap_max_duration {
            if self.control.expanded {
                self.close();
            } else {
                self.control.expanded = true;
                self.control.expansion_cause = ExpansionCause::Tap;
                self.sink.emit(IntentEvent::Open {
                    cause: ExpansionCause::Tap,
                });
            }
        }
        Ok(())
    }

    /// The system cancelled the gesture (e.g. a competing gesture won).
    ///
    /// A hold-opened control must not be left dangling by an aborted gesture;
    /// a tap-opened one survives termination.
    pub fn on_terminate(&mut self) -> Result<()> {
        if self.session.take().is_none() {
            return Err(RfabError::protocol("on_terminate", "no press in progress"));
        }
        self.scheduler.cancel();

        if self.control.expansion_cause == ExpansionCause::Hold {
            self.close();
        }
        Ok(())
    }

    /// Discrete selection of a visible option, irrespective of any drag path.
    ///
    /// Covers the tap-to-open-then-tap-an-option flow: always closes, then
    /// navigates to the side's destination.
    pub fn on_option_selected(&mut self, side: Side) -> Result<()> {
        let target = NavigationTarget::for_side(side)
            .ok_or_else(|| RfabError::protocol("on_option_selected", "side must be left or right"))?;
        self.close();
        self.navigate(target);
        Ok(())
    }

    /// Collapse the control. Resets the active side internally without a
    /// highlight emission; `close` is the collapse-everything signal.
    fn close(&mut self) {
        self.control = ControlState::closed();
        self.sink.emit(IntentEvent::Close);
    }

    fn navigate(&mut self, target: NavigationTarget) {
        self.sink.emit(IntentEvent::Navigate { target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::clock::{ManualClock, ManualScheduler};
    use crate::gesture::events::RecordingSink;

    struct Harness {
        arbiter: GestureArbiter,
        clock: ManualClock,
        scheduler: ManualScheduler,
        sink: RecordingSink,
    }

    fn harness() -> Harness {
        let clock = ManualClock::new();
        let scheduler = ManualScheduler::new();
        let sink = RecordingSink::new();
        let arbiter = GestureArbiter::new(
            ArbiterConfig::default(),
            Arc::new(clock.clone()),
            Box::new(scheduler.clone()),
            Box::new(sink.clone()),
        );
        Harness {
            arbiter,
            clock,
            scheduler,
            sink,
        }
    }

    impl Harness {
        /// Stand in for the scheduler: fire the armed hold timer.
        fn fire_hold(&mut self) {
            let (id, _) = self.scheduler.take_pending().expect("no hold timer armed");
            self.arbiter.on_timer_fire(id);
        }

        fn advance_ms(&self, ms: u64) {
            self.clock.advance(Duration::from_millis(ms));
        }
    }

    fn open(cause: ExpansionCause) -> IntentEvent {
        IntentEvent::Open { cause }
    }

    fn highlight(side: Side) -> IntentEvent {
        IntentEvent::Highlight { side }
    }

    fn navigate(target: NavigationTarget) -> IntentEvent {
        IntentEvent::Navigate { target }
    }

    #[test]
    fn quick_tap_opens_then_second_tap_closes() {
        let mut h = harness();

        // Scenario B: 50ms press with 2px of jitter is a tap.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(50);
        h.arbiter.on_move(2.0).unwrap();
        h.arbiter.on_release().unwrap();
        assert_eq!(h.sink.take(), vec![open(ExpansionCause::Tap)]);
        assert!(h.arbiter.control().expanded);
        assert_eq!(h.arbiter.control().expansion_cause, ExpansionCause::Tap);

        // Scenario C: same gesture on the open control toggles it closed.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(50);
        h.arbiter.on_move(2.0).unwrap();
        h.arbiter.on_release().unwrap();
        assert_eq!(h.sink.take(), vec![IntentEvent::Close]);
        assert_eq!(h.arbiter.control(), ControlState::closed());
    }

    #[test]
    fn slow_or_travelled_press_is_not_a_tap() {
        let mut h = harness();

        // Too slow: released after the tap window without ever arming.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.arbiter.on_release().unwrap();
        assert!(h.sink.take().is_empty());

        // Too far: 12px of travel within the window.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(50);
        h.arbiter.on_move(12.0).unwrap();
        h.arbiter.on_release().unwrap();
        assert!(h.sink.take().is_empty());
        assert!(!h.arbiter.control().expanded);
    }

    #[test]
    fn hold_drag_right_selects_new_entry() {
        let mut h = harness();

        // Scenario A.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.arbiter.on_move(70.0).unwrap();
        h.arbiter.on_release().unwrap();

        assert_eq!(
            h.sink.take(),
            vec![
                open(ExpansionCause::Hold),
                highlight(Side::Right),
                IntentEvent::Close,
                navigate(NavigationTarget::NewEntry),
            ]
        );
        assert_eq!(h.arbiter.control(), ControlState::closed());
    }

    #[test]
    fn hold_drag_left_selects_capture() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.arbiter.on_move(-70.0).unwrap();
        h.arbiter.on_release().unwrap();

        assert_eq!(
            h.sink.take(),
            vec![
                open(ExpansionCause::Hold),
                highlight(Side::Left),
                IntentEvent::Close,
                navigate(NavigationTarget::Capture),
            ]
        );
    }

    #[test]
    fn indecisive_hold_release_closes_without_navigating() {
        let mut h = harness();

        // Scenario D: past the highlight band, short of the selection threshold.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.arbiter.on_move(-30.0).unwrap();
        h.arbiter.on_release().unwrap();

        assert_eq!(
            h.sink.take(),
            vec![
                open(ExpansionCause::Hold),
                highlight(Side::Left),
                IntentEvent::Close,
            ]
        );
    }

    #[test]
    fn armed_release_checks_threshold_before_tap_semantics() {
        let mut h = harness();

        // Fire the hold immediately: even with dt far inside the tap window,
        // an armed release past threshold navigates.
        h.arbiter.on_press_start().unwrap();
        h.fire_hold();
        h.arbiter.on_move(60.0).unwrap();
        h.advance_ms(10);
        h.arbiter.on_release().unwrap();

        let events = h.sink.take();
        assert!(events.contains(&navigate(NavigationTarget::NewEntry)));
    }

    #[test]
    fn tap_opened_control_survives_indecisive_hold_release() {
        let mut h = harness();

        // Open by tap.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();
        assert_eq!(h.sink.take(), vec![open(ExpansionCause::Tap)]);

        // New hold-drag on the open control, released short of threshold:
        // the tap-opened control stays open, nothing is emitted on release.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.arbiter.on_move(30.0).unwrap();
        h.arbiter.on_release().unwrap();

        assert_eq!(h.sink.take(), vec![highlight(Side::Right)]);
        assert!(h.arbiter.control().expanded);
        assert_eq!(h.arbiter.control().expansion_cause, ExpansionCause::Tap);

        // A decisive drag on the same open control still navigates.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.arbiter.on_move(-70.0).unwrap();
        h.arbiter.on_release().unwrap();
        assert_eq!(
            h.sink.take(),
            vec![
                highlight(Side::Left),
                IntentEvent::Close,
                navigate(NavigationTarget::Capture),
            ]
        );
    }

    #[test]
    fn highlight_is_emitted_only_on_transitions() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.sink.take();

        for dx in [25.0, 30.0, 55.0] {
            h.arbiter.on_move(dx).unwrap();
        }
        assert_eq!(h.sink.take(), vec![highlight(Side::Right)]);

        for dx in [10.0, 5.0] {
            h.arbiter.on_move(dx).unwrap();
        }
        assert_eq!(h.sink.take(), vec![highlight(Side::None)]);

        for dx in [-25.0, -40.0] {
            h.arbiter.on_move(dx).unwrap();
        }
        assert_eq!(h.sink.take(), vec![highlight(Side::Left)]);
    }

    #[test]
    fn no_highlight_before_arming_on_a_closed_control() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        h.arbiter.on_move(30.0).unwrap();
        assert!(h.sink.take().is_empty());
        assert_eq!(h.arbiter.control().active_side, Side::None);
    }

    #[test]
    fn terminate_closes_hold_opened_control_only() {
        let mut h = harness();

        // Hold-opened control must not dangle after a cancelled gesture.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(300);
        h.fire_hold();
        h.sink.take();
        h.arbiter.on_terminate().unwrap();
        assert_eq!(h.sink.take(), vec![IntentEvent::Close]);
        assert!(h.scheduler.pending().is_none());

        // Tap-opened control survives termination of a later gesture.
        h.arbiter.on_press_start().unwrap();
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();
        h.sink.take();

        h.arbiter.on_press_start().unwrap();
        h.arbiter.on_terminate().unwrap();
        assert!(h.sink.take().is_empty());
        assert!(h.arbiter.control().expanded);
    }

    #[test]
    fn stale_timer_after_release_is_ignored() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        let (stale_id, _) = h.scheduler.pending().unwrap();
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();
        h.sink.take();

        // Late callback for the destroyed session: silently dropped.
        h.arbiter.on_timer_fire(stale_id);
        assert!(h.sink.take().is_empty());
        assert_eq!(h.arbiter.control().expansion_cause, ExpansionCause::Tap);
    }

    #[test]
    fn new_press_invalidates_prior_sessions_timer() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        let (old_id, _) = h.scheduler.pending().unwrap();
        h.advance_ms(40);
        h.arbiter.on_release().unwrap(); // opens by tap
        h.sink.take();

        h.arbiter.on_press_start().unwrap();
        h.arbiter.on_timer_fire(old_id); // must not arm the new session
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();

        // Unarmed quick release on an expanded control: a tap that closes.
        assert_eq!(h.sink.take(), vec![IntentEvent::Close]);
    }

    #[test]
    fn option_selection_closes_then_navigates() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();
        h.sink.take();

        h.arbiter.on_option_selected(Side::Left).unwrap();
        assert_eq!(
            h.sink.take(),
            vec![IntentEvent::Close, navigate(NavigationTarget::Capture)]
        );
        assert_eq!(h.arbiter.control(), ControlState::closed());

        assert!(h.arbiter.on_option_selected(Side::None).is_err());
    }

    #[test]
    fn protocol_misuse_is_rejected_without_corrupting_state() {
        let mut h = harness();

        assert!(h.arbiter.on_move(5.0).is_err());
        assert!(h.arbiter.on_release().is_err());
        assert!(h.arbiter.on_terminate().is_err());
        assert!(h.sink.take().is_empty());

        h.arbiter.on_press_start().unwrap();
        let err = h.arbiter.on_press_start().unwrap_err();
        assert!(matches!(err, RfabError::Protocol { call, .. } if call == "on_press_start"));

        // The live session is untouched by the rejected call.
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();
        assert_eq!(h.sink.take(), vec![open(ExpansionCause::Tap)]);
    }

    #[test]
    fn release_cancels_a_pending_hold_timer() {
        let mut h = harness();

        h.arbiter.on_press_start().unwrap();
        assert!(h.scheduler.pending().is_some());
        h.advance_ms(40);
        h.arbiter.on_release().unwrap();
        assert!(h.scheduler.pending().is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Highlight events are change-only for arbitrary move sequences,
            /// and the active side never points anywhere while collapsed.
            #[test]
            fn highlights_never_repeat(moves in proptest::collection::vec(-120.0f32..120.0, 1..40)) {
                let mut h = harness();
                h.arbiter.on_press_start().unwrap();
                h.advance_ms(300);
                h.fire_hold();
                h.sink.take();

                for dx in moves {
                    h.arbiter.on_move(dx).unwrap();
                    let control = h.arbiter.control();
                    prop_assert!(control.expanded || control.active_side == Side::None);
                }

                let emitted = h.sink.take();
                let mut last = Side::None;
                for event in emitted {
                    match event {
                        IntentEvent::Highlight { side } => {
                            prop_assert_ne!(side, last);
                            last = side;
                        }
                        other => prop_assert!(false, "unexpected event {:?}", other),
                    }
                }
            }

            /// Any quick press within the tap displacement toggles exactly once
            /// and never navigates.
            #[test]
            fn quick_small_press_toggles_once(
                dx in -8.0f32..8.0,
                dt_ms in 0u64..220,
            ) {
                let mut h = harness();
                h.arbiter.on_press_start().unwrap();
                h.advance_ms(dt_ms);
                h.arbiter.on_move(dx).unwrap();
                h.arbiter.on_release().unwrap();

                let events = h.sink.take();
                prop_assert_eq!(events, vec![open(ExpansionCause::Tap)]);

                h.arbiter.on_press_start().unwrap();
                h.advance_ms(dt_ms);
                h.arbiter.on_move(dx).unwrap();
                h.arbiter.on_release().unwrap();

                let events = h.sink.take();
                prop_assert_eq!(events, vec![IntentEvent::Close]);
            }
        }
    }
}
