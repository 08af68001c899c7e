//! Presentation state derived from intent events.
//!
//! The controller treats `open`/`close` as the sole authority on expansion
//! visibility and never reads pointer displacement. The continuous expansion
//! progress (0 closed → 1 open) is its own derived state: an eased animation
//! retargeted from the current value, so an open interrupted mid-collapse
//! picks up where the collapse left off instead of snapping.

use std::time::{Duration, Instant};

use crate::gesture::{IntentEvent, Side};

/// Expansion animation durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    /// Ease-out toward fully open.
    pub open: Duration,
    /// Ease-in toward fully closed.
    pub close: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            open: Duration::from_millis(160),
            close: Duration::from_millis(140),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_quad(t: f32) -> f32 {
    t * t
}

/// Derives visual state from intent events; pure consumer.
#[derive(Debug)]
pub struct PresentationController {
    timings: AnimationTimings,
    expanded: bool,
    active_side: Side,
    progress: f32,
    animation: Option<Animation>,
}

impl PresentationController {
    pub fn new(timings: AnimationTimings) -> Self {
        Self {
            timings,
            expanded: false,
            active_side: Side::None,
            progress: 0.0,
            animation: None,
        }
    }

    /// Whether the option affordances are logically visible.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Which option is tentatively selected.
    pub fn active_side(&self) -> Side {
        self.active_side
    }

    /// Expansion progress as of the last `tick`/event, 0..=1.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether an animation is still running (the runtime keeps ticking
    /// while this is true).
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Apply one intent event.
    pub fn handle_event(&mut self, event: IntentEvent, now: Instant) {
        match event {
            IntentEvent::Open { .. } => {
                self.expanded = true;
                self.retarget(1.0, self.timings.open, now);
            }
            IntentEvent::Close => {
                self.expanded = false;
                self.active_side = Side::None;
                self.retarget(0.0, self.timings.close, now);
            }
            IntentEvent::Highlight { side } => {
                self.active_side = side;
            }
            // Navigation is the router's concern.
            IntentEvent::Navigate { .. } => {}
        }
    }

    /// Advance the animation to `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(animation) = self.animation else {
            return;
        };

        let elapsed = now.saturating_duration_since(animation.started);
        if elapsed >= animation.duration || animation.duration.is_zero() {
            self.progress = animation.to;
            self.animation = None;
            return;
        }

        let t = elapsed.as_secs_f32() / animation.duration.as_secs_f32();
        let eased = if animation.to > animation.from {
            ease_out_quad(t)
        } else {
            ease_in_quad(t)
        };
        self.progress = animation.from + (animation.to - animation.from) * eased;
    }

    fn retarget(&mut self, to: f32, duration: Duration, now: Instant) {
        if (self.progress - to).abs() < f32::EPSILON {
            self.animation = None;
            return;
        }
        self.animation = Some(Animation {
            from: self.progress,
            to,
            started: now,
            duration,
        });
    }
}

impl Default for PresentationController {
    fn default() -> Self {
        Self::new(AnimationTimings::default())
    }
}
