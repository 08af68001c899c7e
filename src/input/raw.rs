//! Low-level input collection: crossterm polling and translation into the
//! primitive pointer/key events the input service consumes.

use std::collections::VecDeque;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::error::Result;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Phase of a left-button pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Drag,
    Up,
}

/// Low-level events surfaced by the raw input collector.
///
/// Only the left pointer button participates in the gesture; other buttons
/// and hover movement are dropped at this layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawUiEvent {
    Pointer {
        phase: PointerPhase,
        column: u16,
        row: u16,
    },
    Key(KeyEvent),
    /// The terminal lost focus; any in-flight gesture is system-cancelled.
    FocusLost,
    Resize {
        width: u16,
        height: u16,
    },
}

/// Collector that polls crossterm and queues translated events.
#[derive(Debug, Default)]
pub struct RawInputCollector {
    pending_events: VecDeque<RawUiEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawUiEvent>> {
        if let Some(queued) = self.pop_pending() {
            return Ok(Some(queued));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pop_pending())
    }

    /// Pop the next pending raw event.
    pub fn pop_pending(&mut self) -> Option<RawUiEvent> {
        self.pending_events.pop_front()
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.pending_events.push_back(RawUiEvent::Key(key_event));
            }
            Event::Mouse(mouse_event) => {
                if let Some(pointer) = Self::translate_mouse(mouse_event) {
                    self.pending_events.push_back(pointer);
                }
            }
            Event::FocusLost => {
                self.pending_events.push_back(RawUiEvent::FocusLost);
            }
            Event::Resize(width, height) => {
                self.pending_events
                    .push_back(RawUiEvent::Resize { width, height });
            }
            _ => {}
        }
    }

    fn translate_mouse(mouse_event: MouseEvent) -> Option<RawUiEvent> {
        let phase = match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Drag,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return None,
        };
        Some(RawUiEvent::Pointer {
            phase,
            column: mouse_event.column,
            row: mouse_event.row,
        })
    }
}
