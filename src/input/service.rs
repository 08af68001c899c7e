//! High-level input service.
//!
//! Classifies raw pointer events against the control's published hit regions,
//! tracks the press origin, converts terminal columns into logical-pixel
//! displacement, and yields the inputs the runtime feeds to the gesture
//! arbiter, plus host-level actions (quit, tab switch, back) that never
//! touch the arbiter.
//!
//! Protocol discipline lives here: the service never produces a
//! `Move`/`Release`/`Terminate` without a live press, so a well-behaved
//! terminal can only drive the arbiter in contract.

use ratatui::crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

use crate::gesture::Side;
use crate::input::raw::{PointerPhase, RawUiEvent};
use crate::nav::Screen;
use crate::render::FabLayout;

/// Logical pixels per terminal column.
///
/// Terminal cells are coarse; this scale maps column deltas onto the
/// arbiter's pixel thresholds so the defaults (8/20/56 px) behave sensibly:
/// one cell of travel stays a tap, two cells highlight, six commit.
pub const CELL_WIDTH_PX: f32 = 10.0;

/// Inputs destined for the gesture arbiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlInput {
    PressStart,
    Move { dx: f32 },
    Release,
    Terminate,
    SelectOption(Side),
}

/// Host-level actions outside the arbiter's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Quit,
    SelectTab(Screen),
    Back,
    Resize { width: u16, height: u16 },
}

/// Action yielded by the service for one raw event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Control(ControlInput),
    Host(HostAction),
}

/// Where the live press started.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PressOrigin {
    /// On the main button; drags report displacement from this column.
    Fab { origin_column: u16 },
    /// Outside the expanded control: the dismiss path. Runs as a normal
    /// gesture session but never reports movement, so a quick release
    /// resolves to the tap that closes the control.
    Outside,
    /// On a visible option bubble; resolves on release over the same bubble.
    Option { side: Side },
}

/// Service producing arbiter inputs and host actions from raw events.
#[derive(Debug, Default)]
pub struct InputService {
    layout: FabLayout,
    press: Option<PressOrigin>,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the hit regions the renderer published for the current frame.
    pub fn set_layout(&mut self, layout: FabLayout) {
        self.layout = layout;
    }

    /// Map one raw event to at most one action.
    pub fn process_event(&mut self, event: RawUiEvent) -> Option<InputAction> {
        match event {
            RawUiEvent::Pointer { phase, column, row } => self.process_pointer(phase, column, row),
            RawUiEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                Self::key_action(key.code, key.modifiers).map(InputAction::Host)
            }
            RawUiEvent::FocusLost => {
                // A focus loss cancels whatever gesture was in flight.
                match self.press.take() {
                    Some(PressOrigin::Fab { .. }) | Some(PressOrigin::Outside) => {
                        Some(InputAction::Control(ControlInput::Terminate))
                    }
                    _ => None,
                }
            }
            RawUiEvent::Resize { width, height } => {
                Some(InputAction::Host(HostAction::Resize { width, height }))
            }
        }
    }

    fn process_pointer(&mut self, phase: PointerPhase, column: u16, row: u16) -> Option<InputAction> {
        match phase {
            PointerPhase::Down => {
                if self.press.is_some() {
                    // A second down without an up in between; terminals can
                    // produce this across focus churn. Ignore it rather than
                    // driving the arbiter out of contract.
                    return None;
                }
                if self.layout.fab_hit(column, row) {
                    self.press = Some(PressOrigin::Fab {
                        origin_column: column,
                    });
                    return Some(InputAction::Control(ControlInput::PressStart));
                }
                if self.layout.options_active {
                    if let Some(side) = self.layout.option_at(column, row) {
                        self.press = Some(PressOrigin::Option { side });
                        return None;
                    }
                    // Anywhere else while expanded: outside-dismiss press.
                    self.press = Some(PressOrigin::Outside);
                    return Some(InputAction::Control(ControlInput::PressStart));
                }
                None
            }
            PointerPhase::Drag => match self.press {
                Some(PressOrigin::Fab { origin_column }) => {
                    let dx = (f32::from(column) - f32::from(origin_column)) * CELL_WIDTH_PX;
                    Some(InputAction::Control(ControlInput::Move { dx }))
                }
                _ => None,
            },
            PointerPhase::Up => match self.press.take() {
                Some(PressOrigin::Fab { .. }) | Some(PressOrigin::Outside) => {
                    Some(InputAction::Control(ControlInput::Release))
                }
                Some(PressOrigin::Option { side }) => {
                    // Commit only when the release lands on the same bubble.
                    if self.layout.options_active && self.layout.option_at(column, row) == Some(side)
                    {
                        Some(InputAction::Control(ControlInput::SelectOption(side)))
                    } else {
                        None
                    }
                }
                None => None,
            },
        }
    }

    fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<HostAction> {
        match (code, modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(HostAction::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(HostAction::Quit),
            (KeyCode::Char('1'), KeyModifiers::NONE) => Some(HostAction::SelectTab(Screen::Today)),
            (KeyCode::Char('2'), KeyModifiers::NONE) => {
                Some(HostAction::SelectTab(Screen::Timeline))
            }
            (KeyCode::Esc, _) => Some(HostAction::Back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;
    use ratatui::layout::Rect;

    fn layout(options_active: bool) -> FabLayout {
        FabLayout {
            fab: Rect::new(40, 20, 7, 3),
            left_option: Rect::new(24, 20, 11, 3),
            right_option: Rect::new(52, 20, 13, 3),
            options_active,
        }
    }

    fn pointer(phase: PointerPhase, column: u16, row: u16) -> RawUiEvent {
        RawUiEvent::Pointer { phase, column, row }
    }

    fn service(options_active: bool) -> InputService {
        let mut service = InputService::new();
        service.set_layout(layout(options_active));
        service
    }

    #[test]
    fn fab_press_drag_release_maps_to_gesture_inputs() {
        let mut service = service(false);

        assert_eq!(
            service.process_event(pointer(PointerPhase::Down, 43, 21)),
            Some(InputAction::Control(ControlInput::PressStart))
        );
        assert_eq!(
            service.process_event(pointer(PointerPhase::Drag, 49, 21)),
            Some(InputAction::Control(ControlInput::Move { dx: 60.0 }))
        );
        assert_eq!(
            service.process_event(pointer(PointerPhase::Drag, 40, 21)),
            Some(InputAction::Control(ControlInput::Move { dx: -30.0 }))
        );
        assert_eq!(
            service.process_event(pointer(PointerPhase::Up, 40, 21)),
            Some(InputAction::Control(ControlInput::Release))
        );
    }

    #[test]
    fn presses_off_the_collapsed_control_are_ignored() {
        let mut service = service(false);

        assert_eq!(service.process_event(pointer(PointerPhase::Down, 5, 5)), None);
        assert_eq!(service.process_event(pointer(PointerPhase::Drag, 6, 5)), None);
        assert_eq!(service.process_event(pointer(PointerPhase::Up, 6, 5)), None);
    }

    #[test]
    fn no_release_without_a_live_press() {
        let mut service = service(false);
        assert_eq!(service.process_event(pointer(PointerPhase::Up, 43, 21)), None);
        assert_eq!(
            service.process_event(pointer(PointerPhase::Drag, 43, 21)),
            None
        );
    }

    #[test]
    fn outside_press_while_expanded_runs_the_dismiss_path() {
        let mut service = service(true);

        assert_eq!(
            service.process_event(pointer(PointerPhase::Down, 5, 5)),
            Some(InputAction::Control(ControlInput::PressStart))
        );
        // Outside presses never report movement.
        assert_eq!(service.process_event(pointer(PointerPhase::Drag, 9, 5)), None);
        assert_eq!(
            service.process_event(pointer(PointerPhase::Up, 9, 5)),
            Some(InputAction::Control(ControlInput::Release))
        );
    }

    #[test]
    fn option_tap_resolves_on_release_over_the_same_bubble() {
        let mut service = service(true);

        assert_eq!(
            service.process_event(pointer(PointerPhase::Down, 26, 21)),
            None
        );
        assert_eq!(
            service.process_event(pointer(PointerPhase::Up, 27, 21)),
            Some(InputAction::Control(ControlInput::SelectOption(Side::Left)))
        );

        // Sliding off the bubble abandons the selection.
        assert_eq!(
            service.process_event(pointer(PointerPhase::Down, 55, 21)),
            None
        );
        assert_eq!(service.process_event(pointer(PointerPhase::Up, 5, 5)), None);
    }

    #[test]
    fn focus_loss_terminates_only_live_gesture_presses() {
        let mut service = service(false);
        assert_eq!(service.process_event(RawUiEvent::FocusLost), None);

        service.process_event(pointer(PointerPhase::Down, 43, 21));
        assert_eq!(
            service.process_event(RawUiEvent::FocusLost),
            Some(InputAction::Control(ControlInput::Terminate))
        );
        // The press is gone; a later up is not a release.
        assert_eq!(service.process_event(pointer(PointerPhase::Up, 43, 21)), None);
    }

    #[test]
    fn duplicate_down_is_ignored() {
        let mut service = service(false);
        service.process_event(pointer(PointerPhase::Down, 43, 21));
        assert_eq!(
            service.process_event(pointer(PointerPhase::Down, 44, 21)),
            None
        );
    }

    #[test]
    fn keys_map_to_host_actions() {
        let mut service = service(false);

        let press = |code, modifiers| RawUiEvent::Key(KeyEvent::new(code, modifiers));
        assert_eq!(
            service.process_event(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(InputAction::Host(HostAction::Quit))
        );
        assert_eq!(
            service.process_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Host(HostAction::Quit))
        );
        assert_eq!(
            service.process_event(press(KeyCode::Char('1'), KeyModifiers::NONE)),
            Some(InputAction::Host(HostAction::SelectTab(Screen::Today)))
        );
        assert_eq!(
            service.process_event(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(InputAction::Host(HostAction::Back))
        );
        assert_eq!(
            service.process_event(press(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }
}
