//! Input subsystem.
//!
//! [`raw`] turns crossterm events into primitive UI events on a blocking poll
//! thread; [`service`] classifies those against the control's hit regions and
//! drives the gesture arbiter's inbound interface.

pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use raw::{PointerPhase, RawInputCollector, RawUiEvent};
pub use service::{ControlInput, HostAction, InputAction, InputService, CELL_WIDTH_PX};
