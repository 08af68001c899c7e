//! Rendering subsystem.
//!
//! [`presenter`] derives continuous visual state (expansion progress,
//! highlight) from the arbiter's intent events; [`ui`] draws it with ratatui.
//! Neither contains gesture decision logic.

pub mod presenter;
pub mod ui;

pub use presenter::{AnimationTimings, PresentationController};
pub use ui::{ColorTheme, FabLayout, TerminalUi};
