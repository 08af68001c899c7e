//! # rfab - Hold-or-Tap Floating Action Control
//!
//! A floating action button that resolves three user intents (tap,
//! press-and-hold-then-release, press-and-hold-then-drag-to-a-side) from one
//! continuous pointer gesture and maps them deterministically onto two
//! navigation destinations. The crate ships the arbitration core plus a
//! terminal host application that demos it end to end.
//!
//! ## Architecture
//!
//! The library is organized into focused modules following modern Rust patterns:
//!
//! - [`error`] - Centralized error types and handling
//! - [`gesture`] - The gesture arbiter, its clock/scheduler seams, and the
//!   intent-event contract
//! - [`input`] - Terminal input collection and the mapping onto the arbiter's
//!   inbound interface
//! - [`render`] - Presentation controller (event-driven animation) and the
//!   ratatui renderer
//! - [`nav`] - Screen routing; consumes `navigate` fire-and-forget
//! - [`app`] - Application core and component coordination
//! - [`config`] - TOML overrides for thresholds and timings
//!
//! Control flow is strictly one-directional: raw input → arbiter → intent
//! events → presentation/navigation. The arbiter is the sole owner of
//! disambiguation state.

// Core modules
pub mod error;
pub mod gesture;

// Host subsystems
pub mod config;
pub mod input;
pub mod nav;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{Result, RfabError};

// Public API surface for external usage
pub use app::Application;
pub use gesture::{ArbiterConfig, GestureArbiter, IntentEvent, NavigationTarget, Side};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
