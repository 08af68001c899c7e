//! Terminal UI components: layout/hit regions, theme, and the renderer.

pub mod layout;
pub mod renderer;
pub mod theme;

pub use layout::FabLayout;
pub use renderer::TerminalUi;
pub use theme::ColorTheme;
