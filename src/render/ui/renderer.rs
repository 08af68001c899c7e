//! Terminal renderer using ratatui.
//!
//! Draws the active screen, the tab bar, and the control (FAB plus option
//! bubbles) purely from presentation and router state, and publishes the
//! control's hit regions for the input service. Rendering holds no gesture
//! state of its own.

use std::io::{self, Stdout};

use ratatui::crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::error::Result;
use crate::gesture::Side;
use crate::nav::{Screen, ScreenRouter};
use crate::render::presenter::PresentationController;
use crate::render::ui::layout::FabLayout;
use crate::render::ui::theme::ColorTheme;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Width of the main button in cells, borders included.
const FAB_WIDTH: u16 = 7;
/// Height of the control dock row.
const DOCK_HEIGHT: u16 = 3;
/// How far option bubbles slide out at full expansion, in cells.
const OPTION_SLIDE_CELLS: f32 = 4.0;
/// Progress below which options are not drawn at all.
const OPTION_VISIBILITY_FLOOR: f32 = 0.05;

const LEFT_OPTION_LABEL: &str = "Capture";
const RIGHT_OPTION_LABEL: &str = "New Entry";

/// Terminal UI with a ratatui/crossterm backend.
///
/// Owns terminal lifecycle: raw mode, alternate screen, mouse capture, and
/// focus-change reporting (focus loss is how gesture termination reaches us).
pub struct TerminalUi {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUi {
    pub fn new(theme: ColorTheme) -> Self {
        Self {
            terminal: None,
            theme,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;

        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        Ok(())
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(
                io::stdout(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                DisableFocusChange
            )?;
            self.terminal = None;
        }
        Ok(())
    }

    /// Draw one frame and return the control's hit regions.
    pub fn draw(
        &mut self,
        presenter: &PresentationController,
        router: &ScreenRouter,
    ) -> Result<FabLayout> {
        let mut layout = FabLayout::default();
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal.draw(|frame| {
                layout = Self::draw_frame(frame, presenter, router, theme);
            })?;
        }
        Ok(layout)
    }

    fn draw_frame(
        frame: &mut Frame,
        presenter: &PresentationController,
        router: &ScreenRouter,
        theme: &ColorTheme,
    ) -> FabLayout {
        let size = frame.size();

        if !router.tab_bar_visible() {
            // A pushed destination covers the dock and tab bar entirely.
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                .split(size);
            Self::render_screen(frame, chunks[0], router.current(), theme);
            Self::render_hint(frame, chunks[1], "Esc back · q quit", theme);
            return FabLayout::default();
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Min(0),
                    Constraint::Length(DOCK_HEIGHT),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(size);

        Self::render_screen(frame, chunks[0], router.current(), theme);
        let layout = Self::render_dock(frame, chunks[1], presenter, theme);
        Self::render_tab_bar(frame, chunks[2], router, theme);
        layout
    }

    fn render_screen(frame: &mut Frame, area: Rect, screen: Screen, theme: &ColorTheme) {
        let mut lines = vec![
            Line::from(Span::styled(screen.title(), theme.screen_title)),
            Line::from(""),
        ];
        let body: &[&str] = match screen {
            Screen::Today => &[
                "Good morning.",
                "",
                "No entries yet today. Tap the button below to write one,",
                "or hold and drag to jump straight to a destination.",
            ],
            Screen::Timeline => &[
                "Tue  Coffee with Sam, two photos",
                "Mon  Long walk, short entry",
                "Sun  Capture: receipts from the market",
            ],
            Screen::Capture => &[
                "Viewfinder placeholder. Capture lives on the device camera.",
                "",
                "Press Esc to return.",
            ],
            Screen::NewEntry => &[
                "A blank page. Writing UI lives outside this demo.",
                "",
                "Press Esc to return.",
            ],
        };
        lines.extend(body.iter().map(|text| Line::from(*text)));

        let mut paragraph = Paragraph::new(lines);
        if let Some(color) = theme.normal_text {
            paragraph = paragraph.style(ratatui::style::Style::default().fg(color));
        }
        frame.render_widget(paragraph, area);
    }

    fn render_dock(
        frame: &mut Frame,
        area: Rect,
        presenter: &PresentationController,
        theme: &ColorTheme,
    ) -> FabLayout {
        if area.width < FAB_WIDTH || area.height < DOCK_HEIGHT {
            return FabLayout::default();
        }

        let center_x = area.x + area.width / 2;
        let fab = Rect::new(
            center_x.saturating_sub(FAB_WIDTH / 2),
            area.y,
            FAB_WIDTH,
            DOCK_HEIGHT,
        );

        let progress = presenter.progress();
        let expanded = presenter.is_expanded();

        let mut layout = FabLayout {
            fab,
            options_active: expanded,
            ..FabLayout::default()
        };

        if progress > OPTION_VISIBILITY_FLOOR {
            let slide = (progress * OPTION_SLIDE_CELLS).round() as u16;
            let left_width = LEFT_OPTION_LABEL.len() as u16 + 4;
            let right_width = RIGHT_OPTION_LABEL.len() as u16 + 4;

            let left_x = fab.x.saturating_sub(slide + left_width);
            let right_x = (fab.x + fab.width + slide).min(area.right().saturating_sub(right_width));
            layout.left_option = Rect::new(left_x, area.y, left_width, DOCK_HEIGHT);
            layout.right_option = Rect::new(right_x, area.y, right_width, DOCK_HEIGHT);

            let active = presenter.active_side();
            Self::render_option(
                frame,
                layout.left_option,
                LEFT_OPTION_LABEL,
                active == Side::Left,
                theme,
            );
            Self::render_option(
                frame,
                layout.right_option,
                RIGHT_OPTION_LABEL,
                active == Side::Right,
                theme,
            );
        }

        let face = if expanded { "x" } else { "+" };
        let style = if expanded {
            theme.fab_expanded
        } else {
            theme.fab
        };
        let button = Paragraph::new(face)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(button, fab);

        layout
    }

    fn render_option(
        frame: &mut Frame,
        area: Rect,
        label: &str,
        active: bool,
        theme: &ColorTheme,
    ) {
        let style = if active {
            theme.option_active
        } else {
            theme.option
        };
        let bubble = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(bubble, area);
    }

    fn render_tab_bar(frame: &mut Frame, area: Rect, router: &ScreenRouter, theme: &ColorTheme) {
        let tab_style = |tab: Screen| {
            if router.active_tab() == tab {
                theme.tab_active
            } else {
                theme.tab_inactive
            }
        };
        let line = Line::from(vec![
            Span::raw("  "),
            Span::styled("[1] Today", tab_style(Screen::Today)),
            Span::raw("   "),
            Span::styled("[2] Timeline", tab_style(Screen::Timeline)),
            Span::raw("   "),
            Span::styled("tap or hold-drag the button · q quit", theme.hint),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_hint(frame: &mut Frame, area: Rect, hint: &str, theme: &ColorTheme) {
        frame.render_widget(Paragraph::new(hint).style(theme.hint), area);
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUi::new(ColorTheme::default());
        assert!(ui.terminal.is_none());

        let mono = TerminalUi::new(ColorTheme::monochrome());
        assert!(mono.terminal.is_none());
    }

    #[test]
    fn draw_without_initialize_publishes_empty_regions() {
        let mut ui = TerminalUi::new(ColorTheme::default());
        let presenter = PresentationController::default();
        let router = ScreenRouter::new();

        let layout = ui.draw(&presenter, &router).unwrap();
        assert_eq!(layout, FabLayout::default());
    }
}
