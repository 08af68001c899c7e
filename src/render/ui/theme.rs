//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for terminal rendering using ratatui's
//! color system directly to avoid unnecessary abstractions.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Screen titles
    pub screen_title: Style,

    /// The main button face
    pub fab: Style,

    /// The main button face while the control is expanded
    pub fab_expanded: Style,

    /// Option bubbles
    pub option: Style,

    /// The tentatively selected option bubble
    pub option_active: Style,

    /// Active tab label
    pub tab_active: Style,

    /// Inactive tab label
    pub tab_inactive: Style,

    /// Hint/status text
    pub hint: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None, // Use terminal default
            screen_title: Style::default().add_modifier(Modifier::BOLD),
            fab: Style::default().fg(Color::White).bg(Color::Indexed(61)),
            fab_expanded: Style::default().fg(Color::White).bg(Color::Indexed(97)),
            option: Style::default().fg(Color::Black).bg(Color::White),
            option_active: Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(61))
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Indexed(61))
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            hint: Style::default().fg(Color::DarkGray),
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            screen_title: Style::default().add_modifier(Modifier::BOLD),
            fab: Style::default().fg(Color::Black).bg(Color::White),
            fab_expanded: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            option: Style::default().add_modifier(Modifier::REVERSED),
            option_active: Style::default()
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default().add_modifier(Modifier::BOLD),
            tab_inactive: Style::default(),
            hint: Style::default(),
        }
    }
}
