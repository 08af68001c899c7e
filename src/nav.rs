//! Screen routing.
//!
//! The router owns which screen is visible: two tabs plus the destinations
//! reachable through the control. `navigate` is fire-and-forget: the router
//! never reports back to the gesture arbiter.

use log::info;

use crate::gesture::NavigationTarget;

/// Screens the host can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Today,
    Timeline,
    Capture,
    NewEntry,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Today => "Today",
            Screen::Timeline => "Timeline",
            Screen::Capture => "Capture",
            Screen::NewEntry => "New Entry",
        }
    }

    /// Tabs are the screens selectable from the tab bar.
    pub fn is_tab(self) -> bool {
        matches!(self, Screen::Today | Screen::Timeline)
    }
}

/// Owns the active tab and an optionally pushed destination screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRouter {
    active_tab: Screen,
    pushed: Option<Screen>,
}

impl ScreenRouter {
    pub fn new() -> Self {
        Self {
            active_tab: Screen::Today,
            pushed: None,
        }
    }

    /// The screen currently on top.
    pub fn current(&self) -> Screen {
        self.pushed.unwrap_or(self.active_tab)
    }

    /// Whether the tab bar (and the control docked above it) is visible.
    pub fn tab_bar_visible(&self) -> bool {
        self.pushed.is_none()
    }

    pub fn active_tab(&self) -> Screen {
        self.active_tab
    }

    /// Switch tabs. Non-tab screens are ignored; a pushed destination stays
    /// on top until popped.
    pub fn select_tab(&mut self, tab: Screen) {
        if tab.is_tab() {
            self.active_tab = tab;
        }
    }

    /// Perform the navigation the arbiter decided on. Fire-and-forget.
    pub fn navigate(&mut self, target: NavigationTarget) {
        let screen = match target {
            NavigationTarget::Capture => Screen::Capture,
            NavigationTarget::NewEntry => Screen::NewEntry,
        };
        info!("navigating to {}", screen.title());
        self.pushed = Some(screen);
    }

    /// Pop a pushed destination, returning to the active tab.
    pub fn back(&mut self) {
        self.pushed = None;
    }
}

impl Default for ScreenRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_today_with_tab_bar() {
        let router = ScreenRouter::new();
        assert_eq!(router.current(), Screen::Today);
        assert!(router.tab_bar_visible());
    }

    #[test]
    fn tab_switching_ignores_non_tabs() {
        let mut router = ScreenRouter::new();
        router.select_tab(Screen::Timeline);
        assert_eq!(router.current(), Screen::Timeline);

        router.select_tab(Screen::Capture);
        assert_eq!(router.current(), Screen::Timeline);
    }

    #[test]
    fn navigate_pushes_and_back_pops() {
        let mut router = ScreenRouter::new();
        router.navigate(NavigationTarget::Capture);
        assert_eq!(router.current(), Screen::Capture);
        assert!(!router.tab_bar_visible());

        router.back();
        assert_eq!(router.current(), Screen::Today);

        router.navigate(NavigationTarget::NewEntry);
        assert_eq!(router.current(), Screen::NewEntry);
    }

    #[test]
    fn pushed_destination_sits_above_tab_switches() {
        let mut router = ScreenRouter::new();
        router.navigate(NavigationTarget::NewEntry);
        router.select_tab(Screen::Timeline);

        assert_eq!(router.current(), Screen::NewEntry);
        router.back();
        assert_eq!(router.current(), Screen::Timeline);
    }
}
