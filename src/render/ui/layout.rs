//! Hit regions for the control, published by the renderer every frame.
//!
//! The input service classifies pointer presses against these regions; the
//! renderer is the only writer. Regions use terminal cell coordinates.

use ratatui::layout::Rect;

use crate::gesture::Side;

/// Where the control and its option affordances currently sit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FabLayout {
    /// The main button.
    pub fab: Rect,
    /// Left option bubble (Capture). Zero-sized while collapsed.
    pub left_option: Rect,
    /// Right option bubble (New Entry). Zero-sized while collapsed.
    pub right_option: Rect,
    /// Whether the option affordances are interactive (control expanded).
    pub options_active: bool,
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

impl FabLayout {
    /// Is the position on the main button?
    pub fn fab_hit(&self, column: u16, row: u16) -> bool {
        contains(self.fab, column, row)
    }

    /// Which option bubble, if any, is under the position.
    ///
    /// Only meaningful while `options_active`; callers check that first.
    pub fn option_at(&self, column: u16, row: u16) -> Option<Side> {
        if contains(self.left_option, column, row) {
            Some(Side::Left)
        } else if contains(self.right_option, column, row) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
