//! Scroll offsets of a view over its display rows.

use std::fmt;

/// Where the viewport sits vertically, for the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollPosition {
    /// First row visible.
    #[default]
    Top,
    /// Last row visible.
    Bottom,
    /// Somewhere in between, as a percentage.
    Percent(u8),
}

impl fmt::Display for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "TOP"),
            Self::Bottom => write!(f, "BOT"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Horizontal column and vertical row offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offsets {
    horizontal: usize,
    vertical: usize,
    position: ScrollPosition,
}

impl Offsets {
    /// First visible column (meaningful without wrapping).
    pub fn horizontal(&self) -> usize {
        self.horizontal
    }

    /// First visible display row.
    pub fn vertical(&self) -> usize {
        self.vertical
    }

    /// Position summary of the vertical offset.
    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// Sets the horizontal offset. Returns true when it changed.
    pub fn set_horizontal(&mut self, offset: usize) -> bool {
        let changed = self.horizontal != offset;
        self.horizontal = offset;
        changed
    }

    /// Sets the vertical offset, clamped so that the last page stays full.
    ///
    /// `rows` is the number of display rows, `height` the number of rows
    /// the viewport shows. Returns true when the offset changed.
    pub fn set_vertical(&mut self, offset: usize, rows: usize, height: usize) -> bool {
        let max = rows.saturating_sub(height);
        let (offset, position) = if offset >= max {
            (max, ScrollPosition::Bottom)
        } else if offset == 0 {
            (0, ScrollPosition::Top)
        } else {
            let percent = (offset * 100 / max).min(100) as u8;
            (offset, ScrollPosition::Percent(percent))
        };
        let changed = self.vertical != offset;
        self.vertical = offset;
        self.position = position;
        changed
    }

    /// Back to the top-left corner.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
