//! Per-view configuration: the filter stack plus display flags.

use super::filter::FilterStack;
use super::modes::{ColorizeMode, LineVisibility, PaletteId, SgrMode};

/// Everything a user can change about one view.
///
/// `dirty` tracks whether the configuration changed since it was last
/// saved to or loaded from a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Filters in priority order.
    pub filters: FilterStack,
    /// Which unmatched lines are revealed.
    pub line_visibility: LineVisibility,
    /// Wrap long lines instead of clipping them.
    pub wrap: bool,
    /// Prefix rows with source line numbers.
    pub line_numbers: bool,
    /// Mark wrapped lines with a bullet prefix.
    pub bullets: bool,
    /// Render spaces as a visible dot.
    pub show_spaces: bool,
    /// How matches are colored.
    pub colorize_mode: ColorizeMode,
    /// Highlight palette.
    pub palette: PaletteId,
    /// Treatment of embedded SGR sequences.
    pub sgr_mode: SgrMode,
    /// Changed since last slot save/load.
    pub dirty: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            filters: FilterStack::new(),
            line_visibility: LineVisibility::OnlyMatching,
            wrap: true,
            line_numbers: false,
            bullets: false,
            show_spaces: false,
            colorize_mode: ColorizeMode::KeywordHighlight,
            palette: PaletteId::default(),
            sgr_mode: SgrMode::Process,
            dirty: false,
        }
    }
}

impl ViewConfig {
    /// True when at least one filter exists.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Same configuration with an empty filter stack.
    pub fn without_filters(&self) -> Self {
        Self {
            filters: FilterStack::new(),
            dirty: false,
            ..self.clone()
        }
    }
}
