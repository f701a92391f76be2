//! Palettes and style conversion.
//!
//! Filter colors are 256-color indices. Filter `i` takes color `i % 7` of
//! the active palette, so more than seven filters reuse colors.

use crate::model::{ColorizeMode, PaletteId, PALETTE_COUNT};
use crate::view_state::SgrStyle;
use ratatui::style::{Color, Modifier, Style};

/// Colors per palette.
pub const PALETTE_SIZE: usize = 7;

/// Built-in palettes, dark and light variants of three orderings.
pub const PALETTES: [[u8; PALETTE_SIZE]; PALETTE_COUNT] = [
    // Dark, "error" first: red, orange, yellow, green, blue, purple, pink
    [196, 208, 190, 46, 33, 201, 219],
    // Light, "error" first
    [1, 208, 3, 22, 20, 129, 201],
    // Dark, "ok" first
    [46, 190, 208, 196, 33, 201, 219],
    // Light, "ok" first
    [22, 3, 208, 1, 20, 129, 201],
    // Dark, neutral
    [33, 201, 219, 190, 46, 208, 196],
    // Light, neutral
    [20, 129, 201, 3, 22, 208, 1],
];

const BAR_FOREGROUND: u8 = 0;
const BAR_BACKGROUND: u8 = 39;

/// Color of filter `filter` in `palette`.
pub fn filter_color(palette: PaletteId, filter: usize) -> Color {
    Color::Indexed(PALETTES[palette.index()][filter % PALETTE_SIZE])
}

/// Style of the bar row.
pub fn bar_style() -> Style {
    Style::default()
        .fg(Color::Indexed(BAR_FOREGROUND))
        .bg(Color::Indexed(BAR_BACKGROUND))
}

/// Style of a keyword span claimed by `filter`.
pub fn highlight_style(mode: ColorizeMode, palette: PaletteId, filter: usize) -> Style {
    let color = filter_color(palette, filter);
    match mode {
        ColorizeMode::KeywordHighlight => Style::default()
            .fg(Color::Indexed(BAR_FOREGROUND))
            .bg(color),
        ColorizeMode::Keyword | ColorizeMode::Line => Style::default().fg(color),
    }
}

/// Style of the line number prefix.
///
/// Numbers of claimed lines take the filter color.
pub fn prefix_style(palette: PaletteId, filter: Option<usize>) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match filter {
        Some(index) => style.fg(filter_color(palette, index)),
        None => style,
    }
}

/// Ratatui equivalent of a decoded SGR state.
pub fn sgr_style(sgr: &SgrStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = sgr.fg {
        style = style.fg(Color::Indexed(fg));
    }
    if let Some(bg) = sgr.bg {
        style = style.bg(Color::Indexed(bg));
    }
    if sgr.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if sgr.dim {
        style = style.add_modifier(Modifier::DIM);
    }
    if sgr.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}
