//! Closed display-mode enumerations and their cycling rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A finite mode cycled forward and backward with wrap-around.
pub trait Cyclic: Copy + PartialEq + 'static {
    /// Every mode, in cycling order.
    const ALL: &'static [Self];

    /// Following mode, wrapping to the first.
    fn next(self) -> Self {
        let all = Self::ALL;
        let pos = all.iter().position(|m| *m == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }

    /// Preceding mode, wrapping to the last.
    fn prev(self) -> Self {
        let all = Self::ALL;
        let pos = all.iter().position(|m| *m == self).unwrap_or(0);
        all[(pos + all.len() - 1) % all.len()]
    }
}

// ===== LineVisibility =====

/// Which unmatched lines are revealed.
///
/// Variant order defines the cycling order; context levels are ordered by
/// radius (see [`ContextPolicy`]).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LineVisibility {
    /// Only lines claimed by a shown filter.
    #[default]
    OnlyMatching,
    /// Matched lines plus unmatched lines within this many lines of one.
    Context(usize),
    /// Every line not claimed by a hiding filter.
    All,
}

impl fmt::Display for LineVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyMatching => write!(f, "Showing only matching lines"),
            Self::Context(1) => write!(f, "Reveal 1 line above/below matching"),
            Self::Context(n) => write!(f, "Reveal {n} lines above/below matching"),
            Self::All => write!(f, "Showing all lines"),
        }
    }
}

/// Context radii offered when cycling line visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPolicy {
    radii: Vec<usize>,
}

impl ContextPolicy {
    /// Radii used when none are configured.
    pub const DEFAULT_RADII: [usize; 3] = [1, 2, 5];

    /// Builds a policy; radii are sorted, deduplicated and zero is dropped.
    pub fn new(radii: impl IntoIterator<Item = usize>) -> Self {
        let mut radii: Vec<usize> = radii.into_iter().filter(|r| *r > 0).collect();
        radii.sort_unstable();
        radii.dedup();
        Self { radii }
    }

    /// Configured radii, ascending.
    pub fn radii(&self) -> &[usize] {
        &self.radii
    }

    /// Every visibility level in cycling order.
    pub fn levels(&self) -> Vec<LineVisibility> {
        std::iter::once(LineVisibility::OnlyMatching)
            .chain(self.radii.iter().map(|r| LineVisibility::Context(*r)))
            .chain(std::iter::once(LineVisibility::All))
            .collect()
    }

    /// Next level after `current`, wrapping to the first.
    ///
    /// A context radius absent from the policy still moves to the nearest
    /// larger level.
    pub fn next(&self, current: LineVisibility) -> LineVisibility {
        let levels = self.levels();
        levels
            .iter()
            .copied()
            .find(|level| *level > current)
            .unwrap_or(LineVisibility::OnlyMatching)
    }

    /// Previous level before `current`, wrapping to the last.
    pub fn prev(&self, current: LineVisibility) -> LineVisibility {
        let levels = self.levels();
        levels
            .iter()
            .rev()
            .copied()
            .find(|level| *level < current)
            .unwrap_or(LineVisibility::All)
    }
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADII)
    }
}

// ===== ColorizeMode =====

/// How matched lines are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorizeMode {
    /// Keyword spans drawn reversed in the filter color.
    #[default]
    KeywordHighlight,
    /// Keyword spans drawn in the filter color.
    Keyword,
    /// Whole line drawn in the filter color.
    Line,
}

impl Cyclic for ColorizeMode {
    const ALL: &'static [Self] = &[Self::KeywordHighlight, Self::Keyword, Self::Line];
}

impl fmt::Display for ColorizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::KeywordHighlight => "Keyword highlight",
            Self::Keyword => "Keyword",
            Self::Line => "Line",
        };
        f.write_str(text)
    }
}

// ===== SgrMode =====

/// Treatment of embedded SGR color sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SgrMode {
    /// Strip sequences and render their styling.
    #[default]
    Process,
    /// Strip sequences, render plain text.
    Remove,
    /// Keep sequences in the text as zero-width content.
    Passthrough,
}

impl Cyclic for SgrMode {
    const ALL: &'static [Self] = &[Self::Process, Self::Remove, Self::Passthrough];
}

impl fmt::Display for SgrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Process => "Process SGR (colorize)",
            Self::Remove => "Remove SGR (no colors)",
            Self::Passthrough => "Do not process SGR (passthrough)",
        };
        f.write_str(text)
    }
}

// ===== PaletteId =====

/// Number of built-in palettes.
pub const PALETTE_COUNT: usize = 6;

/// Index of a built-in highlight palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteId(usize);

impl PaletteId {
    /// Palette for `index`, wrapped into range.
    pub fn new(index: usize) -> Self {
        Self(index % PALETTE_COUNT)
    }

    /// Raw palette index.
    pub fn index(self) -> usize {
        self.0 % PALETTE_COUNT
    }

    /// Following palette, wrapping to the first.
    pub fn next(self) -> Self {
        Self::new(self.index() + 1)
    }

    /// Preceding palette, wrapping to the last.
    pub fn prev(self) -> Self {
        Self::new(self.index() + PALETTE_COUNT - 1)
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}
