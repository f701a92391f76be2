//! Layout engine: selected lines to fixed-width terminal rows.
//!
//! Widths are terminal columns measured with `unicode-width`. CSI sequences
//! are atoms of width zero: they are never split and never counted.

use super::selection::SelectedContent;
use super::sgr::csi_at;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// One terminal row of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLine {
    /// Index of the selected line this row shows.
    pub selected: usize,
    /// Start byte offset into the selected line's text.
    pub start: usize,
    /// End byte offset into the selected line's text.
    pub end: usize,
    /// True for every row of a wrapped line but the first.
    pub continuation: bool,
}

impl DisplayLine {
    /// Byte range of the row within its selected line.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Rows for the current width and wrap mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayContent {
    /// Rows in display order.
    pub lines: Vec<DisplayLine>,
    /// For each selected line, the index of its first row.
    pub first_rows: Vec<usize>,
}

impl DisplayContent {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True without rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Row at `index`.
    pub fn get(&self, index: usize) -> Option<&DisplayLine> {
        self.lines.get(index)
    }

    /// First row of the selected line at `selected`.
    pub fn first_row_of(&self, selected: usize) -> Option<usize> {
        self.first_rows.get(selected).copied()
    }
}

// ===== Atoms =====

/// A character or a CSI sequence with its column width.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Atom {
    range: Range<usize>,
    width: usize,
}

struct Atoms<'a> {
    text: &'a str,
    pos: usize,
}

impl Iterator for Atoms<'_> {
    type Item = Atom;

    fn next(&mut self) -> Option<Atom> {
        let rest = self.text.get(self.pos..)?;
        let c = rest.chars().next()?;
        let atom = match csi_at(self.text, self.pos) {
            Some(range) => Atom { range, width: 0 },
            None => Atom {
                range: self.pos..self.pos + c.len_utf8(),
                width: c.width().unwrap_or(0),
            },
        };
        self.pos = atom.range.end;
        Some(atom)
    }
}

fn atoms(text: &str) -> Atoms<'_> {
    Atoms { text, pos: 0 }
}

/// Display width of `text`, CSI sequences excluded.
pub fn text_width(text: &str) -> usize {
    atoms(text).map(|a| a.width).sum()
}

// ===== Wrapping =====

/// Splits `text` into consecutive ranges of at most `width` columns.
///
/// The ranges cover the whole text without gaps. Empty text yields a single
/// empty range. A character wider than `width` gets a row of its own.
pub fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut columns = 0;
    for atom in atoms(text) {
        if columns > 0 && columns + atom.width > width {
            ranges.push(start..atom.range.start);
            start = atom.range.start;
            columns = 0;
        }
        columns += atom.width;
    }
    ranges.push(start..text.len());
    ranges
}

/// Byte range of `text` visible through a window of `width` columns
/// starting at column `skip`.
///
/// Characters straddling either edge of the window are left out.
pub fn clip_columns(text: &str, skip: usize, width: usize) -> Range<usize> {
    let mut column = 0;
    let mut start = None;
    for atom in atoms(text) {
        if start.is_none() {
            if column < skip {
                column += atom.width;
                continue;
            }
            start = Some(atom.range.start);
        }
        if column + atom.width > skip + width {
            let start = start.unwrap_or(atom.range.start);
            return start..atom.range.start;
        }
        column += atom.width;
    }
    match start {
        Some(start) => start..text.len(),
        None => text.len()..text.len(),
    }
}

/// Lays out selected lines into rows.
///
/// Without wrapping every selected line is exactly one row spanning its
/// whole text; horizontal clipping happens at render time. With wrapping a
/// line spreads over as many rows as needed to fit `width` columns.
pub fn layout(selected: &SelectedContent, width: usize, wrap: bool) -> DisplayContent {
    let mut lines = Vec::with_capacity(selected.len());
    let mut first_rows = Vec::with_capacity(selected.len());
    for (index, line) in selected.lines.iter().enumerate() {
        first_rows.push(lines.len());
        if !wrap {
            lines.push(DisplayLine {
                selected: index,
                start: 0,
                end: line.text.len(),
                continuation: false,
            });
            continue;
        }
        for (chunk, range) in wrap_ranges(&line.text, width).into_iter().enumerate() {
            lines.push(DisplayLine {
                selected: index,
                start: range.start,
                end: range.end,
                continuation: chunk > 0,
            });
        }
    }
    DisplayContent { lines, first_rows }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
