//! Terminal control sequences embedded in source lines.
//!
//! Recognizes CSI sequences (`ESC [ params intermediates final`), strips
//! them from visible text, and interprets the SGR subset (`ESC [ ... m`)
//! into style spans over the stripped text.

use crate::model::SgrMode;
use std::borrow::Cow;
use std::ops::Range;

const ESC: u8 = 0x1b;

// ===== Scanning =====

/// Byte range of the CSI sequence starting at `start`, if one does.
///
/// Grammar: `ESC [`, parameter bytes `0x30..=0x3F`, intermediate bytes
/// `0x20..=0x2F`, one final byte `0x40..=0x7E`.
pub fn csi_at(text: &str, start: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&ESC) || bytes.get(start + 1) != Some(&b'[') {
        return None;
    }
    let mut i = start + 2;
    while matches!(bytes.get(i), Some(0x30..=0x3f)) {
        i += 1;
    }
    while matches!(bytes.get(i), Some(0x20..=0x2f)) {
        i += 1;
    }
    match bytes.get(i) {
        Some(0x40..=0x7e) => Some(start..i + 1),
        _ => None,
    }
}

/// Iterator over the CSI sequences of a line, left to right.
#[derive(Debug, Clone)]
pub struct CsiSequences<'a> {
    text: &'a str,
    pos: usize,
}

impl Iterator for CsiSequences<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let offset = bytes[self.pos..].iter().position(|b| *b == ESC)?;
            let start = self.pos + offset;
            if let Some(range) = csi_at(self.text, start) {
                self.pos = range.end;
                return Some(range);
            }
            self.pos = start + 1;
        }
        None
    }
}

/// CSI sequences contained in `text`.
pub fn csi_sequences(text: &str) -> CsiSequences<'_> {
    CsiSequences { text, pos: 0 }
}

/// `text` without any CSI sequence.
pub fn strip(text: &str) -> Cow<'_, str> {
    let mut sequences = csi_sequences(text).peekable();
    if sequences.peek().is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in sequences {
        out.push_str(&text[last..range.start]);
        last = range.end;
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

// ===== Styles =====

/// Rendition state established by SGR sequences.
///
/// Colors are 256-color indices; the 16 basic colors map to 0..=15.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SgrStyle {
    /// Foreground color.
    pub fg: Option<u8>,
    /// Background color.
    pub bg: Option<u8>,
    /// Bold intensity.
    pub bold: bool,
    /// Faint intensity.
    pub dim: bool,
    /// Underlined.
    pub underline: bool,
}

impl SgrStyle {
    /// True when the style draws like unstyled text.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the parameters of one SGR sequence.
    fn apply(&mut self, params: &[u16]) {
        if params.is_empty() {
            *self = Self::default();
            return;
        }
        let mut iter = params.iter().copied();
        while let Some(code) = iter.next() {
            match code {
                0 => *self = Self::default(),
                1 => self.bold = true,
                2 => self.dim = true,
                4 => self.underline = true,
                22 => {
                    self.bold = false;
                    self.dim = false;
                }
                24 => self.underline = false,
                30..=37 => self.fg = Some((code - 30) as u8),
                39 => self.fg = None,
                40..=47 => self.bg = Some((code - 40) as u8),
                49 => self.bg = None,
                90..=97 => self.fg = Some((code - 90 + 8) as u8),
                100..=107 => self.bg = Some((code - 100 + 8) as u8),
                38 | 48 => {
                    let color = extended_color(&mut iter);
                    if code == 38 {
                        self.fg = color.or(self.fg);
                    } else {
                        self.bg = color.or(self.bg);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Consumes `5;n` or `2;r;g;b` after a 38/48 code. Only indexed colors
/// are kept.
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<u8> {
    match iter.next()? {
        5 => iter.next().and_then(|n| u8::try_from(n).ok()),
        2 => {
            iter.nth(2);
            None
        }
        _ => None,
    }
}

/// Parameters of an SGR sequence, or `None` for other CSI sequences.
fn sgr_params(sequence: &str) -> Option<Vec<u16>> {
    let body = sequence.strip_prefix("\u{1b}[")?.strip_suffix('m')?;
    if body.is_empty() {
        return Some(Vec::new());
    }
    body.split(';')
        .map(|p| {
            if p.is_empty() {
                Some(0)
            } else {
                p.parse::<u16>().ok()
            }
        })
        .collect()
}

/// Styled byte range of a line's visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Style over the range.
    pub style: SgrStyle,
}

// ===== Processor =====

/// Stateful line filter applying an [`SgrMode`].
///
/// The rendition state carries from one line to the next, so a color
/// opened on one line keeps applying until reset. Use one processor per
/// pass over the content.
#[derive(Debug, Clone, Default)]
pub struct SgrProcessor {
    style: SgrStyle,
}

impl SgrProcessor {
    /// Fresh processor with plain state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible text of `line` and, in [`SgrMode::Process`], its style spans.
    pub fn filter<'a>(&mut self, line: &'a str, mode: SgrMode) -> (Cow<'a, str>, Vec<StyleSpan>) {
        match mode {
            SgrMode::Passthrough => (Cow::Borrowed(line), Vec::new()),
            SgrMode::Remove => (strip(line), Vec::new()),
            SgrMode::Process => self.process(line),
        }
    }

    fn process<'a>(&mut self, line: &'a str) -> (Cow<'a, str>, Vec<StyleSpan>) {
        let mut spans = Vec::new();
        let mut visible = String::with_capacity(line.len());
        let mut last = 0;
        let mut span_start = 0;

        for range in csi_sequences(line) {
            visible.push_str(&line[last..range.start]);
            last = range.end;
            let Some(params) = sgr_params(&line[range]) else {
                continue;
            };
            self.close_span(&mut spans, span_start, visible.len());
            self.style.apply(&params);
            span_start = visible.len();
        }
        visible.push_str(&line[last..]);
        self.close_span(&mut spans, span_start, visible.len());

        if visible.len() == line.len() {
            (Cow::Borrowed(line), spans)
        } else {
            (Cow::Owned(visible), spans)
        }
    }

    fn close_span(&self, spans: &mut Vec<StyleSpan>, start: usize, end: usize) {
        if start < end && !self.style.is_plain() {
            spans.push(StyleSpan {
                start,
                end,
                style: self.style,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: &str = "\u{1b}[31m";
    const RESET: &str = "\u{1b}[0m";

    #[test]
    fn plain_line_is_untouched_in_every_mode() {
        let mut p = SgrProcessor::new();
        for mode in [SgrMode::Process, SgrMode::Remove, SgrMode::Passthrough] {
            let (text, spans) = p.filter("Some dummy line", mode);
            assert_eq!(text, "Some dummy line");
            assert!(spans.is_empty());
        }
    }

    #[test]
    fn remove_strips_sequences_without_spans() {
        let line = format!("{RED}red{RESET} plain");
        let (text, spans) = SgrProcessor::new().filter(&line, SgrMode::Remove);
        assert_eq!(text, "red plain");
        assert!(spans.is_empty());
    }

    #[test]
    fn passthrough_keeps_sequences() {
        let line = format!("{RED}red{RESET}");
        let (text, _) = SgrProcessor::new().filter(&line, SgrMode::Passthrough);
        assert_eq!(text, line);
    }

    #[test]
    fn process_produces_spans_over_visible_text() {
        let line = format!("a{RED}bc{RESET}d\u{1b}[1;4mef{RESET}");
        let (text, spans) = SgrProcessor::new().filter(&line, SgrMode::Process);
        assert_eq!(text, "abcdef");
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (1, 3));
        assert_eq!(spans[0].style.fg, Some(1));
        assert_eq!((spans[1].start, spans[1].end), (4, 6));
        assert!(spans[1].style.bold && spans[1].style.underline);
    }

    #[test]
    fn process_handles_multibyte_text() {
        let line = format!("{RED}|아파트---|{RESET}*****{RED}");
        let (text, spans) = SgrProcessor::new().filter(&line, SgrMode::Process);
        assert_eq!(text, "|아파트---|*****");
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "|아파트---|");
    }

    #[test]
    fn style_carries_over_to_next_line() {
        let mut p = SgrProcessor::new();
        let (_, spans) = p.filter(&format!("{RED}Something red"), SgrMode::Process);
        assert_eq!(spans.len(), 1);
        let line2 = format!("still red{RESET}");
        let (text, spans) = p.filter(&line2, SgrMode::Process);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "still red");
    }

    #[test]
    fn bright_and_background_colors() {
        let line = "\u{1b}[97;41mx";
        let (_, spans) = SgrProcessor::new().filter(line, SgrMode::Process);
        assert_eq!(spans[0].style.fg, Some(15));
        assert_eq!(spans[0].style.bg, Some(1));
    }

    #[test]
    fn indexed_extended_color() {
        let (_, spans) = SgrProcessor::new().filter("\u{1b}[38;5;208mx", SgrMode::Process);
        assert_eq!(spans[0].style.fg, Some(208));
    }

    #[test]
    fn non_sgr_csi_is_stripped_but_ignored() {
        let (text, spans) = SgrProcessor::new().filter("\u{1b}[2Kclear", SgrMode::Process);
        assert_eq!(text, "clear");
        assert!(spans.is_empty());
    }

    #[test]
    fn lone_escape_is_not_a_sequence() {
        assert_eq!(strip("a\u{1b}b"), "a\u{1b}b");
        assert_eq!(csi_sequences("\u{1b}[").count(), 0);
    }
}
