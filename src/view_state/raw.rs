//! Immutable snapshot of the source lines.

use std::sync::Arc;

/// Spaces substituted for each tab character.
pub const TAB_WIDTH: usize = 4;

/// Source lines as loaded, with tabs expanded.
///
/// Cloning is cheap; a reload replaces the whole snapshot instead of
/// mutating it, so derived content always refers to one consistent set of
/// lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContent {
    lines: Arc<[String]>,
}

impl RawContent {
    /// Splits text into lines on `\n`, dropping a trailing `\r`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Decodes bytes lossily, then splits them into lines.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    /// Builds content from individual lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| expand_tabs(line.as_ref()))
            .collect();
        Self {
            lines: lines.into(),
        }
    }

    /// All lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line at `index`.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True without lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Digits needed to print the largest line number.
    pub fn line_number_width(&self) -> usize {
        digit_count(self.lines.len())
    }
}

/// Decimal digits of `max(1, n)`.
pub fn digit_count(n: usize) -> usize {
    let mut n = n.max(1);
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

fn expand_tabs(line: &str) -> String {
    if line.contains('\t') {
        line.replace('\t', &" ".repeat(TAB_WIDTH))
    } else {
        line.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_and_drops_carriage_returns() {
        let raw = RawContent::from_text("one\r\ntwo\nthree");
        assert_eq!(raw.lines(), &["one", "two", "three"]);
    }

    #[test]
    fn trailing_newline_adds_no_line() {
        assert_eq!(RawContent::from_text("a\nb\n").len(), 2);
    }

    #[test]
    fn tabs_expand_to_spaces() {
        let raw = RawContent::from_text("a\tb");
        assert_eq!(raw.line(0), Some("a    b"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let raw = RawContent::from_bytes(b"ok\n\xffbad");
        assert_eq!(raw.line(1), Some("\u{fffd}bad"));
    }

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(999), 3);
        assert_eq!(digit_count(1000), 4);
    }
}
