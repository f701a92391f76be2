//! Keyword filters and the ordered filter stack.
//!
//! A [`Filter`] is an AND-combination of literal keyword requirements. The
//! [`FilterStack`] orders filters by priority: the first filter matching a
//! line claims it, and its position selects the highlight color.

use std::fmt;

// ===== Case folding =====

/// Folds text for case-insensitive comparison.
///
/// Folding is done per character so that match offsets can be mapped back
/// onto the original text (see `view_state::segments`).
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// True when folding would leave the text unchanged.
fn is_all_lowercase(text: &str) -> bool {
    text.chars().all(|c| c.to_lowercase().eq(std::iter::once(c)))
}

// ===== Keyword =====

/// A literal substring requirement.
///
/// `present` keywords require the text to occur in a line, absent ones
/// require it not to. Keyword text is never interpreted as a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword {
    text: String,
    present: bool,
}

impl Keyword {
    /// Keyword that must occur in the line.
    pub fn present(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            present: true,
        }
    }

    /// Keyword that must not occur in the line.
    pub fn absent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            present: false,
        }
    }

    /// Literal keyword text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the keyword must be present (true) or absent (false).
    pub fn is_present(&self) -> bool {
        self.present
    }

    fn satisfied_by(&self, haystack: &str, ignore_case: bool) -> bool {
        let found = if ignore_case {
            haystack.contains(fold_case(&self.text).as_str())
        } else {
            haystack.contains(self.text.as_str())
        };
        found == self.present
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.present {
            write!(f, "{}", self.text)
        } else {
            write!(f, "NOT {}", self.text)
        }
    }
}

// ===== Filter =====

/// Ordered keywords ANDed together, with case and show/hide flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    keywords: Vec<Keyword>,
    ignore_case: bool,
    hiding: bool,
}

impl Filter {
    /// Empty filter: matches every line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter holding a single present keyword.
    ///
    /// Case sensitivity is inferred from the keyword: all-lowercase text
    /// starts case-insensitive, anything else starts case-sensitive.
    pub fn with_keyword(text: impl Into<String>) -> Self {
        let text = text.into();
        let ignore_case = is_all_lowercase(&text);
        Self {
            keywords: vec![Keyword::present(text)],
            ignore_case,
            hiding: false,
        }
    }

    /// Builder-style setter for the case flag.
    pub fn ignoring_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Builder-style setter for the hiding flag.
    pub fn hidden(mut self, hiding: bool) -> Self {
        self.hiding = hiding;
        self
    }

    /// Keywords in entry order.
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Whether comparisons ignore case.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Whether lines claimed by this filter are suppressed.
    pub fn is_hiding(&self) -> bool {
        self.hiding
    }

    /// Most recently entered keyword.
    pub fn last_keyword(&self) -> Option<&Keyword> {
        self.keywords.last()
    }

    /// Appends a keyword. Empty keyword text is rejected.
    pub fn push_keyword(&mut self, keyword: Keyword) -> bool {
        if keyword.text.is_empty() {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    /// Removes the most recently entered keyword.
    pub fn pop_keyword(&mut self) -> Option<Keyword> {
        self.keywords.pop()
    }

    /// Replaces the text of the last keyword, keeping its presence flag.
    pub fn edit_last_keyword(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        match self.keywords.last_mut() {
            Some(keyword) if !text.is_empty() => {
                keyword.text = text;
                true
            }
            _ => false,
        }
    }

    /// Flips the last keyword between "must be present" and "must be absent".
    ///
    /// Returns the new presence flag, or `None` without keywords.
    pub fn toggle_last_presence(&mut self) -> Option<bool> {
        let keyword = self.keywords.last_mut()?;
        keyword.present = !keyword.present;
        Some(keyword.present)
    }

    /// Flips case sensitivity, returning the new `ignore_case` value.
    pub fn toggle_ignore_case(&mut self) -> bool {
        self.ignore_case = !self.ignore_case;
        self.ignore_case
    }

    /// Flips show/hide, returning the new `hiding` value.
    pub fn toggle_hiding(&mut self) -> bool {
        self.hiding = !self.hiding;
        self.hiding
    }

    /// Moves the first keyword to the end. Matching is unaffected.
    pub fn rotate_keywords_left(&mut self) {
        if !self.keywords.is_empty() {
            self.keywords.rotate_left(1);
        }
    }

    /// Moves the last keyword to the front. Matching is unaffected.
    pub fn rotate_keywords_right(&mut self) {
        if !self.keywords.is_empty() {
            self.keywords.rotate_right(1);
        }
    }

    /// True when every keyword requirement holds for `line`.
    ///
    /// A filter without keywords matches every line.
    pub fn matches(&self, line: &str) -> bool {
        if self.ignore_case {
            let folded = fold_case(line);
            self.keywords
                .iter()
                .all(|k| k.satisfied_by(&folded, true))
        } else {
            self.keywords.iter().all(|k| k.satisfied_by(line, false))
        }
    }

    /// Keywords joined with `AND`, absent ones prefixed with `NOT`.
    pub fn describe(&self) -> String {
        self.keywords
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

// ===== FilterStack =====

/// Filters in priority order. Index 0 has the highest priority.
///
/// "Top" refers to the most recently pushed filter, the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStack {
    filters: Vec<Filter>,
}

impl FilterStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True without filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters in priority order.
    pub fn as_slice(&self) -> &[Filter] {
        &self.filters
    }

    /// Iterates filters in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    /// Filter at `index`.
    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.filters.get(index)
    }

    /// Most recently pushed filter.
    pub fn top(&self) -> Option<&Filter> {
        self.filters.last()
    }

    /// Mutable access to the most recently pushed filter.
    pub fn top_mut(&mut self) -> Option<&mut Filter> {
        self.filters.last_mut()
    }

    /// Pushes a filter with the lowest priority.
    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Removes the most recently pushed filter.
    pub fn pop(&mut self) -> Option<Filter> {
        self.filters.pop()
    }

    /// Removes every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Swaps the two most recently pushed filters.
    pub fn swap_top(&mut self) -> bool {
        let n = self.filters.len();
        if n < 2 {
            return false;
        }
        self.filters.swap(n - 1, n - 2);
        true
    }

    /// Rotates priorities: the first filter becomes the last.
    pub fn rotate_up(&mut self) -> bool {
        if self.filters.len() < 2 {
            return false;
        }
        self.filters.rotate_left(1);
        true
    }

    /// Rotates priorities: the last filter becomes the first.
    pub fn rotate_down(&mut self) -> bool {
        if self.filters.len() < 2 {
            return false;
        }
        self.filters.rotate_right(1);
        true
    }

    /// Index of the first filter matching `line`.
    pub fn first_match(&self, line: &str) -> Option<usize> {
        self.filters.iter().position(|f| f.matches(line))
    }
}

impl FromIterator<Filter> for FilterStack {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterStack {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
