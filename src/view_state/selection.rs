//! Selection engine: which source lines are eligible for display.
//!
//! [`select`] is a pure function of the raw content, the filter stack, the
//! visibility level and the SGR mode. It never keeps state between calls.

use super::raw::RawContent;
use super::segments::{self, Segment};
use super::sgr::{SgrProcessor, StyleSpan};
use crate::model::{FilterStack, LineVisibility, SgrMode};
use tracing::debug;

/// Where a selected line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    /// Index of a raw line.
    Source(usize),
    /// Rule between two non-contiguous context groups.
    Separator,
}

/// One line eligible for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLine {
    /// Source line or separator.
    pub origin: LineOrigin,
    /// Index of the filter that claimed the line.
    pub filter: Option<usize>,
    /// Visible text after SGR handling.
    pub text: String,
    /// Keyword highlight segments, sorted and disjoint.
    pub segments: Vec<Segment>,
    /// Styling decoded from SGR sequences.
    pub styles: Vec<StyleSpan>,
}

impl SelectedLine {
    fn separator() -> Self {
        Self {
            origin: LineOrigin::Separator,
            filter: None,
            text: String::new(),
            segments: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Raw line index, `None` for separators.
    pub fn source_index(&self) -> Option<usize> {
        match self.origin {
            LineOrigin::Source(index) => Some(index),
            LineOrigin::Separator => None,
        }
    }

    /// True for the rule between context groups.
    pub fn is_separator(&self) -> bool {
        self.origin == LineOrigin::Separator
    }
}

/// Ordered lines eligible for display, plus per-filter hit counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedContent {
    /// Lines in source order.
    pub lines: Vec<SelectedLine>,
    /// For each filter, the number of raw lines it claimed.
    pub hits: Vec<usize>,
}

impl SelectedContent {
    /// Number of selected lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True without selected lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total hits over every filter.
    pub fn total_hits(&self) -> usize {
        self.hits.iter().sum()
    }

    /// Position of the first selected line whose source index is at least
    /// `source`.
    pub fn position_at_or_after(&self, source: usize) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| matches!(l.origin, LineOrigin::Source(i) if i >= source))
    }
}

/// How a raw line was classified by the filter stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Shown(usize),
    Hidden,
    Unclaimed,
}

/// Selects the lines of `raw` to display.
///
/// Each line is claimed by the first matching filter. Lines claimed by a
/// hiding filter are never selected. Lines claimed by a shown filter always
/// are. Unclaimed lines follow `visibility`. Without filters every line is
/// selected.
pub fn select(
    raw: &RawContent,
    filters: &FilterStack,
    visibility: LineVisibility,
    sgr_mode: SgrMode,
) -> SelectedContent {
    let mut processor = SgrProcessor::new();
    let mut hits = vec![0; filters.len()];
    let mut visible = Vec::with_capacity(raw.len());
    let mut claims = Vec::with_capacity(raw.len());

    for line in raw.lines() {
        let (text, styles) = processor.filter(line, sgr_mode);
        let claim = match filters.first_match(&text) {
            Some(index) => {
                hits[index] += 1;
                if filters.get(index).is_some_and(|f| f.is_hiding()) {
                    Claim::Hidden
                } else {
                    Claim::Shown(index)
                }
            }
            None => Claim::Unclaimed,
        };
        claims.push(claim);
        visible.push((text.into_owned(), styles));
    }

    let included = inclusion(&claims, visibility, filters.is_empty());
    let separate_groups = matches!(visibility, LineVisibility::Context(_)) && !filters.is_empty();

    let mut lines = Vec::new();
    let mut previous: Option<usize> = None;
    for (index, ((text, styles), claim)) in visible.into_iter().zip(&claims).enumerate() {
        if !included[index] {
            continue;
        }
        if separate_groups && previous.is_some_and(|p| p + 1 != index) {
            lines.push(SelectedLine::separator());
        }
        previous = Some(index);

        let (filter, segments) = match *claim {
            Claim::Shown(f) => {
                let segments = filters
                    .get(f)
                    .map(|filter| segments::compute(&text, filter))
                    .unwrap_or_default();
                (Some(f), segments)
            }
            _ => (None, Vec::new()),
        };
        lines.push(SelectedLine {
            origin: LineOrigin::Source(index),
            filter,
            text,
            segments,
            styles,
        });
    }

    debug!(
        raw = raw.len(),
        selected = lines.len(),
        filters = filters.len(),
        "selection recomputed"
    );
    SelectedContent { lines, hits }
}

/// Per raw line, whether it is selected.
fn inclusion(claims: &[Claim], visibility: LineVisibility, no_filters: bool) -> Vec<bool> {
    if no_filters {
        return vec![true; claims.len()];
    }
    match visibility {
        LineVisibility::OnlyMatching => claims
            .iter()
            .map(|c| matches!(c, Claim::Shown(_)))
            .collect(),
        LineVisibility::All => claims.iter().map(|c| *c != Claim::Hidden).collect(),
        LineVisibility::Context(radius) => {
            let distances = distance_to_shown(claims);
            claims
                .iter()
                .zip(distances)
                .map(|(claim, distance)| match claim {
                    Claim::Shown(_) => true,
                    Claim::Hidden => false,
                    Claim::Unclaimed => distance.is_some_and(|d| d <= radius),
                })
                .collect()
        }
    }
}

/// Distance from each line to the nearest shown line, if any.
fn distance_to_shown(claims: &[Claim]) -> Vec<Option<usize>> {
    let mut distances = vec![None; claims.len()];
    let mut last: Option<usize> = None;
    for (i, claim) in claims.iter().enumerate() {
        if matches!(claim, Claim::Shown(_)) {
            last = Some(i);
        }
        distances[i] = last.map(|l| i - l);
    }
    let mut next: Option<usize> = None;
    for (i, claim) in claims.iter().enumerate().rev() {
        if matches!(claim, Claim::Shown(_)) {
            next = Some(i);
        }
        if let Some(n) = next {
            let d = n - i;
            distances[i] = Some(distances[i].map_or(d, |current: usize| current.min(d)));
        }
    }
    distances
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
