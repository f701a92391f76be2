//! Highlight segments: keyword occurrence ranges within a line.
//!
//! Offsets are byte offsets into the line's visible text and always fall on
//! character boundaries, so they can slice the text directly.

use crate::model::Filter;
use std::ops::Range;

/// Half-open `[start, end)` highlighted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Segment {
    /// Segment covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Covered range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the segment covers nothing.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

// ===== Occurrence search =====

/// Case-folded text with a map back to the original byte offsets.
struct FoldedText {
    text: String,
    /// For each folded byte: start of the original character it came from.
    starts: Vec<usize>,
    /// For each folded byte: end of the original character it came from.
    ends: Vec<usize>,
}

impl FoldedText {
    fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len());
        let mut starts = Vec::with_capacity(original.len());
        let mut ends = Vec::with_capacity(original.len());
        let mut buf = [0u8; 4];
        for (start, c) in original.char_indices() {
            let end = start + c.len_utf8();
            for lower in c.to_lowercase() {
                let encoded = lower.encode_utf8(&mut buf);
                text.push_str(encoded);
                for _ in 0..encoded.len() {
                    starts.push(start);
                    ends.push(end);
                }
            }
        }
        Self { text, starts, ends }
    }

    fn to_original(&self, start: usize, end: usize) -> Segment {
        Segment::new(self.starts[start], self.ends[end - 1])
    }
}

/// Non-overlapping occurrences of `keyword` in `text`, scanned left to
/// right. An empty keyword has no occurrence.
pub fn find_occurrences(text: &str, keyword: &str, ignore_case: bool) -> Vec<Segment> {
    if keyword.is_empty() {
        return Vec::new();
    }
    if !ignore_case {
        return text
            .match_indices(keyword)
            .map(|(start, m)| Segment::new(start, start + m.len()))
            .collect();
    }
    let folded = FoldedText::new(text);
    let needle = crate::model::filter::fold_case(keyword);
    if needle.is_empty() {
        return Vec::new();
    }
    folded
        .text
        .match_indices(needle.as_str())
        .map(|(start, m)| folded.to_original(start, start + m.len()))
        .collect()
}

/// Sorts by `(start, end)` and merges overlapping or touching segments.
pub fn sort_and_merge(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.retain(|s| !s.is_empty());
    segments.sort_unstable();
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(pending) if segment.start <= pending.end => {
                pending.end = pending.end.max(segment.end);
            }
            _ => merged.push(segment),
        }
    }
    merged
}

/// Highlight segments of `text` for the filter that claimed it.
///
/// Only present keywords contribute. The result is sorted, disjoint and
/// covers exactly the union of every keyword occurrence.
pub fn compute(text: &str, filter: &Filter) -> Vec<Segment> {
    let occurrences = filter
        .keywords()
        .iter()
        .filter(|k| k.is_present())
        .flat_map(|k| find_occurrences(text, k.text(), filter.ignore_case()))
        .collect();
    sort_and_merge(occurrences)
}

// ===== Piece iteration =====

/// A drawable range, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Whether the range lies inside a segment.
    pub highlighted: bool,
    /// Byte range.
    pub range: Range<usize>,
}

/// Splits `start..end` into alternating plain and highlighted pieces.
#[derive(Debug, Clone)]
pub struct Pieces<'a> {
    pos: usize,
    end: usize,
    segments: &'a [Segment],
}

impl Iterator for Pieces<'_> {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        if self.pos >= self.end {
            return None;
        }
        while let Some((first, rest)) = self.segments.split_first() {
            if first.end > self.pos {
                break;
            }
            self.segments = rest;
        }
        let piece = match self.segments.first() {
            Some(seg) if seg.start <= self.pos => Piece {
                highlighted: true,
                range: self.pos..seg.end.min(self.end),
            },
            Some(seg) => Piece {
                highlighted: false,
                range: self.pos..seg.start.min(self.end),
            },
            None => Piece {
                highlighted: false,
                range: self.pos..self.end,
            },
        };
        self.pos = piece.range.end;
        Some(piece)
    }
}

/// Pieces of `start..end` given sorted, disjoint `segments`.
pub fn pieces(start: usize, end: usize, segments: &[Segment]) -> Pieces<'_> {
    Pieces {
        pos: start,
        end,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Keyword;

    fn seg(start: usize, end: usize) -> Segment {
        Segment::new(start, end)
    }

    #[test]
    fn occurrences_do_not_overlap() {
        assert_eq!(find_occurrences("aaaa", "aa", false), vec![seg(0, 2), seg(2, 4)]);
    }

    #[test]
    fn case_insensitive_occurrences_map_to_original_offsets() {
        assert_eq!(find_occurrences("xÉtÉ", "été", true), vec![seg(1, 6)]);
        assert_eq!(find_occurrences("ABC abc", "b", true), vec![seg(1, 2), seg(5, 6)]);
    }

    #[test]
    fn empty_keyword_has_no_occurrence() {
        assert!(find_occurrences("abc", "", false).is_empty());
    }

    #[test]
    fn merge_joins_overlapping_and_touching() {
        let merged = sort_and_merge(vec![seg(2, 5), seg(0, 3), seg(5, 6), seg(8, 9)]);
        assert_eq!(merged, vec![seg(0, 6), seg(8, 9)]);
    }

    #[test]
    fn compute_ignores_absent_keywords() {
        let mut filter = Filter::with_keyword("abc");
        filter.push_keyword(Keyword::present("cde"));
        filter.push_keyword(Keyword::absent("e"));
        assert_eq!(compute("abcde", &filter), vec![seg(0, 5)]);
    }

    #[test]
    fn pieces_interleave_plain_and_highlighted() {
        let segments = [seg(2, 4), seg(6, 8)];
        let got: Vec<_> = pieces(0, 10, &segments)
            .map(|p| (p.highlighted, p.range))
            .collect();
        assert_eq!(
            got,
            vec![
                (false, 0..2),
                (true, 2..4),
                (false, 4..6),
                (true, 6..8),
                (false, 8..10),
            ]
        );
    }

    #[test]
    fn pieces_clip_to_window() {
        let segments = [seg(2, 6)];
        let got: Vec<_> = pieces(3, 5, &segments)
            .map(|p| (p.highlighted, p.range))
            .collect();
        assert_eq!(got, vec![(true, 3..5)]);
    }

    #[test]
    fn pieces_of_empty_window_is_empty() {
        assert_eq!(pieces(4, 4, &[seg(0, 9)]).count(), 0);
    }
}
