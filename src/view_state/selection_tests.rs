//! Tests for the selection engine.

use super::*;
use crate::model::{Filter, Keyword};

fn raw(lines: &[&str]) -> RawContent {
    RawContent::from_lines(lines.iter().copied())
}

fn sources(content: &SelectedContent) -> Vec<Option<usize>> {
    content.lines.iter().map(SelectedLine::source_index).collect()
}

fn stack(filters: Vec<Filter>) -> FilterStack {
    filters.into_iter().collect()
}

#[test]
fn no_filters_selects_everything() {
    let content = select(
        &raw(&["a", "b", "c"]),
        &FilterStack::new(),
        LineVisibility::OnlyMatching,
        SgrMode::Process,
    );
    assert_eq!(sources(&content), vec![Some(0), Some(1), Some(2)]);
    assert!(content.lines.iter().all(|l| l.filter.is_none()));
    assert!(content.hits.is_empty());
}

#[test]
fn only_matching_keeps_claimed_lines() {
    let content = select(
        &raw(&["def foo", "class Bar", "def init", "random"]),
        &stack(vec![Filter::with_keyword("def")]),
        LineVisibility::OnlyMatching,
        SgrMode::Process,
    );
    assert_eq!(sources(&content), vec![Some(0), Some(2)]);
    assert_eq!(content.hits, vec![2]);
    assert_eq!(content.lines[0].segments, vec![Segment::new(0, 3)]);
}

#[test]
fn all_shows_unclaimed_lines_without_color() {
    let content = select(
        &raw(&["def foo", "class Bar"]),
        &stack(vec![Filter::with_keyword("def")]),
        LineVisibility::All,
        SgrMode::Process,
    );
    assert_eq!(sources(&content), vec![Some(0), Some(1)]);
    assert_eq!(content.lines[0].filter, Some(0));
    assert_eq!(content.lines[1].filter, None);
    assert!(content.lines[1].segments.is_empty());
}

#[test]
fn hiding_filter_excludes_lines_in_every_mode() {
    let filters = stack(vec![
        Filter::with_keyword("noise").hidden(true),
        Filter::with_keyword("e"),
    ]);
    for visibility in [
        LineVisibility::OnlyMatching,
        LineVisibility::Context(3),
        LineVisibility::All,
    ] {
        let content = select(
            &raw(&["noise here", "keep me", "other"]),
            &filters,
            visibility,
            SgrMode::Process,
        );
        assert!(
            !sources(&content).contains(&Some(0)),
            "noise line selected with {visibility:?}"
        );
    }
}

#[test]
fn hidden_lines_still_count_as_hits() {
    let content = select(
        &raw(&["noise", "noise", "x"]),
        &stack(vec![Filter::with_keyword("noise").hidden(true)]),
        LineVisibility::All,
        SgrMode::Process,
    );
    assert_eq!(content.hits, vec![2]);
    assert_eq!(sources(&content), vec![Some(2)]);
}

#[test]
fn first_matching_filter_claims_the_line() {
    let content = select(
        &raw(&["error and warning"]),
        &stack(vec![Filter::with_keyword("warning"), Filter::with_keyword("error")]),
        LineVisibility::OnlyMatching,
        SgrMode::Process,
    );
    assert_eq!(content.lines[0].filter, Some(0));
    assert_eq!(content.hits, vec![1, 0]);
}

#[test]
fn context_reveals_neighbors_and_separates_groups() {
    let lines: Vec<String> = (0..12).map(|i| format!("line {i}")).collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    let mut filter = Filter::new();
    filter.push_keyword(Keyword::present("line 2"));
    let mut other = Filter::new();
    other.push_keyword(Keyword::present("line 9"));
    let content = select(
        &raw(&lines),
        &stack(vec![filter, other]),
        LineVisibility::Context(1),
        SgrMode::Process,
    );
    assert_eq!(
        sources(&content),
        vec![Some(1), Some(2), Some(3), None, Some(8), Some(9), Some(10)]
    );
    assert!(content.lines[3].is_separator());
}

#[test]
fn context_gap_gets_a_separator() {
    let content = select(
        &raw(&["a", "x", "b", "x", "a"]),
        &stack(vec![Filter::with_keyword("a")]),
        LineVisibility::Context(1),
        SgrMode::Process,
    );
    assert_eq!(
        sources(&content),
        vec![Some(0), Some(1), None, Some(3), Some(4)]
    );
}

#[test]
fn context_groups_that_touch_are_not_separated() {
    let content = select(
        &raw(&["a", "x", "x", "a"]),
        &stack(vec![Filter::with_keyword("a")]),
        LineVisibility::Context(1),
        SgrMode::Process,
    );
    assert_eq!(sources(&content), vec![Some(0), Some(1), Some(2), Some(3)]);
}

#[test]
fn matching_uses_visible_text_when_processing_sgr() {
    let content = select(
        &raw(&["\u{1b}[31mred\u{1b}[0m alert"]),
        &stack(vec![Filter::with_keyword("red alert")]),
        LineVisibility::OnlyMatching,
        SgrMode::Process,
    );
    assert_eq!(content.len(), 1);
    assert_eq!(content.lines[0].text, "red alert");
    assert_eq!(content.lines[0].styles.len(), 1);
}

#[test]
fn passthrough_keeps_sequences_in_text() {
    let content = select(
        &raw(&["\u{1b}[31mred\u{1b}[0m"]),
        &FilterStack::new(),
        LineVisibility::All,
        SgrMode::Passthrough,
    );
    assert_eq!(content.lines[0].text, "\u{1b}[31mred\u{1b}[0m");
}

#[test]
fn position_at_or_after_skips_separators() {
    let content = select(
        &raw(&["a", "x", "x", "x", "a"]),
        &stack(vec![Filter::with_keyword("a")]),
        LineVisibility::Context(1),
        SgrMode::Process,
    );
    assert_eq!(
        sources(&content),
        vec![Some(0), Some(1), None, Some(3), Some(4)]
    );
    assert_eq!(content.position_at_or_after(2), Some(3));
    assert_eq!(content.position_at_or_after(5), None);
}
