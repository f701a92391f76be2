//! Tests for TextView commands.

use super::*;
use tempfile::TempDir;

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("line {i}")).collect()
}

fn view_of<S: AsRef<str>>(lines: &[S], width: usize, height: usize) -> TextView {
    let mut view = TextView::new("View 1", ViewConfig::default(), ContextPolicy::default());
    view.resize(width, height);
    view.set_raw(RawContent::from_lines(lines), ScrollTarget::Top);
    view
}

fn top_source(view: &TextView) -> Option<usize> {
    let row = view.display().get(view.offsets().vertical())?;
    view.selected().lines[row.selected].source_index()
}

fn status(text: &str) -> Status {
    Some(text.to_string())
}

// ===== Filters =====

#[test]
fn no_filters_shows_every_line() {
    let view = view_of(&numbered(5), 80, 10);
    assert_eq!(view.display().len(), 5);
    assert!(!view.config().dirty);
}

#[test]
fn push_keyword_creates_filter_and_reselects() {
    let mut view = view_of(&["def foo", "class Bar", "def init", "random"], 80, 10);
    assert_eq!(view.push_keyword("def", true), status("New filter created"));
    let sources: Vec<_> = view
        .selected()
        .lines
        .iter()
        .map(|l| l.source_index())
        .collect();
    assert_eq!(sources, vec![Some(0), Some(2)]);
    assert!(view.config().dirty);
}

#[test]
fn push_keyword_without_filters_forces_new_filter() {
    let mut view = view_of(&["a"], 80, 10);
    assert_eq!(view.push_keyword("a", false), status("New filter created"));
    assert_eq!(view.push_keyword("b", false), status("Keyword added"));
    assert_eq!(view.config().filters.len(), 1);
    assert_eq!(view.push_keyword("", false), status("No keyword added"));
}

#[test]
fn pop_keyword_on_single_keyword_pops_filter() {
    let mut view = view_of(&["a"], 80, 10);
    view.push_keyword("a", true);
    assert_eq!(view.execute(KeyAction::PopKeyword), status("Filter removed"));
    assert_eq!(view.execute(KeyAction::PopKeyword), status("No keyword to remove"));
    assert_eq!(view.execute(KeyAction::PopFilter), status("No filter to remove"));
}

#[test]
fn commands_on_missing_filter_report_it() {
    let mut view = view_of(&["a"], 80, 10);
    assert_eq!(
        view.execute(KeyAction::ToggleIgnoreCase),
        status("Cannot change case sentitivity (no keyword)")
    );
    assert_eq!(
        view.execute(KeyAction::ToggleHiding),
        status("Cannot change filter property (no filter)")
    );
    assert_eq!(view.execute(KeyAction::SwapFilters), status("Not enough filters"));
    assert!(!view.config().dirty);
}

#[test]
fn toggle_flags_report_new_state() {
    let mut view = view_of(&["Alpha"], 80, 10);
    view.push_keyword("alpha", true);
    assert_eq!(
        view.execute(KeyAction::ToggleIgnoreCase),
        status("Ignore case set to false")
    );
    assert!(view.selected().is_empty());
    assert_eq!(
        view.execute(KeyAction::ToggleHiding),
        status("Lines matching filter are now hidden")
    );
    assert_eq!(
        view.execute(KeyAction::ToggleKeywordPresence),
        status("Keyword must be absent")
    );
}

#[test]
fn rotate_keywords_needs_two() {
    let mut view = view_of(&["a b"], 80, 10);
    view.push_keyword("a", true);
    assert_eq!(
        view.execute(KeyAction::RotateKeywordsLeft),
        status("Not enough keywords")
    );
    view.push_keyword("b", false);
    assert_eq!(
        view.execute(KeyAction::RotateKeywordsRight),
        status("Keywords rotated")
    );
    assert_eq!(view.last_keyword().map(Keyword::text), Some("a"));
}

#[test]
fn swap_and_rotate_filters() {
    let mut view = view_of(&["a", "b"], 80, 10);
    view.push_keyword("a", true);
    view.push_keyword("b", true);
    assert_eq!(view.execute(KeyAction::SwapFilters), status("Filters swapped"));
    assert_eq!(view.last_keyword().map(Keyword::text), Some("a"));
    assert_eq!(
        view.execute(KeyAction::RotateFiltersUp),
        status("Filters rotated")
    );
    assert_eq!(view.last_keyword().map(Keyword::text), Some("b"));
}

#[test]
fn edit_keyword_keeps_presence() {
    let mut view = view_of(&["foo", "bar"], 80, 10);
    assert_eq!(view.edit_last_keyword("x"), status("No keyword to edit"));
    view.push_keyword("foo", true);
    view.execute(KeyAction::ToggleKeywordPresence);
    assert_eq!(view.edit_last_keyword("bar"), status("Keyword updated"));
    let keyword = view.last_keyword().unwrap();
    assert_eq!(keyword.text(), "bar");
    assert!(!keyword.is_present());
    assert_eq!(view.edit_last_keyword("bar"), status("No change made"));
    assert_eq!(view.edit_last_keyword(""), status("No change made"));
}

// ===== Display toggles and cycles =====

#[test]
fn toggles_and_cycles_have_messages() {
    let mut view = view_of(&["a"], 80, 10);
    assert_eq!(
        view.execute(KeyAction::ToggleLineNumbers),
        status("Line numbers enabled")
    );
    assert_eq!(
        view.execute(KeyAction::ToggleWrap),
        status("Line wrapping disabled")
    );
    assert_eq!(view.execute(KeyAction::ToggleBullets), status("Bullets enabled"));
    assert_eq!(
        view.execute(KeyAction::ToggleShowSpaces),
        status("Show spaces enabled")
    );
    assert_eq!(
        view.execute(KeyAction::NextPalette),
        status("Using color palette #1")
    );
    assert_eq!(
        view.execute(KeyAction::NextColorizeMode),
        status("Colorize mode: Keyword")
    );
    assert_eq!(
        view.execute(KeyAction::NextLineVisibility),
        status("Reveal 1 line above/below matching")
    );
    assert_eq!(
        view.execute(KeyAction::PrevSgrMode),
        status("Do not process SGR (passthrough)")
    );
}

#[test]
fn prefix_width_follows_flags() {
    let mut view = view_of(&numbered(100), 80, 10);
    assert_eq!(view.prefix_width(), 0);
    view.execute(KeyAction::ToggleBullets);
    assert_eq!(view.prefix_width(), 2);
    view.execute(KeyAction::ToggleLineNumbers);
    assert_eq!(view.prefix_width(), 6);
    assert_eq!(view.content_width(), 74);
}

// ===== Movement =====

#[test]
fn page_and_edges() {
    let mut view = view_of(&numbered(100), 80, 11);
    assert_eq!(view.content_height(), 10);
    view.execute(KeyAction::PageDown);
    assert_eq!(view.offsets().vertical(), 10);
    view.execute(KeyAction::ScrollToBottom);
    assert_eq!(view.offsets().vertical(), 90);
    view.execute(KeyAction::ScrollDown);
    assert_eq!(view.offsets().vertical(), 90);
    view.execute(KeyAction::ScrollToTop);
    view.execute(KeyAction::ScrollUp);
    assert_eq!(view.offsets().vertical(), 0);
}

#[test]
fn horizontal_scroll_never_goes_negative() {
    let mut view = view_of(&numbered(3), 80, 10);
    view.execute(KeyAction::ScrollRightFar);
    assert_eq!(view.offsets().horizontal(), 20);
    view.execute(KeyAction::ScrollLeft);
    assert_eq!(view.offsets().horizontal(), 19);
    view.execute(KeyAction::ScrollLeftFar);
    assert_eq!(view.offsets().horizontal(), 0);
}

#[test]
fn goto_line_is_one_based_and_clamped() {
    let mut view = view_of(&numbered(100), 80, 11);
    assert_eq!(view.goto_line("50"), status("Goto line 50"));
    assert_eq!(top_source(&view), Some(49));
    view.goto_line("1000");
    assert_eq!(view.offsets().vertical(), 90);
    view.goto_line("-3");
    assert_eq!(view.offsets().vertical(), 0);
    assert_eq!(view.goto_line("abc"), status("Not a number"));
}

#[test]
fn match_navigation_stops_at_ends() {
    let mut view = view_of(&["a", "x", "x", "a", "x"], 80, 4);
    view.push_keyword("a", true);
    view.execute(KeyAction::PrevLineVisibility);
    assert_eq!(view.display().len(), 5);

    assert_eq!(view.execute(KeyAction::NextMatch), status("Next match"));
    assert_eq!(view.offsets().vertical(), 3);
    assert_eq!(view.execute(KeyAction::NextMatch), status("(END)"));
    assert_eq!(view.execute(KeyAction::PrevMatch), status("Previous match"));
    assert_eq!(view.offsets().vertical(), 0);
    assert_eq!(view.execute(KeyAction::PrevMatch), status("(BEGIN)"));
}

#[test]
fn anchor_survives_visibility_change() {
    let mut view = view_of(&numbered(100), 80, 5);
    view.push_keyword("line 5", true);
    assert_eq!(view.display().len(), 11);
    view.goto_line("52");
    assert_eq!(top_source(&view), Some(51));

    view.execute(KeyAction::PrevLineVisibility);
    assert_eq!(view.config().line_visibility, LineVisibility::All);
    assert_eq!(top_source(&view), Some(51));
}

#[test]
fn search_shows_all_lines_and_jumps_to_match() {
    let mut lines = numbered(30);
    lines[20] = "the target".to_string();
    let mut view = view_of(&lines, 80, 6);

    assert_eq!(view.search("target"), None);
    assert_eq!(view.config().line_visibility, LineVisibility::All);
    assert_eq!(view.display().len(), 30);
    assert_eq!(top_source(&view), Some(20));

    assert_eq!(
        view.search("again"),
        status("Cannot start search when filters already defined")
    );
}

#[test]
fn raw_replacement_can_scroll_to_bottom() {
    let mut view = view_of(&numbered(10), 80, 5);
    view.set_raw(RawContent::from_lines(numbered(50)), ScrollTarget::Bottom);
    assert_eq!(view.offsets().vertical(), 46);
    view.set_raw(RawContent::from_lines(numbered(60)), ScrollTarget::Keep);
    assert_eq!(view.offsets().vertical(), 46);
}

// ===== Slots =====

#[test]
fn slot_commands_report_outcomes() {
    let dir = TempDir::new().unwrap();
    let mut store = SlotStore::open(dir.path().join("slots")).unwrap();
    let mut view = view_of(&["error one", "warning two"], 80, 10);

    assert_eq!(view.slot_save(&mut store), status("No filters to save"));
    assert_eq!(
        view.slot_load(&mut store, true),
        status("Nothing to load. All slots are empty.")
    );

    view.push_keyword("error", true);
    assert_eq!(view.slot_save(&mut store), status("Filters saved in slot 0"));
    assert_eq!(view.slot_save(&mut store), status("No change to save"));

    view.execute(KeyAction::PopFilter);
    assert_eq!(view.slot_load(&mut store, true), status("Slot 0 loaded"));
    assert_eq!(view.last_keyword().map(Keyword::text), Some("error"));
    assert_eq!(view.selected().len(), 1);

    assert_eq!(view.slot_delete(&mut store), status("Slot 0 deleted"));
    assert_eq!(
        view.slot_delete(&mut store),
        status("No slot loaded. Cannot delete current slot.")
    );
}
