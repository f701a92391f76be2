//! One text view: its configuration, derived content and scroll offsets.
//!
//! A view owns a snapshot of the raw content and recomputes selection and
//! layout whenever something upstream changes:
//!
//! - filters, line visibility or SGR mode: select + layout
//! - size, wrap, line numbers or bullets: layout only
//! - palette, colorize mode or show spaces: nothing (render-time only)
//!
//! Every command returns an optional status message for the bottom row.

use crate::model::{
    ContextPolicy, Cyclic, Filter, FilterStack, KeyAction, Keyword, LineVisibility, ViewConfig,
};
use crate::storage::{SlotError, SlotStore};
use crate::view_state::{layout, select, DisplayContent, Offsets, RawContent, SelectedContent};
use tracing::{debug, warn};

/// Optional message shown on the bottom row after a command.
pub type Status = Option<String>;

/// Columns moved by a far horizontal scroll.
pub const FAR_SCROLL: usize = 20;

/// Separator drawn after line numbers.
pub const NUMBER_SEPARATOR: &str = " │ ";

/// Prefix of wrapped lines when bullets are on.
pub const BULLET: &str = "◆ ";

/// Where to put the viewport after new raw content arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Keep the current top source line.
    Keep,
    /// First row.
    Top,
    /// Last page.
    Bottom,
}

fn on_off(value: bool) -> &'static str {
    if value {
        "enabled"
    } else {
        "disabled"
    }
}

/// A view over the shared raw content.
#[derive(Debug, Clone)]
pub struct TextView {
    name: String,
    config: ViewConfig,
    policy: ContextPolicy,
    raw: RawContent,
    selected: SelectedContent,
    display: DisplayContent,
    offsets: Offsets,
    width: usize,
    height: usize,
}

impl TextView {
    /// Empty view named `name`.
    pub fn new(name: impl Into<String>, config: ViewConfig, policy: ContextPolicy) -> Self {
        Self {
            name: name.into(),
            config,
            policy,
            raw: RawContent::default(),
            selected: SelectedContent::default(),
            display: DisplayContent::default(),
            offsets: Offsets::default(),
            width: 0,
            height: 0,
        }
    }

    // ===== Accessors =====

    /// Name shown in the status bar.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Raw content snapshot.
    pub fn raw(&self) -> &RawContent {
        &self.raw
    }

    /// Lines eligible for display.
    pub fn selected(&self) -> &SelectedContent {
        &self.selected
    }

    /// Rows for the current width.
    pub fn display(&self) -> &DisplayContent {
        &self.display
    }

    /// Scroll offsets.
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    /// True when at least one filter exists.
    pub fn has_filters(&self) -> bool {
        self.config.has_filters()
    }

    /// Last keyword of the top filter.
    pub fn last_keyword(&self) -> Option<&Keyword> {
        self.config.filters.top().and_then(Filter::last_keyword)
    }

    /// Total size given to the view: content, bar and filter rows.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Width of the line prefix (line number or bullet).
    pub fn prefix_width(&self) -> usize {
        if self.config.line_numbers {
            self.raw.line_number_width() + NUMBER_SEPARATOR.chars().count()
        } else if self.config.wrap && self.config.bullets {
            BULLET.chars().count()
        } else {
            0
        }
    }

    /// Rows available to content, below which the bar and filters sit.
    pub fn content_height(&self) -> usize {
        self.height.saturating_sub(1 + self.config.filters.len())
    }

    /// Columns available to content, after the prefix.
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(self.prefix_width())
    }

    // ===== Pipeline =====

    /// Resizes the view and lays the content out again.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Replaces the raw content and recomputes everything.
    pub fn set_raw(&mut self, raw: RawContent, target: ScrollTarget) {
        self.raw = raw;
        self.sync();
        match target {
            ScrollTarget::Keep => {}
            ScrollTarget::Top => {
                self.scroll_to(0);
            }
            ScrollTarget::Bottom => {
                self.scroll_to(usize::MAX);
            }
        }
    }

    /// Replaces the configuration and recomputes everything.
    pub fn set_config(&mut self, config: ViewConfig) {
        self.config = config;
        self.sync();
    }

    /// Source line at the top of the viewport, skipping separators.
    fn anchor(&self) -> Option<usize> {
        let row = self.display.get(self.offsets.vertical())?;
        self.selected.lines[row.selected..]
            .iter()
            .find_map(|l| l.source_index())
    }

    fn restore_anchor(&mut self, anchor: Option<usize>) {
        let row = anchor
            .and_then(|source| self.selected.position_at_or_after(source))
            .and_then(|selected| self.display.first_row_of(selected))
            .unwrap_or(self.offsets.vertical());
        self.scroll_to(row);
    }

    /// Recomputes selection and layout.
    fn sync(&mut self) {
        let anchor = self.anchor();
        self.selected = select(
            &self.raw,
            &self.config.filters,
            self.config.line_visibility,
            self.config.sgr_mode,
        );
        self.layout_keeping(anchor);
    }

    /// Recomputes layout only.
    fn relayout(&mut self) {
        let anchor = self.anchor();
        self.layout_keeping(anchor);
    }

    fn layout_keeping(&mut self, anchor: Option<usize>) {
        // Nothing is visible without columns; skip wrapping.
        let width = self.content_width();
        self.display = layout(&self.selected, width, self.config.wrap && width > 0);
        self.restore_anchor(anchor);
        debug!(
            view = %self.name,
            rows = self.display.len(),
            top = self.offsets.vertical(),
            "layout recomputed"
        );
    }

    // ===== Movement =====

    fn scroll_to(&mut self, row: usize) -> bool {
        self.offsets
            .set_vertical(row, self.display.len(), self.content_height())
    }

    fn scroll_by(&mut self, delta: isize) {
        let row = self.offsets.vertical().saturating_add_signed(delta);
        self.scroll_to(row);
    }

    fn scroll_columns(&mut self, delta: isize) {
        let column = self.offsets.horizontal().saturating_add_signed(delta);
        self.offsets.set_horizontal(column);
    }

    fn page(&self) -> isize {
        self.content_height().max(1) as isize
    }

    /// Scrolls to the next (or previous) line claimed by a filter.
    fn scroll_to_match(&mut self, starting: bool, forward: bool) -> Status {
        let end = if forward { "(END)" } else { "(BEGIN)" };
        let top = self.offsets.vertical();
        let Some(row) = self.display.get(top) else {
            return Some(end.to_string());
        };
        let count = self.selected.len();
        let mut candidate = Some(row.selected);
        if !starting {
            candidate = step(row.selected, forward, count);
        }
        let mut target = top;
        while let Some(index) = candidate {
            if self.selected.lines[index].filter.is_some() {
                target = self.display.first_row_of(index).unwrap_or(top);
                break;
            }
            candidate = step(index, forward, count);
        }
        self.scroll_to(target);
        if self.offsets.vertical() == top {
            Some(end.to_string())
        } else if forward {
            Some("Next match".to_string())
        } else {
            Some("Previous match".to_string())
        }
    }

    /// Scrolls so that source line `text` (1-based) is at the top.
    ///
    /// Out of range targets clamp to the first or last page.
    pub fn goto_line(&mut self, text: &str) -> Status {
        let Ok(line) = text.trim().parse::<i64>() else {
            return Some("Not a number".to_string());
        };
        let row = if line <= 1 {
            0
        } else {
            let source = usize::try_from(line - 1).unwrap_or(usize::MAX);
            self.selected
                .position_at_or_after(source)
                .and_then(|selected| self.display.first_row_of(selected))
                .unwrap_or(usize::MAX)
        };
        self.scroll_to(row);
        Some(format!("Goto line {line}"))
    }

    // ===== Filter editing =====

    /// Adds `text` as a keyword, to a new filter or to the top filter.
    ///
    /// Without filters a new filter is always created.
    pub fn push_keyword(&mut self, text: &str, new_filter: bool) -> Status {
        if text.is_empty() {
            return Some("No keyword added".to_string());
        }
        let new_filter = new_filter || !self.has_filters();
        if new_filter {
            self.config.filters.push(Filter::with_keyword(text));
        } else if let Some(top) = self.config.filters.top_mut() {
            top.push_keyword(Keyword::present(text));
        }
        self.changed();
        if new_filter {
            Some("New filter created".to_string())
        } else {
            Some("Keyword added".to_string())
        }
    }

    /// Replaces the text of the top filter's last keyword.
    pub fn edit_last_keyword(&mut self, text: &str) -> Status {
        let Some(top) = self.config.filters.top_mut() else {
            return Some("No keyword to edit".to_string());
        };
        if text.is_empty() || top.last_keyword().is_some_and(|k| k.text() == text) {
            return Some("No change made".to_string());
        }
        top.edit_last_keyword(text);
        self.changed();
        Some("Keyword updated".to_string())
    }

    /// Less-like search: one filter, every line shown, jump to first match.
    pub fn search(&mut self, text: &str) -> Status {
        if self.has_filters() {
            return Some("Cannot start search when filters already defined".to_string());
        }
        if text.is_empty() {
            return None;
        }
        self.config.line_visibility = LineVisibility::All;
        self.push_keyword(text, true);
        self.scroll_to_match(true, true);
        None
    }

    fn pop_filter(&mut self) -> Status {
        if self.config.filters.pop().is_none() {
            return Some("No filter to remove".to_string());
        }
        self.changed();
        Some("Filter removed".to_string())
    }

    fn pop_keyword(&mut self) -> Status {
        let Some(top) = self.config.filters.top_mut() else {
            return Some("No keyword to remove".to_string());
        };
        if top.keywords().len() <= 1 {
            return self.pop_filter();
        }
        top.pop_keyword();
        self.changed();
        Some("Keyword removed".to_string())
    }

    /// Applies `edit` to the top filter. `Ok` marks a change, `Err` leaves
    /// the filter as it was.
    fn edit_top(
        &mut self,
        edit: impl FnOnce(&mut Filter) -> Result<String, String>,
        none: &str,
    ) -> Status {
        let Some(top) = self.config.filters.top_mut() else {
            return Some(none.to_string());
        };
        match edit(top) {
            Ok(status) => {
                self.changed();
                Some(status)
            }
            Err(status) => Some(status),
        }
    }

    fn reorder(&mut self, reorder: fn(&mut FilterStack) -> bool, done: &str) -> Status {
        if !reorder(&mut self.config.filters) {
            return Some("Not enough filters".to_string());
        }
        self.changed();
        Some(done.to_string())
    }

    /// Marks the configuration dirty and recomputes the pipeline.
    fn changed(&mut self) {
        self.config.dirty = true;
        self.sync();
    }

    /// Marks the configuration dirty and recomputes layout only.
    fn relaid(&mut self) {
        self.config.dirty = true;
        self.relayout();
    }

    // ===== Slots =====

    /// Saves the configuration into a new slot.
    pub fn slot_save(&mut self, store: &mut SlotStore) -> Status {
        if !self.has_filters() {
            return Some("No filters to save".to_string());
        }
        if !self.config.dirty {
            return Some("No change to save".to_string());
        }
        match store.save(&self.config) {
            Ok(id) => {
                self.config.dirty = false;
                Some(format!("Filters saved in slot {id}"))
            }
            Err(e) => {
                warn!(error = %e, "slot save failed");
                Some(e.to_string())
            }
        }
    }

    /// Deletes the current slot.
    pub fn slot_delete(&mut self, store: &mut SlotStore) -> Status {
        match store.delete() {
            Ok(Some(id)) => {
                self.config.dirty = true;
                Some(format!("Slot {id} deleted"))
            }
            Ok(None) => Some("No slot loaded. Cannot delete current slot.".to_string()),
            Err(e) => {
                warn!(error = %e, "slot delete failed");
                Some(e.to_string())
            }
        }
    }

    /// Loads the next (or previous) slot into this view.
    ///
    /// An unreadable slot leaves the configuration untouched.
    pub fn slot_load(&mut self, store: &mut SlotStore, forward: bool) -> Status {
        match store.load(forward) {
            Ok(Some((id, config))) => {
                self.set_config(config);
                Some(format!("Slot {id} loaded"))
            }
            Ok(None) => Some("Nothing to load. All slots are empty.".to_string()),
            Err(e @ SlotError::Corrupt { .. }) => Some(e.to_string()),
            Err(e) => {
                warn!(error = %e, "slot load failed");
                Some(e.to_string())
            }
        }
    }

    // ===== Commands =====

    /// Runs a view-level command. Returns `None` for commands this view
    /// does not handle or that produce no message.
    pub fn execute(&mut self, action: KeyAction) -> Status {
        match action {
            KeyAction::ScrollUp => self.scroll_by(-1),
            KeyAction::ScrollDown => self.scroll_by(1),
            KeyAction::ScrollLeft => self.scroll_columns(-1),
            KeyAction::ScrollRight => self.scroll_columns(1),
            KeyAction::ScrollLeftFar => self.scroll_columns(-(FAR_SCROLL as isize)),
            KeyAction::ScrollRightFar => self.scroll_columns(FAR_SCROLL as isize),
            KeyAction::PageUp => self.scroll_by(-self.page()),
            KeyAction::PageDown => self.scroll_by(self.page()),
            KeyAction::ScrollToTop => {
                self.scroll_to(0);
            }
            KeyAction::ScrollToBottom => {
                self.scroll_to(usize::MAX);
            }
            KeyAction::NextMatch => return self.scroll_to_match(false, true),
            KeyAction::PrevMatch => return self.scroll_to_match(false, false),

            KeyAction::PopFilter => return self.pop_filter(),
            KeyAction::PopKeyword => return self.pop_keyword(),
            KeyAction::SwapFilters => return self.reorder(|s| s.swap_top(), "Filters swapped"),
            KeyAction::RotateFiltersUp => return self.reorder(|s| s.rotate_up(), "Filters rotated"),
            KeyAction::RotateFiltersDown => {
                return self.reorder(|s| s.rotate_down(), "Filters rotated")
            }
            KeyAction::ToggleIgnoreCase => {
                return self.edit_top(
                    |f| Ok(format!("Ignore case set to {}", f.toggle_ignore_case())),
                    "Cannot change case sentitivity (no keyword)",
                )
            }
            KeyAction::ToggleHiding => {
                return self.edit_top(
                    |f| {
                        let action = if f.toggle_hiding() { "hidden" } else { "shown" };
                        Ok(format!("Lines matching filter are now {action}"))
                    },
                    "Cannot change filter property (no filter)",
                )
            }
            KeyAction::ToggleKeywordPresence => {
                return self.edit_top(
                    |f| match f.toggle_last_presence() {
                        Some(true) => Ok("Keyword must be present".to_string()),
                        Some(false) => Ok("Keyword must be absent".to_string()),
                        None => Err("No keyword to toggle".to_string()),
                    },
                    "No keyword to toggle",
                )
            }
            KeyAction::RotateKeywordsLeft | KeyAction::RotateKeywordsRight => {
                return self.edit_top(
                    |f| {
                        if f.keywords().len() < 2 {
                            return Err("Not enough keywords".to_string());
                        }
                        if action == KeyAction::RotateKeywordsLeft {
                            f.rotate_keywords_left();
                        } else {
                            f.rotate_keywords_right();
                        }
                        Ok("Keywords rotated".to_string())
                    },
                    "Not enough keywords",
                )
            }

            KeyAction::ToggleLineNumbers => {
                self.config.line_numbers = !self.config.line_numbers;
                self.relaid();
                return Some(format!("Line numbers {}", on_off(self.config.line_numbers)));
            }
            KeyAction::ToggleWrap => {
                self.config.wrap = !self.config.wrap;
                self.relaid();
                return Some(format!("Line wrapping {}", on_off(self.config.wrap)));
            }
            KeyAction::ToggleBullets => {
                self.config.bullets = !self.config.bullets;
                self.relaid();
                return Some(format!("Bullets {}", on_off(self.config.bullets)));
            }
            KeyAction::ToggleShowSpaces => {
                self.config.show_spaces = !self.config.show_spaces;
                self.config.dirty = true;
                return Some(format!("Show spaces {}", on_off(self.config.show_spaces)));
            }
            KeyAction::NextLineVisibility | KeyAction::PrevLineVisibility => {
                let current = self.config.line_visibility;
                self.config.line_visibility = if action == KeyAction::NextLineVisibility {
                    self.policy.next(current)
                } else {
                    self.policy.prev(current)
                };
                self.changed();
                return Some(self.config.line_visibility.to_string());
            }
            KeyAction::NextColorizeMode | KeyAction::PrevColorizeMode => {
                let mode = self.config.colorize_mode;
                self.config.colorize_mode = if action == KeyAction::NextColorizeMode {
                    mode.next()
                } else {
                    mode.prev()
                };
                self.config.dirty = true;
                return Some(format!("Colorize mode: {}", self.config.colorize_mode));
            }
            KeyAction::NextSgrMode | KeyAction::PrevSgrMode => {
                let mode = self.config.sgr_mode;
                self.config.sgr_mode = if action == KeyAction::NextSgrMode {
                    mode.next()
                } else {
                    mode.prev()
                };
                self.changed();
                return Some(self.config.sgr_mode.to_string());
            }
            KeyAction::NextPalette | KeyAction::PrevPalette => {
                let palette = self.config.palette;
                self.config.palette = if action == KeyAction::NextPalette {
                    palette.next()
                } else {
                    palette.prev()
                };
                self.config.dirty = true;
                return Some(format!("Using color palette {}", self.config.palette));
            }
            _ => {}
        }
        None
    }
}

fn step(index: usize, forward: bool, count: usize) -> Option<usize> {
    if forward {
        Some(index + 1).filter(|i| *i < count)
    } else {
        index.checked_sub(1)
    }
}

#[cfg(test)]
#[path = "text_view_tests.rs"]
mod tests;
