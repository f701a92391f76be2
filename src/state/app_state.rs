//! Session state: the source, its views, reload mode and prompts.
//!
//! AppState is the explicit session value the event loop threads through
//! every operation. It owns the raw content snapshot shared by the three
//! regular views and the help view, and routes each action either to
//! itself (views, reload, prompts, slots) or to the current view.

use crate::model::error::InputError;
use crate::model::{ContextPolicy, KeyAction, ViewConfig};
use crate::source::FileSource;
use crate::state::prompt::{Prompt, PromptKind};
use crate::state::text_view::{ScrollTarget, Status, TextView};
use crate::storage::SlotStore;
use crate::view_state::RawContent;
use tracing::{debug, info, warn};

/// Number of regular views.
pub const VIEW_COUNT: usize = 3;

/// Index of the help view.
pub const HELP_VIEW: usize = VIEW_COUNT;

// ===== ReloadMode =====

/// Whether the source is reloaded on modification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadMode {
    /// Reload only on request.
    #[default]
    Manual,
    /// Reload on change and scroll to the top.
    AutoHead,
    /// Reload on change and scroll to the end.
    AutoTail,
}

impl ReloadMode {
    fn scroll_target(self) -> ScrollTarget {
        match self {
            Self::AutoTail => ScrollTarget::Bottom,
            Self::Manual | Self::AutoHead => ScrollTarget::Top,
        }
    }
}

// ===== AppState =====

/// Root state of a viewing session.
#[derive(Debug)]
pub struct AppState {
    source: FileSource,
    raw: RawContent,
    views: Vec<TextView>,
    current: usize,
    /// View to return to when help closes.
    hidden: Option<usize>,
    reload_mode: ReloadMode,
    store: SlotStore,
    prompt: Option<Prompt>,
    status: Status,
}

impl AppState {
    /// Session over already loaded content.
    ///
    /// Every regular view starts with `config`; the help view starts empty
    /// with line numbers off (see [`with_help`](Self::with_help)).
    pub fn new(
        source: FileSource,
        raw: RawContent,
        store: SlotStore,
        config: ViewConfig,
        policy: ContextPolicy,
    ) -> Self {
        let mut views: Vec<TextView> = (1..=VIEW_COUNT)
            .map(|n| TextView::new(format!("View {n}"), config.clone(), policy.clone()))
            .collect();
        for view in &mut views {
            view.set_raw(raw.clone(), ScrollTarget::Top);
        }
        let help_config = ViewConfig {
            line_numbers: false,
            ..config.without_filters()
        };
        views.push(TextView::new("Help", help_config, policy));

        Self {
            source,
            raw,
            views,
            current: 0,
            hidden: None,
            reload_mode: ReloadMode::Manual,
            store,
            prompt: None,
            status: None,
        }
    }

    /// Loads `source` and builds a session over it.
    ///
    /// # Errors
    ///
    /// Returns the load failure; nothing is shown for an unreadable file.
    pub fn open(
        mut source: FileSource,
        store: SlotStore,
        config: ViewConfig,
        policy: ContextPolicy,
    ) -> Result<Self, InputError> {
        let raw = source.load()?;
        Ok(Self::new(source, raw, store, config, policy))
    }

    /// Sets the help view content.
    pub fn with_help(mut self, help: RawContent) -> Self {
        self.views[HELP_VIEW].set_raw(help, ScrollTarget::Top);
        self
    }

    /// Sets the initial reload mode. Auto tail also starts at the end.
    pub fn with_reload_mode(mut self, mode: ReloadMode) -> Self {
        self.reload_mode = mode;
        if mode == ReloadMode::AutoTail {
            for view in &mut self.views[..VIEW_COUNT] {
                view.execute(KeyAction::ScrollToBottom);
            }
        }
        self
    }

    // ===== Accessors =====

    /// View currently shown.
    pub fn current_view(&self) -> &TextView {
        &self.views[self.current]
    }

    /// Mutable access to the view currently shown.
    pub fn current_view_mut(&mut self) -> &mut TextView {
        &mut self.views[self.current]
    }

    /// View at `index` (`HELP_VIEW` for help).
    pub fn view(&self, index: usize) -> Option<&TextView> {
        self.views.get(index)
    }

    /// Index of the current view.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// True while the help view is shown.
    pub fn is_help_shown(&self) -> bool {
        self.current == HELP_VIEW
    }

    /// Source being viewed.
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Raw content shared by the regular views.
    pub fn raw(&self) -> &RawContent {
        &self.raw
    }

    /// Reload mode.
    pub fn reload_mode(&self) -> ReloadMode {
        self.reload_mode
    }

    /// Slot store.
    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Prompt being edited, if any.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Message for the bottom row.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replaces the status message.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    // ===== Layout =====

    /// Resizes every view to the terminal size. The bottom row is kept for
    /// the status line and prompts.
    pub fn resize(&mut self, width: usize, height: usize) {
        for view in &mut self.views {
            view.resize(width, height.saturating_sub(1));
        }
    }

    // ===== Actions =====

    /// Applies `action`. Returns true when the session should end.
    ///
    /// Quit closes the help view instead when it is shown.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        debug!(?action, view = self.current, "action");
        self.status = match action {
            KeyAction::Quit if self.is_help_shown() => self.close_help(),
            KeyAction::Quit => return true,
            KeyAction::PushFilter => self.open_prompt(PromptKind::NewFilter),
            KeyAction::PushKeyword => self.open_prompt(PromptKind::AddKeyword),
            KeyAction::EditKeyword => match self.current_view().last_keyword() {
                Some(keyword) => {
                    let text = keyword.text().to_string();
                    self.prompt = Some(Prompt::with_text(PromptKind::EditKeyword, text));
                    None
                }
                None => Some("No keyword to edit".to_string()),
            },
            KeyAction::Search if self.current_view().has_filters() => {
                Some("Cannot start search when filters already defined".to_string())
            }
            KeyAction::Search => self.open_prompt(PromptKind::Search),
            KeyAction::GotoLine => self.open_prompt(PromptKind::GotoLine),
            KeyAction::ShowView(index) => self.set_view(index, false),
            KeyAction::CopyToView(index) => self.set_view(index, true),
            KeyAction::ToggleHelp if self.is_help_shown() => self.close_help(),
            KeyAction::ToggleHelp => self.set_view(HELP_VIEW, false),
            KeyAction::ReloadHead => self.reload(ScrollTarget::Top),
            KeyAction::ReloadTail => self.reload(ScrollTarget::Bottom),
            KeyAction::AutoReloadHead => self.toggle_auto_reload(ReloadMode::AutoHead),
            KeyAction::AutoReloadTail => self.toggle_auto_reload(ReloadMode::AutoTail),
            KeyAction::SlotSave => self.views[self.current].slot_save(&mut self.store),
            KeyAction::SlotDelete => self.views[self.current].slot_delete(&mut self.store),
            KeyAction::SlotLoadNext => self.views[self.current].slot_load(&mut self.store, true),
            KeyAction::SlotLoadPrev => {
                self.views[self.current].slot_load(&mut self.store, false)
            }
            other => self.current_view_mut().execute(other),
        };
        false
    }

    fn set_view(&mut self, index: usize, copy_config: bool) -> Status {
        let Some(target) = self.views.get(index) else {
            return None;
        };
        if index == self.current {
            return Some(format!("Current view is already {}", target.name()));
        }
        self.hidden = (index == HELP_VIEW).then_some(self.current);
        if copy_config {
            let config = self.current_view().config().clone();
            self.views[index].set_config(config);
        }
        self.current = index;
        Some(format!("Switched to {}", self.current_view().name()))
    }

    /// Leaves the help view for the view shown before it.
    fn close_help(&mut self) -> Status {
        let previous = self.hidden.unwrap_or(0);
        self.set_view(previous, false)
    }

    // ===== Reload =====

    /// Reloads the source into every regular view.
    ///
    /// On failure the previous content is kept.
    fn reload(&mut self, target: ScrollTarget) -> Status {
        match self.source.load() {
            Ok(raw) => {
                for view in &mut self.views[..VIEW_COUNT] {
                    view.set_raw(raw.clone(), target);
                }
                self.raw = raw;
                Some("File reloaded".to_string())
            }
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous content");
                Some(format!("Reload failed: {e}"))
            }
        }
    }

    fn toggle_auto_reload(&mut self, mode: ReloadMode) -> Status {
        self.reload_mode = if self.reload_mode == mode {
            ReloadMode::Manual
        } else {
            mode
        };
        info!(mode = ?self.reload_mode, "reload mode changed");
        Some(format!("Auto reload {}", self.reload_mode != ReloadMode::Manual))
    }

    /// Poll tick: reloads when auto reload is on and the file changed.
    ///
    /// Returns true when the screen needs a redraw.
    pub fn poll(&mut self) -> bool {
        if self.reload_mode == ReloadMode::Manual {
            return false;
        }
        match self.source.has_changed() {
            Ok(false) => false,
            Ok(true) => {
                self.status = self.reload(self.reload_mode.scroll_target());
                true
            }
            Err(e) => {
                let status = Some(format!("Reload failed: {e}"));
                let changed = status != self.status;
                if changed {
                    warn!(error = %e, "source unavailable during auto reload");
                }
                self.status = status;
                changed
            }
        }
    }

    // ===== Prompt =====

    fn open_prompt(&mut self, kind: PromptKind) -> Status {
        self.prompt = Some(Prompt::new(kind));
        None
    }

    /// Applies an editing step to the open prompt.
    pub fn edit_prompt(&mut self, edit: impl FnOnce(Prompt) -> Prompt) {
        if let Some(prompt) = self.prompt.take() {
            self.prompt = Some(edit(prompt));
        }
    }

    /// Closes the prompt without effect.
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.status = None;
    }

    /// Closes the prompt and runs the command it was opened for.
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let text = prompt.text.as_str();
        let view = self.current_view_mut();
        let status = match prompt.kind {
            PromptKind::NewFilter => view.push_keyword(text, true),
            PromptKind::AddKeyword => view.push_keyword(text, false),
            PromptKind::EditKeyword => view.edit_last_keyword(text),
            PromptKind::Search => view.search(text),
            PromptKind::GotoLine => view.goto_line(text),
        };
        self.status = status;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
