//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Character keys are matched on the character alone: terminals disagree
/// on whether Shift is reported for `G` or `?`, so Shift is ignored there.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Binds `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(normalize(key), action);
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Drops what does not identify a key: event kind, keyboard state, and
/// Shift on characters.
fn normalize(key: KeyEvent) -> KeyEvent {
    let mut modifiers = key.modifiers;
    if matches!(key.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(key.code, modifiers)
}

fn plain(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        let mut bind_all = |keys: &[KeyEvent], action: KeyAction| {
            for k in keys {
                bindings.bind(*k, action);
            }
        };

        // Application
        bind_all(&[plain('q'), ctrl(KeyCode::Char('c'))], KeyAction::Quit);
        bind_all(&[plain('?')], KeyAction::ToggleHelp);

        // Scrolling
        bind_all(&[key(KeyCode::Up)], KeyAction::ScrollUp);
        bind_all(&[key(KeyCode::Down)], KeyAction::ScrollDown);
        bind_all(&[key(KeyCode::Left)], KeyAction::ScrollLeft);
        bind_all(&[key(KeyCode::Right)], KeyAction::ScrollRight);
        bind_all(&[shift(KeyCode::Left)], KeyAction::ScrollLeftFar);
        bind_all(&[shift(KeyCode::Right)], KeyAction::ScrollRightFar);
        bind_all(
            &[plain('b'), key(KeyCode::PageUp), shift(KeyCode::Up)],
            KeyAction::PageUp,
        );
        bind_all(
            &[plain(' '), key(KeyCode::PageDown), shift(KeyCode::Down)],
            KeyAction::PageDown,
        );
        bind_all(
            &[plain('g'), plain('<'), key(KeyCode::Home)],
            KeyAction::ScrollToTop,
        );
        bind_all(
            &[plain('G'), plain('>'), key(KeyCode::End)],
            KeyAction::ScrollToBottom,
        );
        bind_all(&[plain('n')], KeyAction::NextMatch);
        bind_all(&[plain('p')], KeyAction::PrevMatch);
        bind_all(
            &[key(KeyCode::Tab), ctrl(KeyCode::Char('g'))],
            KeyAction::GotoLine,
        );
        bind_all(&[plain('/')], KeyAction::Search);

        // Filter editing
        bind_all(&[plain('f'), key(KeyCode::Enter)], KeyAction::PushFilter);
        bind_all(&[plain('+'), plain('=')], KeyAction::PushKeyword);
        bind_all(&[plain('e')], KeyAction::EditKeyword);
        bind_all(&[plain('-'), plain('_')], KeyAction::PopKeyword);
        bind_all(&[plain('F'), key(KeyCode::Backspace)], KeyAction::PopFilter);
        bind_all(
            &[plain('d'), ctrl(KeyCode::Left), ctrl(KeyCode::Right)],
            KeyAction::SwapFilters,
        );
        bind_all(&[plain('w'), ctrl(KeyCode::Up)], KeyAction::RotateFiltersUp);
        bind_all(&[plain('s'), ctrl(KeyCode::Down)], KeyAction::RotateFiltersDown);
        bind_all(&[plain('i')], KeyAction::ToggleIgnoreCase);
        bind_all(&[plain('x')], KeyAction::ToggleHiding);
        bind_all(&[plain('~')], KeyAction::ToggleKeywordPresence);
        bind_all(&[plain('(')], KeyAction::RotateKeywordsLeft);
        bind_all(&[plain(')')], KeyAction::RotateKeywordsRight);

        // Display
        bind_all(&[plain('l')], KeyAction::ToggleLineNumbers);
        bind_all(&[plain('k')], KeyAction::ToggleWrap);
        bind_all(&[plain('*')], KeyAction::ToggleBullets);
        bind_all(&[plain('.')], KeyAction::ToggleShowSpaces);
        bind_all(&[plain('m')], KeyAction::NextLineVisibility);
        bind_all(&[plain('M')], KeyAction::PrevLineVisibility);
        bind_all(&[plain('h')], KeyAction::NextColorizeMode);
        bind_all(&[plain('H')], KeyAction::PrevColorizeMode);
        bind_all(&[plain('a')], KeyAction::NextSgrMode);
        bind_all(&[plain('A')], KeyAction::PrevSgrMode);
        bind_all(&[plain('c')], KeyAction::NextPalette);
        bind_all(&[plain('C')], KeyAction::PrevPalette);

        // Slots
        bind_all(&[plain('\\')], KeyAction::SlotSave);
        bind_all(&[plain('|')], KeyAction::SlotDelete);
        bind_all(&[plain(']')], KeyAction::SlotLoadNext);
        bind_all(&[plain('[')], KeyAction::SlotLoadPrev);

        // Views
        for (index, (show, copy)) in [('1', '!'), ('2', '@'), ('3', '#')].into_iter().enumerate() {
            bind_all(&[plain(show)], KeyAction::ShowView(index));
            bind_all(&[plain(copy)], KeyAction::CopyToView(index));
        }

        // Reload
        bind_all(&[plain('r')], KeyAction::ReloadHead);
        bind_all(&[plain('t')], KeyAction::ReloadTail);
        bind_all(&[plain('R')], KeyAction::AutoReloadHead);
        bind_all(&[plain('T')], KeyAction::AutoReloadTail);

        bindings
    }
}
