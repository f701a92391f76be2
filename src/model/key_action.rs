//! Domain-level keyboard actions independent of key bindings.

/// User intents that key bindings map to.
///
/// These represent what the user wants, not which key was pressed. The
/// mapping from `crossterm::event::KeyEvent` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Leave the application. Default: q/Ctrl+c
    Quit,

    // Scrolling
    /// Scroll up one row. Default: ↑
    ScrollUp,
    /// Scroll down one row. Default: ↓
    ScrollDown,
    /// Scroll one column left when wrapping is off. Default: ←
    ScrollLeft,
    /// Scroll one column right when wrapping is off. Default: →
    ScrollRight,
    /// Scroll several columns left. Default: Shift+←
    ScrollLeftFar,
    /// Scroll several columns right. Default: Shift+→
    ScrollRightFar,
    /// Scroll up one page. Default: b/Page Up/Shift+↑
    PageUp,
    /// Scroll down one page. Default: Space/Page Down/Shift+↓
    PageDown,
    /// Jump to the first row. Default: g/</Home
    ScrollToTop,
    /// Jump to the last row. Default: G/>/End
    ScrollToBottom,
    /// Scroll to the next line claimed by a filter. Default: n
    NextMatch,
    /// Scroll to the previous line claimed by a filter. Default: p
    PrevMatch,
    /// Prompt for a line number and scroll to it. Default: Tab/Ctrl+g
    GotoLine,
    /// Prompt for a less-like search (only without filters). Default: /
    Search,

    // Filter editing
    /// Prompt for a keyword and push it as a new filter. Default: f/Enter
    PushFilter,
    /// Prompt for a keyword and append it to the top filter. Default: +/=
    PushKeyword,
    /// Prompt to edit the top filter's last keyword. Default: e
    EditKeyword,
    /// Remove the top filter's last keyword. Default: -/_
    PopKeyword,
    /// Remove the top filter. Default: F/Backspace
    PopFilter,
    /// Swap the two most recent filters. Default: d/Ctrl+←/Ctrl+→
    SwapFilters,
    /// Rotate filter priorities up. Default: w/Ctrl+↑
    RotateFiltersUp,
    /// Rotate filter priorities down. Default: s/Ctrl+↓
    RotateFiltersDown,
    /// Toggle case sensitivity of the top filter. Default: i
    ToggleIgnoreCase,
    /// Toggle show/hide of the top filter. Default: x
    ToggleHiding,
    /// Toggle presence/absence of the top filter's last keyword. Default: ~
    ToggleKeywordPresence,
    /// Rotate the top filter's keywords left. Default: (
    RotateKeywordsLeft,
    /// Rotate the top filter's keywords right. Default: )
    RotateKeywordsRight,

    // Display toggles and cycles
    /// Toggle line numbers. Default: l
    ToggleLineNumbers,
    /// Toggle wrapping. Default: k
    ToggleWrap,
    /// Toggle bullets on wrapped lines. Default: *
    ToggleBullets,
    /// Toggle rendering spaces as dots. Default: .
    ToggleShowSpaces,
    /// Next line visibility level. Default: m
    NextLineVisibility,
    /// Previous line visibility level. Default: M
    PrevLineVisibility,
    /// Next colorize mode. Default: h
    NextColorizeMode,
    /// Previous colorize mode. Default: H
    PrevColorizeMode,
    /// Next SGR mode. Default: a
    NextSgrMode,
    /// Previous SGR mode. Default: A
    PrevSgrMode,
    /// Next palette. Default: c
    NextPalette,
    /// Previous palette. Default: C
    PrevPalette,

    // Slots
    /// Save the current configuration to a new slot. Default: \
    SlotSave,
    /// Delete the current slot. Default: |
    SlotDelete,
    /// Load the next slot. Default: ]
    SlotLoadNext,
    /// Load the previous slot. Default: [
    SlotLoadPrev,

    // Views
    /// Show view N (0-based). Default: 1/2/3
    ShowView(usize),
    /// Show view N and copy the current configuration into it. Default: !/@/#
    CopyToView(usize),
    /// Toggle the help view. Default: ?
    ToggleHelp,

    // Reload
    /// Reload the file and scroll to the top. Default: r
    ReloadHead,
    /// Reload the file and scroll to the end. Default: t
    ReloadTail,
    /// Toggle automatic reload on change. Default: R
    AutoReloadHead,
    /// Toggle automatic reload on change, following the end. Default: T
    AutoReloadTail,
}
