//! Single-line prompt editing (pure state transitions).
//!
//! A prompt collects a keyword, a search term or a line number on the
//! bottom row. Every function takes the prompt by value and returns the
//! updated prompt; the event loop maps keys onto them.
//!
//! The cursor counts characters, not bytes.

/// What the entered text will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Keyword starting a new filter.
    NewFilter,
    /// Keyword appended to the top filter.
    AddKeyword,
    /// Replacement text for the top filter's last keyword.
    EditKeyword,
    /// Less-like search term.
    Search,
    /// 1-based line number.
    GotoLine,
}

impl PromptKind {
    /// Label drawn before the text.
    pub fn label(self) -> &'static str {
        match self {
            Self::NewFilter | Self::AddKeyword | Self::Search => "Keyword: ",
            Self::EditKeyword => "Edit: ",
            Self::GotoLine => "Enter line: ",
        }
    }
}

/// Prompt being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Purpose of the prompt.
    pub kind: PromptKind,
    /// Text entered so far.
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

impl Prompt {
    /// Empty prompt.
    pub fn new(kind: PromptKind) -> Self {
        Self::with_text(kind, String::new())
    }

    /// Prompt prefilled with `text`, cursor at the end.
    pub fn with_text(kind: PromptKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { kind, text, cursor }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Inserts `ch` at the cursor and advances it.
pub fn insert_char(mut prompt: Prompt, ch: char) -> Prompt {
    let at = prompt.byte_index(prompt.cursor);
    prompt.text.insert(at, ch);
    prompt.cursor += 1;
    prompt
}

/// Deletes the character before the cursor.
pub fn backspace(mut prompt: Prompt) -> Prompt {
    if prompt.cursor == 0 {
        return prompt;
    }
    let at = prompt.byte_index(prompt.cursor - 1);
    prompt.text.remove(at);
    prompt.cursor -= 1;
    prompt
}

/// Deletes the character under the cursor.
pub fn delete(mut prompt: Prompt) -> Prompt {
    if prompt.cursor < prompt.char_len() {
        let at = prompt.byte_index(prompt.cursor);
        prompt.text.remove(at);
    }
    prompt
}

/// Moves the cursor one character left, saturating at 0.
pub fn cursor_left(mut prompt: Prompt) -> Prompt {
    prompt.cursor = prompt.cursor.saturating_sub(1);
    prompt
}

/// Moves the cursor one character right, saturating at the end.
pub fn cursor_right(mut prompt: Prompt) -> Prompt {
    prompt.cursor = (prompt.cursor + 1).min(prompt.char_len());
    prompt
}

/// Moves the cursor to the start.
pub fn cursor_home(mut prompt: Prompt) -> Prompt {
    prompt.cursor = 0;
    prompt
}

/// Moves the cursor past the last character.
pub fn cursor_end(mut prompt: Prompt) -> Prompt {
    prompt.cursor = prompt.char_len();
    prompt
}

/// Clears the text.
pub fn clear(mut prompt: Prompt) -> Prompt {
    prompt.text.clear();
    prompt.cursor = 0;
    prompt
}
