//! Session state (pure apart from file and slot I/O).
//!
//! - `prompt`: line editing for keyword, search and goto prompts
//! - `text_view`: one view's configuration, derived content and commands
//! - `app_state`: the session value routing actions to views

pub mod app_state;
pub mod prompt;
pub mod text_view;

pub use app_state::{AppState, ReloadMode, HELP_VIEW, VIEW_COUNT};
pub use prompt::{Prompt, PromptKind};
pub use text_view::{ScrollTarget, Status, TextView};
