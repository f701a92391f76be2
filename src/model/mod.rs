//! Domain model types (pure).
//!
//! Filters, display modes and per-view configuration. Nothing here touches
//! the terminal or the filesystem.

pub mod error;
pub mod filter;
pub mod key_action;
pub mod modes;
pub mod view_config;

pub use error::{AppError, InputError};
pub use filter::{Filter, FilterStack, Keyword};
pub use key_action::KeyAction;
pub use modes::{
    ColorizeMode, ContextPolicy, Cyclic, LineVisibility, PaletteId, SgrMode, PALETTE_COUNT,
};
pub use view_config::ViewConfig;
