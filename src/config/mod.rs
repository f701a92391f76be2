//! Configuration module.
//!
//! - `loader`: TOML config file, environment and CLI precedence
//! - `keybindings`: key events to actions

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{resolve, CliOverrides, ConfigError, ConfigFile, ResolvedConfig};
