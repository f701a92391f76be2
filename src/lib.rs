//! sift
//!
//! Terminal viewer that reveals lines of a text file by stacking keyword
//! filters. Each filter claims the lines matching all of its keywords and
//! colors them; unclaimed lines stay hidden once a filter exists.
//!
//! Pure core, impure shell:
//! - `model`, `view_state`: filters, modes and the raw → selected →
//!   display pipeline
//! - `state`: views and the session value threaded through the event loop
//! - `source`, `storage`, `config`, `logging`: file, slot and environment I/O
//! - `view`: terminal setup, event loop and rendering

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod storage;
pub mod view;
pub mod view_state;
