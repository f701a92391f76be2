//! Input source: the text file being viewed.

pub mod file;

pub use file::FileSource;
