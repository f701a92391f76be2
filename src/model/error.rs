//! Error types for sift.
//!
//! Errors are grouped per layer with `thiserror` and compose upward via
//! `From`, so `?` carries them to the boundary that decides whether they
//! are fatal (startup) or become a status message (reload, slots).
//!
//! - [`AppError`] wraps every failure the application can surface.
//!   - [`InputError`] reading the source file.
//!   - [`SlotError`](crate::storage::SlotError) reading or writing slots.
//!   - `std::io::Error` terminal failures.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Input errors at startup and terminal errors are fatal. Input errors
/// during reload and slot errors are reported in the status line instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// The source file could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// A slot could not be read or written.
    #[error("Slot storage error: {0}")]
    Slot(#[from] crate::storage::SlotError),

    /// Terminal or rendering failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading the source file.
#[derive(Debug, Error)]
pub enum InputError {
    /// No file exists at the given path.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use sift::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.log"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.log"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Any other I/O failure (permissions, path is a directory, ...).
    #[error("Cannot read {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl InputError {
    /// Classifies an I/O error raised while accessing `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
