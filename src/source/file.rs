//! Source file loading and modification polling.
//!
//! The file is read whole on every load. Auto reload compares the file's
//! modification time and length at each poll tick against those recorded
//! by the last successful load.

use crate::model::error::InputError;
use crate::view_state::RawContent;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Modification time and length of the file.
type Stamp = (SystemTime, u64);

/// A line-oriented text file shown by the viewer.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    loaded: Option<Stamp>,
}

impl FileSource {
    /// Source for `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: None,
        }
    }

    /// Path as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories, for the status bar.
    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Reads the whole file into a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` when the file does not exist and
    /// `InputError::Io` for any other read failure. The last recorded
    /// stamp is left unchanged on error.
    pub fn load(&mut self) -> Result<RawContent, InputError> {
        let bytes = fs::read(&self.path).map_err(|e| InputError::from_io(&self.path, e))?;
        let content = RawContent::from_bytes(&bytes);
        self.loaded = self.stamp().ok();
        info!(
            path = %self.path.display(),
            lines = content.len(),
            bytes = bytes.len(),
            "source loaded"
        );
        Ok(content)
    }

    /// Whether the file's modification time or length differs from the
    /// last load.
    ///
    /// # Errors
    ///
    /// Fails when the file metadata cannot be read, e.g. the file was
    /// removed.
    pub fn has_changed(&self) -> Result<bool, InputError> {
        let current = self.stamp()?;
        let changed = self.loaded != Some(current);
        if changed {
            debug!(path = %self.path.display(), "source modification detected");
        }
        Ok(changed)
    }

    fn stamp(&self) -> Result<Stamp, InputError> {
        fs::metadata(&self.path)
            .and_then(|m| Ok((m.modified()?, m.len())))
            .map_err(|e| InputError::from_io(&self.path, e))
    }
}
