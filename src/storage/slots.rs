//! Numbered slot files holding saved view configurations.
//!
//! A slot directory contains files named `NNN.json`. Saving always creates
//! a new slot with the next free number and makes it current; loading moves
//! the current slot cyclically; deleting removes the current slot and leaves
//! no slot current.

use crate::model::{
    ColorizeMode, Filter, FilterStack, Keyword, LineVisibility, PaletteId, SgrMode, ViewConfig,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const SUFFIX: &str = ".json";

/// Slot number as shown to the user.
pub type SlotId = u32;

/// Errors from the slot store.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The slot directory or a slot file could not be accessed.
    #[error("Slot storage I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A slot file exists but does not hold a readable record.
    #[error("Slot {id} is unreadable: {source}")]
    Corrupt {
        /// Slot number.
        id: SlotId,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be encoded.
    #[error("Cannot encode slot: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The highest slot number is taken, so no later number exists.
    #[error("No slot number left after {last}")]
    NoFreeSlot {
        /// Highest existing slot number.
        last: SlotId,
    },
}

// ===== Records =====

/// Serialized keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordRecord {
    /// Literal text.
    pub text: String,
    /// Must occur (true) or must not occur (false).
    pub present: bool,
}

impl Default for KeywordRecord {
    fn default() -> Self {
        Self {
            text: String::new(),
            present: true,
        }
    }
}

/// Serialized filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRecord {
    /// Keywords in entry order.
    pub keywords: Vec<KeywordRecord>,
    /// Case-insensitive comparisons.
    pub ignore_case: bool,
    /// Lines matching the filter are hidden.
    pub hiding: bool,
}

impl From<&Filter> for FilterRecord {
    fn from(filter: &Filter) -> Self {
        Self {
            keywords: filter
                .keywords()
                .iter()
                .map(|k| KeywordRecord {
                    text: k.text().to_string(),
                    present: k.is_present(),
                })
                .collect(),
            ignore_case: filter.ignore_case(),
            hiding: filter.is_hiding(),
        }
    }
}

impl From<FilterRecord> for Filter {
    fn from(record: FilterRecord) -> Self {
        let mut filter = Filter::new()
            .ignoring_case(record.ignore_case)
            .hidden(record.hiding);
        for keyword in record.keywords {
            let keyword = if keyword.present {
                Keyword::present(keyword.text)
            } else {
                Keyword::absent(keyword.text)
            };
            filter.push_keyword(keyword);
        }
        filter
    }
}

/// Field value, or its default when the stored value is not one this
/// version understands.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        warn!(error = %e, "unknown slot field value, using default");
        T::default()
    }))
}

/// On-disk content of a slot.
///
/// Every field has a default and unknown fields are ignored, so records
/// written by other versions still load. Mode values this version does not
/// know fall back to the default mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotRecord {
    /// Filters in priority order.
    pub filters: Vec<FilterRecord>,
    /// Line visibility level.
    #[serde(deserialize_with = "or_default")]
    pub line_visibility: LineVisibility,
    /// Wrap long lines.
    pub wrap: bool,
    /// Show line numbers.
    pub line_numbers: bool,
    /// Show bullets on wrapped lines.
    pub bullets: bool,
    /// Show spaces as dots.
    pub show_spaces: bool,
    /// Colorize mode.
    #[serde(deserialize_with = "or_default")]
    pub colorize_mode: ColorizeMode,
    /// Highlight palette.
    #[serde(deserialize_with = "or_default")]
    pub palette: PaletteId,
    /// SGR handling.
    #[serde(deserialize_with = "or_default")]
    pub sgr_mode: SgrMode,
    /// When the slot was written.
    #[serde(deserialize_with = "or_default")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for SlotRecord {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl SlotRecord {
    /// Snapshot of `config`, without a timestamp.
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            filters: config.filters.iter().map(FilterRecord::from).collect(),
            line_visibility: config.line_visibility,
            wrap: config.wrap,
            line_numbers: config.line_numbers,
            bullets: config.bullets,
            show_spaces: config.show_spaces,
            colorize_mode: config.colorize_mode,
            palette: config.palette,
            sgr_mode: config.sgr_mode,
            saved_at: None,
        }
    }

    /// Configuration described by the record, marked clean.
    pub fn into_config(self) -> ViewConfig {
        ViewConfig {
            filters: self.filters.into_iter().map(Filter::from).collect::<FilterStack>(),
            line_visibility: self.line_visibility,
            wrap: self.wrap,
            line_numbers: self.line_numbers,
            bullets: self.bullets,
            show_spaces: self.show_spaces,
            colorize_mode: self.colorize_mode,
            palette: self.palette,
            sgr_mode: self.sgr_mode,
            dirty: false,
        }
    }
}

// ===== SlotStore =====

/// Numbered slots in one directory.
#[derive(Debug)]
pub struct SlotStore {
    dir: PathBuf,
    ids: Vec<SlotId>,
    current: Option<usize>,
}

impl SlotStore {
    /// Opens the store at `dir`. The directory is created on first save.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SlotError> {
        let mut store = Self {
            dir: dir.into(),
            ids: Vec::new(),
            current: None,
        };
        store.scan()?;
        debug!(dir = %store.dir.display(), slots = store.ids.len(), "slot store opened");
        Ok(store)
    }

    /// Directory holding the slots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Existing slot numbers, ascending.
    pub fn ids(&self) -> &[SlotId] {
        &self.ids
    }

    /// Slot most recently saved or loaded, if not deleted since.
    pub fn current(&self) -> Option<SlotId> {
        self.current.and_then(|i| self.ids.get(i).copied())
    }

    /// Whether any slot exists.
    pub fn can_load(&self) -> bool {
        !self.ids.is_empty()
    }

    fn path_of(&self, id: SlotId) -> PathBuf {
        self.dir.join(format!("{id:03}{SUFFIX}"))
    }

    fn scan(&mut self) -> Result<(), SlotError> {
        self.ids.clear();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(SlotError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(SUFFIX)) else {
                continue;
            };
            if let Ok(id) = stem.parse::<SlotId>() {
                self.ids.push(id);
            }
        }
        self.ids.sort_unstable();
        self.ids.dedup();
        Ok(())
    }

    /// Saves `config` into a new slot, which becomes current.
    ///
    /// The record is written to a temporary file in the slot directory and
    /// renamed into place, so an interrupted save never leaves a partial
    /// slot behind.
    pub fn save(&mut self, config: &ViewConfig) -> Result<SlotId, SlotError> {
        fs::create_dir_all(&self.dir).map_err(|source| SlotError::Io {
            path: self.dir.clone(),
            source,
        })?;
        self.scan()?;
        let id = match self.ids.last() {
            None => 0,
            Some(&last) => last
                .checked_add(1)
                .ok_or(SlotError::NoFreeSlot { last })?,
        };
        let path = self.path_of(id);

        let record = SlotRecord {
            saved_at: Some(Utc::now()),
            ..SlotRecord::from_config(config)
        };
        let json = serde_json::to_vec_pretty(&record).map_err(SlotError::Serialize)?;

        let io_err = |source| SlotError::Io {
            path: path.clone(),
            source,
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;

        self.scan()?;
        self.current = self.ids.iter().position(|i| *i == id);
        info!(slot = id, path = %path.display(), "slot saved");
        Ok(id)
    }

    /// Deletes the current slot. Returns its number, or `None` when no
    /// slot is current.
    pub fn delete(&mut self) -> Result<Option<SlotId>, SlotError> {
        let Some(id) = self.current() else {
            return Ok(None);
        };
        let path = self.path_of(id);
        self.current = None;
        fs::remove_file(&path).map_err(|source| SlotError::Io { path, source })?;
        self.scan()?;
        info!(slot = id, "slot deleted");
        Ok(Some(id))
    }

    /// Loads the next (or previous) slot cyclically.
    ///
    /// Without a current slot, next starts at the lowest number and
    /// previous at the highest. The slot moved to becomes current even when
    /// it cannot be decoded, so repeating the command moves past it.
    /// Returns `Ok(None)` when no slot exists.
    pub fn load(&mut self, forward: bool) -> Result<Option<(SlotId, ViewConfig)>, SlotError> {
        self.scan_keeping_current()?;
        let count = self.ids.len();
        if count == 0 {
            return Ok(None);
        }
        let index = match (self.current, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.current = Some(index);
        let id = self.ids[index];
        let path = self.path_of(id);
        let bytes = fs::read(&path).map_err(|source| SlotError::Io { path, source })?;
        match serde_json::from_slice::<SlotRecord>(&bytes) {
            Ok(record) => {
                info!(slot = id, "slot loaded");
                Ok(Some((id, record.into_config())))
            }
            Err(source) => {
                warn!(slot = id, error = %source, "skipping unreadable slot");
                Err(SlotError::Corrupt { id, source })
            }
        }
    }

    /// Rescans the directory, keeping the current slot when it still exists.
    fn scan_keeping_current(&mut self) -> Result<(), SlotError> {
        let current = self.current();
        self.scan()?;
        self.current = current.and_then(|id| self.ids.iter().position(|i| *i == id));
        Ok(())
    }
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
