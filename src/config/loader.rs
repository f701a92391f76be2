//! Configuration file loading with precedence handling.

use crate::model::{ColorizeMode, ContextPolicy, PaletteId, SgrMode, ViewConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SIFT_CONFIG";

/// Environment variable overriding the slots directory.
pub const SLOTS_DIR_ENV: &str = "SIFT_SLOTS_DIR";

/// Environment variable overriding the log file path.
pub const LOG_ENV: &str = "SIFT_LOG";

/// Default slots directory, relative to the working directory.
pub const DEFAULT_SLOTS_DIR: &str = ".sift";

/// Default interval between auto reload checks.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Shortest accepted poll interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/sift/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Directory holding saved slots.
    #[serde(default)]
    pub slots_dir: Option<PathBuf>,

    /// Milliseconds between auto reload checks.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Context radii offered when cycling line visibility.
    #[serde(default)]
    pub context_radii: Option<Vec<usize>>,

    /// Wrap long lines.
    #[serde(default)]
    pub wrap: Option<bool>,

    /// Show line numbers.
    #[serde(default)]
    pub line_numbers: Option<bool>,

    /// Bullets on wrapped lines.
    #[serde(default)]
    pub bullets: Option<bool>,

    /// Render spaces as dots.
    #[serde(default)]
    pub show_spaces: Option<bool>,

    /// Initial palette index.
    #[serde(default)]
    pub palette: Option<usize>,

    /// Initial SGR mode (`process`, `remove`, `passthrough`).
    #[serde(default)]
    pub sgr_mode: Option<SgrMode>,

    /// Initial colorize mode (`keyword_highlight`, `keyword`, `line`).
    #[serde(default)]
    pub colorize_mode: Option<ColorizeMode>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Directory holding saved slots.
    pub slots_dir: PathBuf,
    /// Milliseconds between auto reload checks.
    pub poll_interval_ms: u64,
    /// Context radii offered when cycling line visibility.
    pub context_radii: Vec<usize>,
    /// Wrap long lines.
    pub wrap: bool,
    /// Show line numbers.
    pub line_numbers: bool,
    /// Bullets on wrapped lines.
    pub bullets: bool,
    /// Render spaces as dots.
    pub show_spaces: bool,
    /// Initial palette.
    pub palette: PaletteId,
    /// Initial SGR mode.
    pub sgr_mode: SgrMode,
    /// Initial colorize mode.
    pub colorize_mode: ColorizeMode,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let view = ViewConfig::default();
        Self {
            log_file_path: default_log_path(),
            slots_dir: PathBuf::from(DEFAULT_SLOTS_DIR),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            context_radii: ContextPolicy::DEFAULT_RADII.to_vec(),
            wrap: view.wrap,
            line_numbers: view.line_numbers,
            bullets: view.bullets,
            show_spaces: view.show_spaces,
            palette: view.palette,
            sgr_mode: view.sgr_mode,
            colorize_mode: view.colorize_mode,
        }
    }
}

impl ResolvedConfig {
    /// Initial configuration of every view, without filters.
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            wrap: self.wrap,
            line_numbers: self.line_numbers,
            bullets: self.bullets,
            show_spaces: self.show_spaces,
            palette: self.palette,
            sgr_mode: self.sgr_mode,
            colorize_mode: self.colorize_mode,
            ..ViewConfig::default()
        }
    }

    /// Visibility levels offered by `m`/`M`.
    pub fn context_policy(&self) -> ContextPolicy {
        ContextPolicy::new(self.context_radii.iter().copied())
    }

    /// Interval between auto reload checks, never shorter than
    /// [`MIN_POLL_INTERVAL_MS`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/sift/sift.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("sift").join("sift.log")
    } else {
        PathBuf::from("sift.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/sift/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sift").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SIFT_CONFIG` environment variable
/// 3. Default path `~/.config/sift/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        slots_dir: config.slots_dir.unwrap_or(defaults.slots_dir),
        poll_interval_ms: config.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
        context_radii: config.context_radii.unwrap_or(defaults.context_radii),
        wrap: config.wrap.unwrap_or(defaults.wrap),
        line_numbers: config.line_numbers.unwrap_or(defaults.line_numbers),
        bullets: config.bullets.unwrap_or(defaults.bullets),
        show_spaces: config.show_spaces.unwrap_or(defaults.show_spaces),
        palette: config.palette.map_or(defaults.palette, PaletteId::new),
        sgr_mode: config.sgr_mode.unwrap_or(defaults.sgr_mode),
        colorize_mode: config.colorize_mode.unwrap_or(defaults.colorize_mode),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SIFT_SLOTS_DIR`: slots directory
/// - `SIFT_LOG`: log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var(SLOTS_DIR_ENV) {
        config.slots_dir = PathBuf::from(dir);
    }
    if let Ok(path) = std::env::var(LOG_ENV) {
        config.log_file_path = PathBuf::from(path);
    }
    config
}

/// Settings given on the command line. `None` leaves the value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// From `--slots-dir`.
    pub slots_dir: Option<PathBuf>,
    /// From `--no-wrap`.
    pub wrap: Option<bool>,
    /// From `--line-numbers`.
    pub line_numbers: Option<bool>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(dir) = overrides.slots_dir {
        config.slots_dir = dir;
    }
    if let Some(wrap) = overrides.wrap {
        config.wrap = wrap;
    }
    if let Some(line_numbers) = overrides.line_numbers {
        config.line_numbers = line_numbers;
    }
    config
}

/// Runs the whole chain: file lookup, defaults, env, then CLI.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed.
pub fn resolve(
    config_path: Option<PathBuf>,
    overrides: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    Ok(apply_cli_overrides(
        apply_env_overrides(merge_config(file)),
        overrides,
    ))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
