//! Tests for configuration file loading.

use super::*;
use crate::model::LineVisibility;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

// ===== Paths =====

#[test]
fn default_config_path_ends_with_sift_config_toml() {
    let path = default_config_path().expect("Should have default path");
    assert!(path.ends_with("sift/config.toml"), "got: {}", path.display());
}

#[test]
fn default_log_path_ends_with_sift_log() {
    let path = default_log_path();
    assert!(path.ends_with("sift.log"), "got: {}", path.display());
}

// ===== Loading =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_every_key() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "config.toml",
        r#"
log_file_path = "/tmp/sift-test.log"
slots_dir = "/tmp/slots"
poll_interval_ms = 250
context_radii = [3, 10]
wrap = false
line_numbers = true
bullets = true
show_spaces = true
palette = 4
sgr_mode = "passthrough"
colorize_mode = "line"
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();
    assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/sift-test.log")));
    assert_eq!(config.slots_dir, Some(PathBuf::from("/tmp/slots")));
    assert_eq!(config.poll_interval_ms, Some(250));
    assert_eq!(config.context_radii, Some(vec![3, 10]));
    assert_eq!(config.wrap, Some(false));
    assert_eq!(config.line_numbers, Some(true));
    assert_eq!(config.bullets, Some(true));
    assert_eq!(config.show_spaces, Some(true));
    assert_eq!(config.palette, Some(4));
    assert_eq!(config.sgr_mode, Some(SgrMode::Passthrough));
    assert_eq!(config.colorize_mode, Some(ColorizeMode::Line));
}

#[test]
fn load_config_file_handles_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "config.toml", "line_numbers = true\n");

    let config = load_config_file(&path).unwrap().unwrap();
    assert_eq!(
        config,
        ConfigFile {
            line_numbers: Some(true),
            ..ConfigFile::default()
        }
    );
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "bad.toml", "wrap = [not valid");

    let result = load_config_file(&path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "got: {result:?}"
    );
}

#[test]
fn config_file_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "config.toml", "theme = \"dark\"\n");

    let result = load_config_file(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn config_file_rejects_unknown_mode_names() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "config.toml", "sgr_mode = \"rainbow\"\n");

    assert!(load_config_file(&path).is_err());
}

// ===== Merging =====

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.slots_dir, PathBuf::from(".sift"));
    assert_eq!(config.poll_interval_ms, 1000);
    assert_eq!(config.context_radii, vec![1, 2, 5]);
    assert!(config.wrap);
    assert!(!config.line_numbers);
    assert!(!config.bullets);
    assert!(!config.show_spaces);
    assert_eq!(config.palette, PaletteId::new(0));
    assert_eq!(config.sgr_mode, SgrMode::Process);
    assert_eq!(config.colorize_mode, ColorizeMode::KeywordHighlight);
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let file = ConfigFile {
        wrap: Some(false),
        palette: Some(8),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();

    assert!(!resolved.wrap);
    assert_eq!(resolved.palette, PaletteId::new(2), "palette index wraps");
    assert_eq!(resolved.slots_dir, defaults.slots_dir);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
    assert_eq!(resolved.context_radii, defaults.context_radii);
}

#[test]
fn view_config_carries_display_settings() {
    let resolved = ResolvedConfig {
        line_numbers: true,
        show_spaces: true,
        colorize_mode: ColorizeMode::Keyword,
        ..ResolvedConfig::default()
    };
    let view = resolved.view_config();
    assert!(view.line_numbers);
    assert!(view.show_spaces);
    assert_eq!(view.colorize_mode, ColorizeMode::Keyword);
    assert!(view.filters.is_empty());
    assert!(!view.dirty);
}

#[test]
fn context_policy_comes_from_radii() {
    let resolved = ResolvedConfig {
        context_radii: vec![7, 0, 3],
        ..ResolvedConfig::default()
    };
    let policy = resolved.context_policy();
    assert_eq!(policy.radii(), &[3, 7]);
    assert_eq!(
        policy.next(LineVisibility::OnlyMatching),
        LineVisibility::Context(3)
    );
}

#[test]
fn poll_interval_has_a_floor() {
    let resolved = ResolvedConfig {
        poll_interval_ms: 0,
        ..ResolvedConfig::default()
    };
    assert_eq!(
        resolved.poll_interval(),
        Duration::from_millis(MIN_POLL_INTERVAL_MS)
    );
}

// ===== Environment =====

#[test]
#[serial(sift_env)]
fn apply_env_overrides_respects_slots_dir_and_log() {
    let _slots = EnvGuard::new(SLOTS_DIR_ENV);
    let _log = EnvGuard::new(LOG_ENV);

    env::set_var(SLOTS_DIR_ENV, "/tmp/env-slots");
    env::set_var(LOG_ENV, "/tmp/env.log");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.slots_dir, PathBuf::from("/tmp/env-slots"));
    assert_eq!(result.log_file_path, PathBuf::from("/tmp/env.log"));
}

#[test]
#[serial(sift_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _slots = EnvGuard::new(SLOTS_DIR_ENV);
    let _log = EnvGuard::new(LOG_ENV);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(sift_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let dir = TempDir::new().unwrap();
    let explicit = write_config(dir.path(), "explicit.toml", "palette = 1\n");
    let from_env = write_config(dir.path(), "env.toml", "palette = 2\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit)).unwrap().unwrap();
    assert_eq!(
        config.palette,
        Some(1),
        "Should use explicit path, not SIFT_CONFIG env var"
    );
}

#[test]
#[serial(sift_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let dir = TempDir::new().unwrap();
    let from_env = write_config(dir.path(), "env.toml", "palette = 2\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.palette, Some(2));
}

#[test]
#[serial(sift_config)]
fn load_config_with_precedence_rejects_empty_env_var() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    env::set_var(CONFIG_ENV, "");

    let result = load_config_with_precedence(None);
    assert!(matches!(result, Err(ConfigError::InvalidPath(_))));
}

// ===== CLI =====

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(
        apply_cli_overrides(base.clone(), CliOverrides::default()),
        base
    );
}

#[test]
fn apply_cli_overrides_replaces_given_values() {
    let overrides = CliOverrides {
        slots_dir: Some(PathBuf::from("cli-slots")),
        wrap: Some(false),
        line_numbers: Some(true),
    };
    let result = apply_cli_overrides(ResolvedConfig::default(), overrides);
    assert_eq!(result.slots_dir, PathBuf::from("cli-slots"));
    assert!(!result.wrap);
    assert!(result.line_numbers);
}

#[test]
#[serial(sift_env, sift_config)]
fn precedence_chain_file_then_env_then_cli() {
    let _config = EnvGuard::new(CONFIG_ENV);
    let _slots = EnvGuard::new(SLOTS_DIR_ENV);
    let _log = EnvGuard::new(LOG_ENV);
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "config.toml",
        "slots_dir = \"file-slots\"\nwrap = false\nbullets = true\n",
    );

    env::set_var(SLOTS_DIR_ENV, "env-slots");
    let resolved = resolve(
        Some(path),
        CliOverrides {
            wrap: Some(true),
            ..CliOverrides::default()
        },
    )
    .unwrap();

    assert_eq!(resolved.slots_dir, PathBuf::from("env-slots"));
    assert!(resolved.wrap, "CLI wins over file");
    assert!(resolved.bullets, "file wins over defaults");
}
