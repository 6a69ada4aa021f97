/// Settings for the `parse` and `format` commands, stored as JSON.
///
/// `--config <path>` names the file explicitly; otherwise `markban/config.json`
/// under the platform config directory is used. Keys left out of the file
/// keep their defaults, and a missing or unreadable file never stops a command.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Indent JSON written by `parse`.
    #[serde(default = "default_true")]
    pub pretty_json: bool,
    /// Refuse `format --write` when a second pass would change the output.
    #[serde(default = "default_true")]
    pub check_before_write: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pretty_json: default_true(),
            check_before_write: default_true(),
        }
    }
}

/// Where markban looks when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("markban")
        .join("config.json")
}

/// Settings from the `--config` file when one was passed, else from
/// `default_config_path`.
pub fn resolve_config(explicit: Option<&Path>) -> CliConfig {
    match explicit {
        Some(path) => load_config(path),
        None => load_config(&default_config_path()),
    }
}

/// Read `path`, falling back to `CliConfig::default()`. Broken JSON is
/// logged at warn, an absent file only at info.
pub fn load_config(path: &Path) -> CliConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("[markban.cli] ignoring config {}: {}", path.display(), e);
            CliConfig::default()
        }),
        Err(_) => {
            log::info!("[markban.cli] no config at {}, using defaults", path.display());
            CliConfig::default()
        }
    }
}
