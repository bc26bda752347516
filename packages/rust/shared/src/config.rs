//! Application configuration for coursecraft.
//!
//! User config lives at `~/.coursecraft/coursecraft.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoursecraftError, Result};
use crate::types::DEFAULT_COURSE_DURATION_MIN;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "coursecraft.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".coursecraft";

// ---------------------------------------------------------------------------
// Config structs (matching coursecraft.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Analysis defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default planned course duration in minutes.
    #[serde(default = "default_duration")]
    pub duration: u32,

    /// Default target audience.
    #[serde(default = "default_target_audience")]
    pub target_audience: String,

    /// Default speaking tone.
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Default report output format: "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            target_audience: default_target_audience(),
            tone: default_tone(),
            format: default_format(),
        }
    }
}

fn default_duration() -> u32 {
    DEFAULT_COURSE_DURATION_MIN
}
fn default_target_audience() -> String {
    "初心者".into()
}
fn default_tone() -> String {
    "通常".into()
}
fn default_format() -> String {
    "text".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.coursecraft/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CoursecraftError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.coursecraft/coursecraft.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CoursecraftError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        CoursecraftError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CoursecraftError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CoursecraftError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CoursecraftError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
