//! Lyrics settings, persisted as TOML.
//!
//! The file lives under the platform config directory:
//! - Windows: %APPDATA%\lyrics-minder\config.toml
//! - macOS: ~/Library/Application Support/lyrics-minder/config.toml
//! - Linux: ~/.config/lyrics-minder/config.toml
//!
//! The Musixmatch token can also come from the `MUSIXMATCH_USERTOKEN`
//! environment variable, which takes precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lyrics::HttpTransport;
use crate::lyrics::musixmatch::endpoint::DEFAULT_BASE_URL;

/// Environment variable overriding the configured token
pub const TOKEN_ENV_VAR: &str = "MUSIXMATCH_USERTOKEN";

/// Everything the lyrics service can be configured with.
///
/// Missing tables and keys take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[credentials]`
    pub credentials: Credentials,

    /// `[provider]`
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Musixmatch desktop user token
    pub musixmatch_token: Option<String>,
}

/// Provider connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API root
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: HttpTransport::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// The token to send, preferring the environment over the file.
    ///
    /// Empty when neither is set.
    pub fn musixmatch_token(&self) -> String {
        self.resolve_token(std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn resolve_token(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|t| !t.is_empty())
            .or_else(|| self.credentials.musixmatch_token.clone())
            .unwrap_or_default()
    }
}

/// Directory holding `config.toml`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyrics-minder"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load the config file from its default location.
///
/// Never fails: a missing, unreadable or malformed file yields
/// [`Config::default`] with a log line saying why.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("No config directory on this platform, using built-in settings");
            Config::default()
        }
    }
}

/// Load a config file, falling back to defaults on any problem
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No lyrics config file, using built-in settings");
        return Config::default();
    }

    match read_config(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Loaded lyrics config");
            config
        }
        Err(e) => {
            tracing::error!("{}; using built-in settings", e);
            Config::default()
        }
    }
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Persist `config` to the default location
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Persist `config` to `path`, creating parent directories as needed.
///
/// The file is replaced atomically: readers see either the old or the new contents.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let rendered = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    let staging = path.with_extension("toml.tmp");
    std::fs::write(&staging, rendered).map_err(|e| ConfigError::Write(staging.clone(), e))?;
    std::fs::rename(&staging, path)
        .map_err(|e| ConfigError::Rename(staging, path.to_path_buf(), e))?;

    tracing::info!(path = %path.display(), "Saved lyrics config");
    Ok(())
}

/// [`save`] on the blocking pool, for callers inside the runtime
pub async fn save_async(config: Config) -> Result<(), ConfigError> {
    match tokio::task::spawn_blocking(move || save(&config)).await {
        Ok(result) => result,
        Err(e) => Err(ConfigError::TaskJoin(e.to_string())),
    }
}

/// Errors reading or writing the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Cannot read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Invalid lyrics config in {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Cannot create {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Cannot render config as TOML: {0}")]
    Serialize(toml::ser::Error),

    #[error("Cannot write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Cannot move {0} into place at {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Config save task failed: {0}")]
    TaskJoin(String),
}
