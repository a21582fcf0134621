// Application configuration.
// Layers defaults, an optional config file, and environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const ENV_SERVER_URL: &str = "GITNESS_URL";
pub const ENV_TOKEN: &str = "GITNESS_TOKEN";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_url: String,
    pub token: Option<String>,
    /// Disable edit affordances of the configuration form.
    pub readonly: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            readonly: false,
        }
    }
}

/// On-disk shape of `config.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
struct ConfigFile {
    server_url: Option<String>,
    token: Option<String>,
    readonly: Option<bool>,
}

/// Platform config directory (~/.config/repodesk on Linux).
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repodesk").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Platform data directory, used for log files.
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repodesk").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the default config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

impl Config {
    /// Load from the default config file and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Defaults overlaid with `path`, if it exists.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        if !path.exists() {
            return Ok(config);
        }

        let contents = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config file");

        if let Some(url) = file.server_url {
            config.server_url = url;
        }
        if file.token.is_some() {
            config.token = file.token;
        }
        if let Some(readonly) = file.readonly {
            config.readonly = readonly;
        }
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables read through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_SERVER_URL).filter(|v| !v.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(token) = var(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    /// Check the server URL looks like an HTTP endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.server_url.starts_with("http://") || self.server_url.starts_with("https://") {
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "server url must start with http:// or https://, got {:?}",
                self.server_url
            )))
        }
    }
}
