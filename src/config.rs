//! Configuration for helpdesk
//!
//! Settings are layered: built-in defaults, then `config.yaml` in the user
//! config directory, then `HELPDESK_*` environment variables (nested keys
//! separated by `__`, e.g. `HELPDESK_API__BASE_URL`).

use crate::error::{HelpdeskError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the directory holding `config.yaml` and the session file
pub const CONFIG_DIR_ENV: &str = "HELPDESK_CONFIG_DIR";

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the REST API, including any `/api` prefix
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color: bool,
    /// Default `list --sort` field
    pub default_sort: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the session file lives; defaults to the user data directory
    pub dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            default_sort: "created".to_string(),
        }
    }
}

impl Config {
    /// Load the effective configuration from all layers
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load all layers, then apply a `--api-url` override
    pub fn load_with_api_url(api_url: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(url) = api_url {
            config.api.base_url = url.to_string();
        }
        Ok(config)
    }

    /// Load with a specific file as the middle layer
    pub fn load_from(path: &Path) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(
                config::Environment::with_prefix("HELPDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), base_url = %config.api.base_url, "loaded configuration");
        Ok(config)
    }

    /// Load the file layer only, for editing
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write this configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Set a single dotted key, validating the value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value)?;
                self.api.base_url = value.trim_end_matches('/').to_string();
            },
            "api.timeout_secs" => {
                self.api.timeout_secs = value.parse().map_err(|_| {
                    HelpdeskError::InvalidInput(format!("Invalid timeout: {value}"))
                })?;
            },
            "ui.color" => {
                self.ui.color = value.parse().map_err(|_| {
                    HelpdeskError::InvalidInput(format!("Expected true or false, got: {value}"))
                })?;
            },
            "ui.default_sort" => {
                value.parse::<crate::core::SortBy>()?;
                self.ui.default_sort = value.to_string();
            },
            "session.dir" => {
                self.session.dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            },
            _ => {
                return Err(HelpdeskError::Config(format!(
                    "Unknown key '{key}'. Known keys: api.base_url, api.timeout_secs, ui.color, ui.default_sort, session.dir"
                )));
            },
        }
        Ok(())
    }

    /// Directory holding `config.yaml`
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Directory holding the session file
    pub fn session_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.session.dir {
            return Ok(dir.clone());
        }
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "helpdesk", "helpdesk")
        .ok_or_else(|| HelpdeskError::Config("Could not determine home directory".to_string()))
}
