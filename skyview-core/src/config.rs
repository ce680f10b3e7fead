use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::theme::ThemeMode;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "SKYVIEW_API_KEY";

pub const DEFAULT_CITY: &str = "New York";

/// Where weather data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Live data when a key is available, placeholder data otherwise.
    #[default]
    Auto,
    Live,
    Sample,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Auto => "auto",
            DataSource::Live => "live",
            DataSource::Sample => "sample",
        }
    }

    pub const fn all() -> &'static [DataSource] {
        &[DataSource::Auto, DataSource::Live, DataSource::Sample]
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DataSource {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(DataSource::Auto),
            "live" => Ok(DataSource::Live),
            "sample" => Ok(DataSource::Sample),
            _ => Err(anyhow!("Unknown data source '{value}'. Supported: auto, live, sample.")),
        }
    }
}

/// Data source after the API key has been taken into account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    Live { api_key: String },
    Sample,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// data_source = "live"
/// api_key = "..."
/// default_city = "London"
/// theme = "dark"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub data_source: DataSource,

    pub api_key: Option<String>,

    /// Override for the provider base URL, e.g. a local mock.
    pub base_url: Option<String>,

    pub default_city: String,

    /// Theme the display starts in.
    pub theme: ThemeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DataSource::default(),
            api_key: None,
            base_url: None,
            default_city: DEFAULT_CITY.to_string(),
            theme: ThemeMode::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyview", "skyview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or clear the stored API key. Blank keys clear it.
    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
    }

    /// API key from the environment, falling back to the stored one.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok().as_deref())
    }

    pub fn api_key_with_env(&self, env_value: Option<&str>) -> Option<String> {
        env_value
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.api_key.clone())
    }

    pub fn resolve_source(&self) -> Result<ResolvedSource> {
        self.resolve_source_with(self.api_key())
    }

    pub fn resolve_source_with(&self, api_key: Option<String>) -> Result<ResolvedSource> {
        match (self.data_source, api_key) {
            (DataSource::Sample, _) => Ok(ResolvedSource::Sample),
            (_, Some(api_key)) => Ok(ResolvedSource::Live { api_key }),
            (DataSource::Auto, None) => {
                tracing::warn!("No API key configured, using sample weather data");
                Ok(ResolvedSource::Sample)
            }
            (DataSource::Live, None) => Err(anyhow!(
                "Data source is 'live' but no API key is configured.\n\
                 Hint: run `skyview configure` or set {API_KEY_ENV}."
            )),
        }
    }
}
