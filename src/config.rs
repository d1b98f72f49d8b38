use crate::error::{MigrateError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

pub const FORECAST_HOST: &str = "https://api.forecast.it";
pub const GITHUB_HOST: &str = "https://api.github.com";
pub const DEFAULT_THROTTLE_MS: u64 = 1000;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrateConfig {
    #[serde(default)]
    pub forecast: ForecastSettings,

    #[serde(default)]
    pub github: GithubSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    #[serde(default = "default_forecast_host")]
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubSettings {
    #[serde(default = "default_github_host")]
    pub host: String,

    /// Milliseconds to wait before every GitHub request
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Label attached to every migrated issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn default_forecast_host() -> String {
    FORECAST_HOST.to_string()
}

fn default_github_host() -> String {
    GITHUB_HOST.to_string()
}

fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            host: default_forecast_host(),
        }
    }
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            host: default_github_host(),
            throttle_ms: default_throttle_ms(),
            label: None,
        }
    }
}

impl MigrateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MigrateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicit config file, or the per-user one if it exists,
    /// falling back to built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(MigrateError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "forecast2github")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn forecast_url(&self) -> Result<Url> {
        parse_host(&self.forecast.host)
    }

    pub fn github_url(&self) -> Result<Url> {
        parse_host(&self.github.host)
    }
}

fn parse_host(host: &str) -> Result<Url> {
    let url = Url::parse(host)?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(MigrateError::Config(format!(
            "Host must be an http(s) URL: {}",
            host
        )));
    }
    Ok(url)
}
