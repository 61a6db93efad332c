//! Application configuration management.
//!
//! Two layers:
//! - `ClientConfig`: runtime options read from the environment (`VITALINK_*`)
//! - `Config`: persisted user settings at `~/.config/vitalink/config.json`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "vitalink";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

pub const ENV_API_URL: &str = "VITALINK_API_URL";
pub const ENV_FRONTEND_URL: &str = "VITALINK_FRONTEND_URL";
pub const ENV_API_TIMEOUT: &str = "VITALINK_API_TIMEOUT";
pub const ENV_RETRY_ATTEMPTS: &str = "VITALINK_RETRY_ATTEMPTS";
pub const ENV_ENABLE_ANALYTICS: &str = "VITALINK_ENABLE_ANALYTICS";
pub const ENV_ENABLE_PWA: &str = "VITALINK_ENABLE_PWA";
pub const ENV_ENABLE_DARK_MODE: &str = "VITALINK_ENABLE_DARK_MODE";

/// Product feature toggles. Read and reported, not consulted by any request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub analytics: bool,
    pub pwa: bool,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub frontend_url: String,
    pub timeout_ms: u64,
    /// Parsed for compatibility; requests are never retried.
    pub retry_attempts: u32,
    pub features: FeatureFlags,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            features: FeatureFlags::default(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing or blank values use defaults; malformed numbers and booleans
    /// fall back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_url: get(ENV_API_URL).unwrap_or(defaults.api_url),
            frontend_url: get(ENV_FRONTEND_URL).unwrap_or(defaults.frontend_url),
            timeout_ms: parse_or(ENV_API_TIMEOUT, get(ENV_API_TIMEOUT), defaults.timeout_ms),
            retry_attempts: parse_or(
                ENV_RETRY_ATTEMPTS,
                get(ENV_RETRY_ATTEMPTS),
                defaults.retry_attempts,
            ),
            features: FeatureFlags {
                analytics: parse_flag(ENV_ENABLE_ANALYTICS, get(ENV_ENABLE_ANALYTICS)),
                pwa: parse_flag(ENV_ENABLE_PWA, get(ENV_ENABLE_PWA)),
                dark_mode: parse_flag(ENV_ENABLE_DARK_MODE, get(ENV_ENABLE_DARK_MODE)),
            },
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, "Invalid numeric config value, using default");
            default
        }),
    }
}

fn parse_flag(key: &str, value: Option<String>) -> bool {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => false,
        Some("true") | Some("1") | Some("yes") | Some("on") => true,
        Some("false") | Some("0") | Some("no") | Some("off") => false,
        Some(other) => {
            warn!(key = key, value = other, "Invalid boolean config value, using false");
            false
        }
    }
}

/// Persisted user settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Overrides `VITALINK_API_URL` when set.
    pub api_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply persisted overrides on top of the environment configuration.
    pub fn apply(&self, client: &mut ClientConfig) {
        if let Some(ref url) = self.api_url {
            client.api_url = url.clone();
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
