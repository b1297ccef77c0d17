use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::lookup::{LookupOptions, MAX_CONCURRENT_LOOKUPS};

pub const DEFAULT_URL: &str = "https://reputation.app.stairwell.com";

/// TLS client credentials and proxy for the HTTP client (`[request]` section).
/// Empty strings mean "not set".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Path to a PEM client certificate.
    pub cert: String,
    /// Path to the PEM private key for `cert`.
    pub key: String,
    /// Passphrase for `key`.
    pub passphrase: String,
    /// Path to a PEM CA bundle used to verify the service.
    pub ca: String,
    /// Proxy URL; basic auth may be embedded in the URL.
    pub proxy: String,
    /// Optional whole-request timeout in seconds (None = libcurl default, no timeout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Global configuration loaded from `~/.config/hashrep/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashrepConfig {
    /// Base URL of the reputation service.
    #[serde(default = "default_url")]
    pub url: String,
    /// API key sent as `X-Apikey`.
    #[serde(default)]
    pub api_key: String,
    /// Maximum lookups in flight at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_lookups: usize,
    #[serde(default)]
    pub request: RequestConfig,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_max_concurrent() -> usize {
    MAX_CONCURRENT_LOOKUPS
}

impl Default for HashrepConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            max_concurrent_lookups: MAX_CONCURRENT_LOOKUPS,
            request: RequestConfig::default(),
        }
    }
}

impl HashrepConfig {
    /// Per-invocation options for the validator and lookup service.
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// Concurrency limit, never below 1.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent_lookups.max(1)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashrep")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HashrepConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HashrepConfig::default();
        write_default(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<HashrepConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HashrepConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &HashrepConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
