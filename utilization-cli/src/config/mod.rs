//! Configuration loading
//!
//! Settings come from a TOML file (default
//! `<config dir>/utilization-cli/config.toml`), or from the legacy
//! `config.json` holding just `client_id` / `client_secret`. Environment
//! variables override file values; a `.env` file is loaded by `main`.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::Credentials;
use crate::api::Endpoints;
use crate::api::constants::{DEFAULT_REGION, DEFAULT_TIMEOUT_SECS};

pub const ENV_CLIENT_ID: &str = "GENESYS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GENESYS_CLIENT_SECRET";
pub const ENV_REGION: &str = "GENESYS_REGION";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: Credentials,
    pub api: ApiSettings,
    pub batch: BatchSettings,
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Region domain, e.g. `mypurecloud.com`, `mypurecloud.ie`, `euw2.pure.cloud`
    pub region: String,
    pub timeout_secs: u64,
    /// Overrides the login host derived from `region`
    pub login_url: Option<String>,
    /// Overrides the API host derived from `region`
    pub api_url: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            login_url: None,
            api_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub workers: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

/// Retry is off unless `max_attempts` is raised above 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Legacy `config.json` holding only the client credentials
#[derive(Debug, Deserialize)]
struct LegacyJsonConfig {
    client_id: String,
    client_secret: String,
}

impl Config {
    /// `<config dir>/utilization-cli/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("utilization-cli").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path when it exists.
    ///
    /// An explicit path must exist; a missing default file just yields
    /// defaults so credentials can come from the environment alone.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file does not exist: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_legacy_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML config")
    }

    pub fn from_legacy_json_str(content: &str) -> Result<Self> {
        let legacy: LegacyJsonConfig =
            serde_json::from_str(content).context("Failed to parse JSON config")?;

        Ok(Self {
            credentials: Credentials::new(legacy.client_id, legacy.client_secret),
            ..Self::default()
        })
    }

    /// Apply environment-style overrides; `lookup` returns the value of a key
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(client_id) = non_empty(ENV_CLIENT_ID) {
            self.credentials.client_id = client_id;
        }
        if let Some(client_secret) = non_empty(ENV_CLIENT_SECRET) {
            self.credentials.client_secret = client_secret;
        }
        if let Some(region) = non_empty(ENV_REGION) {
            self.api.region = region;
        }
    }

    /// Checks needed before any remote call
    pub fn validate(&self) -> Result<()> {
        if !self.credentials.is_complete() {
            bail!(
                "Missing client credentials: set [credentials] client_id/client_secret in the config file or {} / {}",
                ENV_CLIENT_ID,
                ENV_CLIENT_SECRET
            );
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than 0");
        }
        Ok(())
    }

    pub fn endpoints(&self) -> Endpoints {
        let regional = Endpoints::for_region(&self.api.region);
        Endpoints::new(
            self.api.login_url.clone().unwrap_or(regional.login_base),
            self.api.api_url.clone().unwrap_or(regional.api_base),
        )
    }
}
