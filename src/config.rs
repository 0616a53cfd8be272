use std::collections::HashMap;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub array: ArrayConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

/// Connection settings for one array management controller.
#[derive(Debug, Deserialize, Clone)]
pub struct ArrayConfig {
    /// Host label stamped on every reported metric. Operator-chosen,
    /// not derived from the array.
    pub host: String,

    /// `host:port` of the array management API.
    pub address: String,

    /// Pre-shared auth hash; takes precedence over user/password.
    #[serde(default)]
    pub hash: Option<SecretString>,

    #[serde(default)]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: SecretString,

    /// Disable HTTPS and talk plain HTTP to the array.
    #[serde(default)]
    pub no_ssl: bool,

    /// Whole-exchange (connect + read) timeout per request.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(flatten)]
    unknown: HashMap<String, serde_json::Value>,
}

/// Poll-cycle settings: per-document enable flags and scheduling.
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Log every dispatched metric at debug level.
    #[serde(default)]
    pub verbose: bool,

    #[serde(default = "default_true")]
    pub enclosure_info: bool,
    #[serde(default = "default_true")]
    pub controller_info: bool,
    #[serde(default = "default_true")]
    pub disk_info: bool,
    #[serde(default = "default_true")]
    pub vdisk_info: bool,
    #[serde(default = "default_true")]
    pub vol_info: bool,

    #[serde(flatten)]
    unknown: HashMap<String, serde_json::Value>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            verbose: false,
            enclosure_info: true,
            controller_info: true,
            disk_info: true,
            vdisk_info: true,
            vol_info: true,
            unknown: HashMap::new(),
        }
    }
}

fn default_password() -> SecretString {
    SecretString::from("")
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_interval_seconds() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("P2000_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.warn_unknown_keys();
        Ok(config)
    }

    /// Unrecognized keys are a warning, never a failure: the array's
    /// config surface has grown over firmware revisions and an operator
    /// carrying an old file should not lose the whole collector.
    pub fn warn_unknown_keys(&self) {
        for key in self.array.unknown.keys() {
            warn!("Unknown config key in [array]: {}", key);
        }
        for key in self.poll.unknown.keys() {
            warn!("Unknown config key in [poll]: {}", key);
        }
    }
}
