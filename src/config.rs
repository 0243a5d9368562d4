// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of every environment variable read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "WALLETLEDGER";
pub const ENV_DB: &str = "WALLETLEDGER_DB";
pub const ENV_USER: &str = "WALLETLEDGER_USER";
pub const ENV_MAX_RETRIES: &str = "WALLETLEDGER_MAX_RETRIES";
pub const ENV_BUSY_TIMEOUT_MS: &str = "WALLETLEDGER_BUSY_TIMEOUT_MS";
pub const ENV_LOG: &str = "WALLETLEDGER_LOG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// None means the platform data dir.
    #[serde(rename = "db", default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(
        rename = "busy_timeout_ms",
        default = "default_busy_timeout",
        deserialize_with = "millis"
    )]
    pub busy_timeout: Duration,
    #[serde(rename = "log", default = "default_log_filter")]
    pub log_filter: String,
}

fn default_user() -> String {
    "local".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_busy_timeout() -> Duration {
    Duration::from_millis(5000)
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn millis<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Duration, D::Error> {
    u64::deserialize(d).map(Duration::from_millis)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            user: default_user(),
            max_retries: default_max_retries(),
            busy_timeout: default_busy_timeout(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from explicit `WALLETLEDGER_*` pairs instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(env: config::Environment) -> Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Invalid {}_* configuration", ENV_PREFIX))?;
        Ok(cfg.normalized())
    }

    /// Trim text settings; blank ones fall back to their defaults.
    fn normalized(mut self) -> Self {
        self.db_path = self
            .db_path
            .and_then(|p| p.to_str().map(|s| s.trim().to_string()))
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        self.user = match self.user.trim() {
            "" => default_user(),
            u => u.to_string(),
        };
        self.log_filter = match self.log_filter.trim() {
            "" => default_log_filter(),
            f => f.to_string(),
        };
        self
    }

    /// Global CLI flags win over the environment.
    pub fn apply_matches(&mut self, m: &clap::ArgMatches) {
        if let Some(p) = m.get_one::<String>("db") {
            let p = p.trim();
            if !p.is_empty() {
                self.db_path = Some(PathBuf::from(p));
            }
        }
        if let Some(u) = m.get_one::<String>("user") {
            let u = u.trim();
            if !u.is_empty() {
                self.user = u.to_string();
            }
        }
    }
}
