// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::aggregate::ReportAggregator;
use crate::locale::Locale;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Report presentation settings
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the NGO API (e.g., "http://localhost:3000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Language for month names and summaries
    #[serde(default)]
    pub locale: Locale,

    /// Symbol printed before monetary totals
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ReportConfig {
    /// Aggregator for these settings, with `locale` taking precedence over
    /// the configured one when given.
    pub fn aggregator(&self, locale: Option<Locale>) -> ReportAggregator {
        ReportAggregator::new(locale.unwrap_or(self.locale), self.currency_symbol.clone())
    }
}

impl Config {
    /// Load configuration from XDG config directory.
    /// Returns default config if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "patinhas").context("Could not determine home directory")
}
