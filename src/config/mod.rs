//! TOML configuration for the tipjar CLI.
//!
//! Every field has a default, so a missing file or an empty one yields a
//! working setup against the public relays below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tipjar_nostr::ResolverConfig;

/// Comma-separated relay list that replaces `[sources] relays`.
pub const RELAYS_ENV: &str = "TIPJAR_RELAYS";

const DEFAULT_RELAYS: &[&str] = &[
    "wss://relay.damus.io",
    "wss://relay.nostr.band",
    "wss://nos.lol",
    "wss://relay.nostr.info",
    "wss://nostr.wine",
    "wss://relay.snort.social",
];

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "default_relays")]
    pub relays: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolverSettings {
    #[serde(default = "default_timeout_secs")]
    pub fanout_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub query_timeout_secs: u64,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_suggest_limit")]
    pub suggest_limit: usize,
    #[serde(default = "default_notes_limit")]
    pub notes_limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            relays: default_relays(),
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            fanout_timeout_secs: default_timeout_secs(),
            query_timeout_secs: default_timeout_secs(),
            search_limit: default_search_limit(),
            suggest_limit: default_suggest_limit(),
            notes_limit: default_notes_limit(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            recent_capacity: default_recent_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_relays() -> Vec<String> {
    DEFAULT_RELAYS.iter().map(|r| r.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_search_limit() -> usize {
    50
}

fn default_suggest_limit() -> usize {
    20
}

fn default_notes_limit() -> usize {
    5
}

fn default_db_path() -> String {
    "~/.tipjar/tipjar.db".to_string()
}

fn default_recent_capacity() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl LoggingConfig {
    /// Filter directive for the subscriber; `--verbose` forces `debug`.
    pub fn directive(&self, verbose: bool) -> String {
        if verbose {
            "debug".to_string()
        } else {
            self.level.trim().to_lowercase()
        }
    }
}

/// `config.toml` under the platform config dir, e.g. `~/.config/tipjar/`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tipjar").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded_path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse TOML config")
    }

    /// Load an explicit path, or the default location if it exists, or defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::load_from_file(&p.to_string_lossy())?,
                None => Self::default(),
            },
        };

        if let Ok(relays) = std::env::var(RELAYS_ENV) {
            config.apply_relay_override(&relays);
        }

        Ok(config)
    }

    pub fn apply_relay_override(&mut self, value: &str) {
        let relays: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
        if !relays.is_empty() {
            self.sources.relays = relays;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.relays.is_empty() {
            anyhow::bail!("At least one relay must be configured");
        }
        for relay in &self.sources.relays {
            if !relay.starts_with("wss://") && !relay.starts_with("ws://") {
                anyhow::bail!("Relay URL must start with ws:// or wss://: {}", relay);
            }
        }
        if self.resolver.fanout_timeout_secs == 0 || self.resolver.query_timeout_secs == 0 {
            anyhow::bail!("Resolver timeouts must be greater than zero");
        }
        if !LOG_LEVELS.contains(&self.logging.directive(false).as_str()) {
            anyhow::bail!(
                "logging.level must be one of {}: {}",
                LOG_LEVELS.join(", "),
                self.logging.level
            );
        }
        if self.storage.recent_capacity == 0 {
            anyhow::bail!("storage.recent_capacity must be at least 1");
        }
        Ok(())
    }

    pub fn expand_paths(&mut self) -> Result<()> {
        self.storage.db_path = shellexpand::tilde(&self.storage.db_path).to_string();
        Ok(())
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            sources: self.sources.relays.clone(),
            fanout_timeout: Duration::from_secs(self.resolver.fanout_timeout_secs),
            query_timeout: Duration::from_secs(self.resolver.query_timeout_secs),
            search_limit: self.resolver.search_limit,
            suggest_limit: self.resolver.suggest_limit,
            notes_limit: self.resolver.notes_limit,
        }
    }
}
