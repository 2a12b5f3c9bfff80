//! Configuration management for Chatterbox
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file with CLI overrides. Every field has a
//! sensible default, so a missing config file is not an error.

use crate::cli::Cli;
use crate::error::{ChatterboxError, Result};
use crate::session::SessionTiming;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Chatterbox
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chatroom storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dummy history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Simulated reply settings
    #[serde(default)]
    pub reply: ReplyConfig,

    /// Mock authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Chatroom storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database directory; defaults to the platform data dir
    #[serde(default)]
    pub path: Option<String>,
}

/// Dummy history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of synthetic backlog messages per room
    #[serde(default = "default_total_messages")]
    pub total_messages: usize,

    /// Messages per history page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Spacing between backlog message timestamps (seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Minimum skeleton time before the first page appears (milliseconds)
    #[serde(default = "default_initial_load_delay_ms")]
    pub initial_load_delay_ms: u64,
}

fn default_total_messages() -> usize {
    100
}

fn default_page_size() -> usize {
    20
}

fn default_interval_secs() -> u64 {
    100
}

fn default_initial_load_delay_ms() -> u64 {
    500
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            total_messages: default_total_messages(),
            page_size: default_page_size(),
            interval_secs: default_interval_secs(),
            initial_load_delay_ms: default_initial_load_delay_ms(),
        }
    }
}

/// Simulated reply configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    /// Responder kind (currently only "echo")
    #[serde(default = "default_responder")]
    pub responder: String,

    /// Lower bound of the randomized reply delay (milliseconds, inclusive)
    #[serde(default = "default_reply_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the randomized reply delay (milliseconds, exclusive)
    #[serde(default = "default_reply_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_responder() -> String {
    "echo".to_string()
}

fn default_reply_min_delay_ms() -> u64 {
    1000
}

fn default_reply_max_delay_ms() -> u64 {
    2000
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            responder: default_responder(),
            min_delay_ms: default_reply_min_delay_ms(),
            max_delay_ms: default_reply_max_delay_ms(),
        }
    }
}

/// Mock authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Country dial-code lookup endpoint
    #[serde(default = "default_countries_endpoint")]
    pub countries_endpoint: String,

    /// Simulated OTP send/verify delay (milliseconds)
    #[serde(default = "default_otp_delay_ms")]
    pub otp_delay_ms: u64,
}

fn default_countries_endpoint() -> String {
    crate::auth::DEFAULT_COUNTRIES_ENDPOINT.to_string()
}

fn default_otp_delay_ms() -> u64 {
    1000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            countries_endpoint: default_countries_endpoint(),
            otp_delay_ms: default_otp_delay_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file with CLI overrides
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// an error. The CLI `--storage-path` flag overrides the configured
    /// storage path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML config file
    /// * `cli` - Parsed CLI arguments for overrides
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path);
            Self::default()
        };

        if let Some(storage_path) = &cli.storage_path {
            config.storage.path = Some(storage_path.clone());
        }

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.history.page_size == 0 {
            return Err(
                ChatterboxError::Config("history.page_size must be positive".to_string()).into(),
            );
        }
        if self.history.total_messages == 0 {
            return Err(ChatterboxError::Config(
                "history.total_messages must be positive".to_string(),
            )
            .into());
        }
        if self.reply.max_delay_ms <= self.reply.min_delay_ms {
            return Err(ChatterboxError::Config(
                "reply.max_delay_ms must be greater than reply.min_delay_ms".to_string(),
            )
            .into());
        }
        if self.auth.countries_endpoint.is_empty() {
            return Err(ChatterboxError::Config(
                "auth.countries_endpoint must not be empty".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Resolve the storage database path
    ///
    /// Uses the configured path when set, otherwise the platform data
    /// directory.
    pub fn storage_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("", "", "chatterbox").ok_or_else(|| {
            ChatterboxError::Config("Cannot determine a data directory".to_string())
        })?;
        Ok(dirs.data_dir().join("rooms.db"))
    }

    /// Session timing derived from the history and reply settings
    pub fn session_timing(&self) -> SessionTiming {
        SessionTiming {
            initial_load_delay: Duration::from_millis(self.history.initial_load_delay_ms),
            reply_delay_min: Duration::from_millis(self.reply.min_delay_ms),
            reply_delay_max: Duration::from_millis(self.reply.max_delay_ms),
        }
    }

    /// Backlog message spacing as a chrono duration
    pub fn history_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.history.interval_secs as i64)
    }
}
