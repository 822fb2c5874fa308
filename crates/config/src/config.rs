//! Core configuration structures for the warehouse sync

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sheet endpoints
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Poll and merge tuning
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

/// Endpoints of the sheet-backed store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Published CSV export URL (read path)
    #[serde(default)]
    pub csv_url: String,

    /// Apps Script endpoint URL (write path); empty disables writes
    #[serde(default)]
    pub script_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Tuning for the poll loop and the reconciliation cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Poll period in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// How long a local edit outranks mismatching poll data, in seconds
    #[serde(default = "default_protection_window_secs")]
    pub protection_window_secs: u64,

    /// Quiet period before a quantity edit is submitted, in milliseconds
    #[serde(default = "default_debounce_quiet_ms")]
    pub debounce_quiet_ms: u64,
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn protection_window(&self) -> Duration {
        Duration::from_secs(self.protection_window_secs)
    }

    pub fn debounce_quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_quiet_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_timeout_ms() -> u64 {
    30000
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_protection_window_secs() -> u64 {
    150 // covers several polls of write-then-read lag
}

fn default_debounce_quiet_ms() -> u64 {
    400
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            csv_url: String::new(),
            script_url: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            protection_window_secs: default_protection_window_secs(),
            debounce_quiet_ms: default_debounce_quiet_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
