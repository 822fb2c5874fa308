//! Configuration validation

use crate::{AppConfig, ConfigError, Result};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.remote.csv_url.is_empty() {
        errors.push(ValidationError::new(
            "remote.csv_url",
            "read endpoint is required",
        ));
    } else if !config.remote.csv_url.starts_with("http") {
        errors.push(ValidationError::new(
            "remote.csv_url",
            "must be an http(s) URL",
        ));
    }

    // script_url may stay empty: that deployment is read-only and writes
    // are dropped with a log line.
    if !config.remote.script_url.is_empty() && !config.remote.script_url.starts_with("http") {
        errors.push(ValidationError::new(
            "remote.script_url",
            "must be an http(s) URL",
        ));
    }

    if config.remote.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "remote.timeout_ms",
            "timeout must be greater than 0",
        ));
    }

    if config.sync.poll_interval_secs == 0 {
        errors.push(ValidationError::new(
            "sync.poll_interval_secs",
            "poll interval must be greater than 0",
        ));
    }

    if config.sync.protection_window_secs == 0 {
        errors.push(ValidationError::new(
            "sync.protection_window_secs",
            "protection window must be greater than 0",
        ));
    }

    // A quiet period at or beyond the protection window would let the
    // intent expire before its write is even submitted.
    if config.sync.debounce_quiet_ms >= config.sync.protection_window_secs * 1000 {
        errors.push(ValidationError::new(
            "sync.debounce_quiet_ms",
            "debounce quiet period must be shorter than the protection window",
        ));
    }

    if let Err(e) = validate_log_level(&config.log.level) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::ValidationError(joined))
    }
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        other => Err(ValidationError::new(
            "log.level",
            format!("unknown log level: {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.remote.csv_url = "https://example.test/pub?output=csv".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_csv_url_fails() {
        let config = AppConfig::default();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("remote.csv_url"));
    }

    #[test]
    fn test_empty_script_url_is_allowed() {
        let mut config = valid_config();
        config.remote.script_url = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_poll_interval_fails() {
        let mut config = valid_config();
        config.sync.poll_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_debounce_must_stay_inside_protection_window() {
        let mut config = valid_config();
        config.sync.protection_window_secs = 1;
        config.sync.debounce_quiet_ms = 1000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_log_level_fails() {
        let mut config = valid_config();
        config.log.level = "loud".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("log.level"));
    }
}
