//! # Configuration
//!
//! Settings come from an optional TOML file, then environment overrides:
//!
//! | Variable                  | Meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `ESTIMATOR_CONFIG_PATH`   | TOML file to read (default `estimator.toml`) |
//! | `ESTIMATOR_WEBHOOK_URL`   | Estimation webhook endpoint               |
//! | `ESTIMATOR_TIMEOUT_SECS`  | Request timeout; unset means none         |
//! | `ESTIMATOR_LAYOUT`        | `full` or `summary`                       |
//! | `ESTIMATOR_DARK_MODE`     | `true` / `false`                          |
//! | `ESTIMATOR_LOG`           | Log filter when `RUST_LOG` is unset       |

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::layout::LayoutPreset;

pub const ENV_CONFIG_PATH: &str = "ESTIMATOR_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "estimator.toml";

/// Webhook the estimation workflow listens on
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://uxlad.app.n8n.cloud/webhook/f3e58583-27ea-4654-8cf3-862b4a468b04";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub webhook_url: String,
    pub request_timeout_secs: Option<u64>,
    pub layout: LayoutPreset,
    pub dark_mode: bool,
    pub log_filter: String,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            request_timeout_secs: None,
            layout: LayoutPreset::Full,
            dark_mode: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from the config file and environment
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let base = Self::load_config_file(Path::new(&config_path)).unwrap_or_default();
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (the environment, in production)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("ESTIMATOR_WEBHOOK_URL").filter(|u| !u.trim().is_empty()) {
            self.webhook_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("ESTIMATOR_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.request_timeout_secs = None,
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring ESTIMATOR_TIMEOUT_SECS")
                }
            }
        }
        if let Some(raw) = lookup("ESTIMATOR_LAYOUT") {
            match raw.parse::<LayoutPreset>() {
                Ok(preset) => self.layout = preset,
                Err(e) => tracing::warn!(error = %e, "ignoring ESTIMATOR_LAYOUT"),
            }
        }
        if let Some(raw) = lookup("ESTIMATOR_DARK_MODE") {
            let raw = raw.trim().to_ascii_lowercase();
            self.dark_mode = matches!(raw.as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(filter) = lookup("ESTIMATOR_LOG").filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Load configuration from a TOML file; `None` when absent or unusable
    pub fn load_config_file(path: &Path) -> Option<EstimatorConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(EstimatorConfig::default());
                }

                match toml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config file, using defaults"
                        );
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config file, using defaults"
                );
                None
            }
        }
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> EstimateResult<()> {
        let url = self.webhook_url.trim();
        if url.is_empty() {
            return Err(EstimateError::config("webhook_url", "must not be empty"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(EstimateError::config(
                "webhook_url",
                format!("'{}' is not an http(s) URL", url),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs.map(std::time::Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::temp_dir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = EstimatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), None);
        assert_eq!(config.layout, LayoutPreset::Full);
    }

    #[test]
    fn test_env_overrides() {
        let config = EstimatorConfig::default().with_overrides(lookup(&[
            ("ESTIMATOR_WEBHOOK_URL", " http://localhost:5678/webhook/estimate "),
            ("ESTIMATOR_TIMEOUT_SECS", "30"),
            ("ESTIMATOR_LAYOUT", "summary"),
            ("ESTIMATOR_DARK_MODE", "on"),
        ]));
        assert_eq!(config.webhook_url, "http://localhost:5678/webhook/estimate");
        assert_eq!(config.request_timeout_secs, Some(30));
        assert_eq!(config.layout, LayoutPreset::Summary);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let config = EstimatorConfig::default().with_overrides(lookup(&[
            ("ESTIMATOR_TIMEOUT_SECS", "soon"),
            ("ESTIMATOR_LAYOUT", "poster"),
            ("ESTIMATOR_WEBHOOK_URL", "   "),
        ]));
        assert_eq!(config, EstimatorConfig::default());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = EstimatorConfig {
            webhook_url: "ftp://example.com/hook".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_load_config_file() {
        let path = temp_dir().join("estimator_test_config.toml");
        let contents = "webhook_url = \"http://127.0.0.1:9000/hook\"\nlayout = \"summary\"\n";
        fs::write(&path, contents).unwrap();

        let config = EstimatorConfig::load_config_file(&path).unwrap();
        assert_eq!(config.webhook_url, "http://127.0.0.1:9000/hook");
        assert_eq!(config.layout, LayoutPreset::Summary);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_or_invalid_file_falls_back() {
        let missing = Path::new("/nonexistent/estimator.toml");
        assert!(EstimatorConfig::load_config_file(missing).is_none());

        let path = temp_dir().join("estimator_test_bad_config.toml");
        fs::write(&path, "webhook_url = [").unwrap();
        assert!(EstimatorConfig::load_config_file(&path).is_none());
        let _ = fs::remove_file(&path);
    }
}
