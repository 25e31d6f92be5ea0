//! Client settings.
//!
//! Settings come from an optional JSON file and are then overridden by
//! environment variables. Command-line flags are applied last by the caller.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Base URL of a backend started with `flask run`.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Overrides [`ClientSettings::base_url`].
pub const ENV_URL: &str = "PLOT_PLANNER_URL";

/// Overrides [`ClientSettings::session`].
pub const ENV_SESSION: &str = "PLOT_PLANNER_SESSION";

/// Overrides [`ClientSettings::timeout_secs`].
pub const ENV_TIMEOUT: &str = "PLOT_PLANNER_TIMEOUT_SECS";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// How to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Server root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the backend's `session` cookie for a logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session: None,
        }
    }
}

impl ClientSettings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("cannot read {}: {e}", path.display())))?;
        let settings: Self = serde_json::from_str(&text)
            .map_err(|e| ApiError::Config(format!("invalid settings in {}: {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `path` (or the defaults) with environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    /// Apply `PLOT_PLANNER_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name. Empty values are ignored.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = var(ENV_URL) {
            self.base_url = url.trim().to_string();
        }
        if let Some(session) = var(ENV_SESSION) {
            self.session = Some(session.trim().to_string());
        }
        if let Some(timeout) = var(ENV_TIMEOUT) {
            self.timeout_secs = timeout.trim().parse().map_err(|e| {
                ApiError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds: {e}"))
            })?;
        }
        self.validate()
    }

    /// Check that the settings can produce a working client.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ApiError::Config("timeout must be at least one second".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for a backend path such as `/query/plot_cells/1`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, "http://127.0.0.1:5000");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert!(settings.session.is_none());
    }

    #[test]
    fn env_overrides_win_and_blanks_are_ignored() {
        let mut settings = ClientSettings::default();
        settings
            .apply_vars(|key| match key {
                ENV_URL => Some("https://plots.example.org/".to_string()),
                ENV_SESSION => Some("  ".to_string()),
                ENV_TIMEOUT => Some("5".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(settings.url("/plots/1"), "https://plots.example.org/plots/1");
        assert_eq!(settings.timeout_secs, 5);
        assert!(settings.session.is_none());
    }

    #[test]
    fn bad_overrides_are_rejected() {
        let mut settings = ClientSettings::default();
        let err = settings
            .apply_vars(|key| (key == ENV_TIMEOUT).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = settings
            .apply_vars(|key| (key == ENV_URL).then(|| "ftp://x".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }
}
