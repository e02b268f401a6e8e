//! Client configuration for the backend base URL, the session file location and
//! the request timeout. Values come from CLI flags or their environment
//! fallbacks; empty values never override a default. Configuration values are
//! public; do not store secrets here.

use super::errors::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Session file name under the per-user state directory.
pub const SESSION_FILE_NAME: &str = "session.json";
const STATE_DIR_NAME: &str = ".manpower";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_path: PathBuf,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_path: default_session_path(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Optional overrides, typically parsed from CLI arguments.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub session_path: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl AppConfig {
    /// Builds the config from defaults plus overrides and validates the base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is not an absolute http(s) URL
    /// or the timeout is zero.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, AppError> {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {}",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be greater than zero.".to_string(),
            ));
        }
        Ok(())
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: ConfigOverrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = overrides.session_path.as_deref().and_then(normalize_value) {
        config.session_path = PathBuf::from(value);
    }
    if let Some(value) = overrides.timeout_ms {
        config.timeout = Duration::from_millis(value);
    }
}

/// `$HOME/.manpower/session.json`, or a relative `.manpower/session.json` when
/// no home directory is known.
#[must_use]
pub fn default_session_path() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from(STATE_DIR_NAME), |home| {
            PathBuf::from(home).join(STATE_DIR_NAME)
        })
        .join(SESSION_FILE_NAME)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
