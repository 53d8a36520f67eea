//! Backend and run configuration.

use mi_core::MiError;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const API_URL_ENV: &str = "MODELIT_API_URL";
pub const TIMEOUT_ENV: &str = "MODELIT_TIMEOUT_SECS";

/// Where the persistence/simulation API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL including the `/api` prefix.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Defaults overridden by `MODELIT_API_URL` / `MODELIT_TIMEOUT_SECS`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("{TIMEOUT_ENV} must be an integer, got {raw:?}")))?;
        }
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Join a path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Service root (base URL without the `/api` suffix), where `/health` lives.
    pub fn service_root(&self) -> &str {
        let base = self.api_url.trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base)
    }
}

/// Settings submitted with a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOptions {
    pub steps: u32,
    pub method: String,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            steps: 100,
            method: "java-advanced".to_string(),
        }
    }
}

impl SimulationOptions {
    pub fn validate(&self) -> Result<(), MiError> {
        if self.steps == 0 {
            return Err(MiError::invalid("steps must be positive"));
        }
        if self.method.trim().is_empty() {
            return Err(MiError::invalid("simulation method must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let config = BackendConfig::from_lookup(|key| match key {
            API_URL_ENV => Some("http://sim.lab:9000/api/".to_string()),
            TIMEOUT_ENV => Some("5".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.endpoint("/models/3"), "http://sim.lab:9000/api/models/3");
        assert_eq!(config.service_root(), "http://sim.lab:9000");
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let result = BackendConfig::from_lookup(|key| (key == TIMEOUT_ENV).then(|| "soon".to_string()));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn defaults_without_env() {
        let config = BackendConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.service_root(), "http://localhost:5001");
    }

    #[test]
    fn options_validate() {
        assert!(SimulationOptions::default().validate().is_ok());
        let bad = SimulationOptions {
            steps: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
