//! Config loading from environment variables

use rhymer::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
use rhymer::errors::ConfigError;
use rhymer::{GenerativeConfig, RhymerConfig};

use super::constants::{
  DEFAULT_BIND_ADDR, ENV_API_BASE, ENV_API_KEY, ENV_BIND_ADDR, ENV_MODEL,
  ENV_UPSTREAM_TIMEOUT_SECS,
};
use crate::errors::ApiError;

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "0.0.0.0:8000")
  pub bind_addr: String,
  /// Annotator configuration (API key, model, endpoint)
  pub rhymer: RhymerConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self { bind_addr: DEFAULT_BIND_ADDR.to_string(), rhymer: RhymerConfig::default() }
  }
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Loads configuration through an arbitrary key lookup
  ///
  /// Blank values are treated as unset.
  ///
  /// # Errors
  /// Returns an error if a value is invalid
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let bind_addr = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let request_timeout_secs = get(ENV_UPSTREAM_TIMEOUT_SECS)
      .map(|raw| {
        raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
          key: ENV_UPSTREAM_TIMEOUT_SECS.to_string(),
          value: raw,
        })
      })
      .transpose()
      .map_err(|e| ApiError::config(e.to_string()))?;

    let rhymer = RhymerConfig {
      generative: GenerativeConfig {
        api_key: get(ENV_API_KEY),
        model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        api_base: get(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        request_timeout_secs,
        ..GenerativeConfig::default()
      },
    };

    rhymer.validate().map_err(|e| ApiError::config(e.to_string()))?;

    Ok(Self { bind_addr, rhymer })
  }

  /// Returns true when the generative service can be used
  pub fn has_api_key(&self) -> bool {
    self.rhymer.generative.has_api_key()
  }
}
