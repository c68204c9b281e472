// crates/rhymer/src/config.rs

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::generative::GenerationOptions;

/// Default model identifier for rhyme annotation.
///
/// The "lite" tier is the lowest-latency text model the service offers.
pub const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";

/// Default base URL of the generative language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Top-level configuration for rhymer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RhymerConfig {
  /// [generative] section
  #[serde(default)]
  pub generative: GenerativeConfig,
}

/// [generative] section configuration.
#[derive(Clone, Deserialize)]
pub struct GenerativeConfig {
  /// API credential. `None` means every annotation uses the fallback heuristic.
  #[serde(default)]
  pub api_key: Option<String>,
  /// Model identifier (e.g., "gemini-flash-lite-latest")
  #[serde(default = "default_model")]
  pub model: String,
  /// Base URL of the API, without trailing slash
  #[serde(default = "default_api_base")]
  pub api_base: String,
  /// Enable search grounding for the request
  #[serde(default = "default_true")]
  pub search_grounding: bool,
  /// Thinking budget in tokens; 0 disables deliberation
  #[serde(default)]
  pub thinking_budget: u32,
  /// Whole-request timeout. `None` leaves the HTTP client default in place.
  #[serde(default)]
  pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
  DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
  DEFAULT_API_BASE.to_string()
}

fn default_true() -> bool {
  true
}

impl Default for GenerativeConfig {
  fn default() -> Self {
    Self {
      api_key: None,
      model: default_model(),
      api_base: default_api_base(),
      search_grounding: true,
      thinking_budget: 0,
      request_timeout_secs: None,
    }
  }
}

// The key never appears in logs.
impl fmt::Debug for GenerativeConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GenerativeConfig")
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .field("model", &self.model)
      .field("api_base", &self.api_base)
      .field("search_grounding", &self.search_grounding)
      .field("thinking_budget", &self.thinking_budget)
      .field("request_timeout_secs", &self.request_timeout_secs)
      .finish()
  }
}

// ===== Accessor Methods =====

impl GenerativeConfig {
  /// Returns true when a non-blank API key is configured.
  pub fn has_api_key(&self) -> bool {
    self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
  }

  /// Returns the request timeout, if one is configured.
  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }

  /// Builds the per-request options handed to the generative client.
  pub fn generation_options(&self) -> GenerationOptions {
    GenerationOptions {
      model: self.model.clone(),
      search_grounding: self.search_grounding,
      thinking_budget: self.thinking_budget,
    }
  }
}

impl RhymerConfig {
  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `generative.model` is not blank
  /// - `generative.api_base` starts with `http://` or `https://`
  /// - `generative.request_timeout_secs` is not 0
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let generative = &self.generative;

    if generative.model.trim().is_empty() {
      return Err(ConfigError::EmptyModel);
    }

    let base = generative.api_base.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
      return Err(ConfigError::InvalidApiBase { actual: generative.api_base.clone() });
    }

    if generative.request_timeout_secs == Some(0) {
      return Err(ConfigError::ZeroRequestTimeout);
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
