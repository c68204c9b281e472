//! Error definitions

use thiserror::Error;

/// Configuration (RhymerConfig) related errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
  /// generative.model is empty
  #[error("generative.model must not be empty")]
  EmptyModel,

  /// generative.api_base is not an http(s) URL
  #[error("generative.api_base must be an http or https URL: actual={actual}")]
  InvalidApiBase {
    /// Value that was supplied
    actual: String,
  },

  /// generative.request_timeout_secs == 0
  #[error("generative.request_timeout_secs must be at least 1 when set")]
  ZeroRequestTimeout,

  /// A value could not be parsed from its textual form
  #[error("invalid value for {key}: {value}")]
  InvalidValue {
    /// Name of the setting
    key: String,
    /// Raw value that failed to parse
    value: String,
  },
}

/// Errors raised while talking to the generative text service.
///
/// Every variant except [`GenerativeError::InvalidRequest`] is an upstream
/// condition the annotator recovers from by switching to the local fallback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerativeError {
  /// No API key was configured, so no request was attempted
  #[error("generative service is not configured: missing API key")]
  NotConfigured,

  /// Transport failure (DNS, connect, TLS, timeout, connection reset)
  #[error("network error: {0}")]
  Network(String),

  /// The service rejected the credential
  #[error("authentication rejected by generative service: status={status}")]
  Unauthorized {
    /// HTTP status code returned
    status: u16,
  },

  /// The service throttled the request
  #[error("generative service rate limit exceeded")]
  RateLimited,

  /// Any other non-success answer from the service
  #[error("generative service error: status={status}, message={message}")]
  Api {
    /// HTTP status code returned (0 when reported inside the stream)
    status: u16,
    /// Message reported by the service
    message: String,
  },

  /// A stream event could not be decoded
  #[error("malformed stream event: {0}")]
  MalformedStream(String),

  /// The stream finished without producing any text
  #[error("generative service returned an empty response")]
  EmptyResponse,

  /// The request itself could not be built; indicates a local defect
  #[error("invalid generative request: {0}")]
  InvalidRequest(String),
}

impl GenerativeError {
  /// Whether this failure should be absorbed by falling back to the local heuristic.
  #[must_use]
  pub fn is_recoverable(&self) -> bool {
    !matches!(self, Self::InvalidRequest(_))
  }
}

/// Unified error
/// Public APIs of this crate return this error
/// Use as `RhymerResult<T>` = `Result<T, RhymerError>`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RhymerError {
  /// Configuration error
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// Generative service error that could not be recovered from
  #[error(transparent)]
  Generative(#[from] GenerativeError),
}

/// Standard Result type alias for the rhymer crate
pub type RhymerResult<T> = Result<T, RhymerError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upstream_failures_are_recoverable() {
    let recoverable = [
      GenerativeError::NotConfigured,
      GenerativeError::Network("connection refused".to_string()),
      GenerativeError::Unauthorized { status: 401 },
      GenerativeError::RateLimited,
      GenerativeError::Api { status: 500, message: "boom".to_string() },
      GenerativeError::MalformedStream("not json".to_string()),
      GenerativeError::EmptyResponse,
    ];

    for err in recoverable {
      assert!(err.is_recoverable(), "{err} should be recoverable");
    }
  }

  #[test]
  fn invalid_request_is_not_recoverable() {
    let err = GenerativeError::InvalidRequest("bad url".to_string());
    assert!(!err.is_recoverable());
  }

  #[test]
  fn rhymer_error_is_transparent() {
    let err: RhymerError = GenerativeError::RateLimited.into();
    assert_eq!(err.to_string(), "generative service rate limit exceeded");

    let err: RhymerError = ConfigError::EmptyModel.into();
    assert_eq!(err.to_string(), "generative.model must not be empty");
  }
}
