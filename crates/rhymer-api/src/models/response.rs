//! Response Model Definition

use serde::Serialize;

/// Lyrics Processing Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResponse {
  /// Always `true`; failures use the error body instead
  pub success: bool,
  /// Rhyme-highlighted HTML
  pub highlighted_html: String,
}

impl ProcessResponse {
  /// Successful response carrying `html`
  #[must_use]
  pub fn success(html: impl Into<String>) -> Self {
    Self { success: true, highlighted_html: html.into() }
  }
}

/// Health Check Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
  /// Fixed "healthy"
  pub status: &'static str,
}

impl HealthResponse {
  /// The only health payload the server reports
  #[must_use]
  pub fn healthy() -> Self {
    Self { status: "healthy" }
  }
}
