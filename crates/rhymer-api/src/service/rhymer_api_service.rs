//! Lyrics Processing Service

use std::time::Instant;

use async_trait::async_trait;
use rhymer::{RhymeAnnotator, RhymerConfig};

use crate::config::Config;
use crate::errors::Result;
use crate::models::ProcessResponse;

/// Common interface for the lyrics processing service
///
/// This trait allows swapping production implementation (`RhymerApiServiceFull`) with
/// test stubs/mocks.
#[async_trait]
pub trait RhymerApiService: Send + Sync {
  /// Produces rhyme-highlighted HTML for already validated, non-empty lyrics
  ///
  /// # Errors
  /// - Internal error
  async fn process(&self, lyrics: String) -> Result<ProcessResponse>;
}

/// Lyrics Processing Service
///
/// Thin adapter from the HTTP layer onto `RhymeAnnotator`.
#[derive(Clone)]
pub struct RhymerApiServiceFull {
  annotator: RhymeAnnotator,
}

impl RhymerApiServiceFull {
  /// Initializes the service
  ///
  /// # Arguments
  /// * `config` - Configuration (API key, model, endpoint)
  ///
  /// # Errors
  /// Returns an error if the configuration is invalid
  pub fn new(config: &Config) -> Result<Self> {
    Self::from_rhymer_config(&config.rhymer)
  }

  /// Initializes the service from the library configuration
  ///
  /// # Errors
  /// Returns an error if the configuration is invalid
  pub fn from_rhymer_config(config: &RhymerConfig) -> Result<Self> {
    let annotator = RhymeAnnotator::from_config(config)?;
    Ok(Self { annotator })
  }
}

/// Production implementation of trait `RhymerApiService`
#[async_trait]
impl RhymerApiService for RhymerApiServiceFull {
  async fn process(&self, lyrics: String) -> Result<ProcessResponse> {
    let start = Instant::now();

    let annotation = self.annotator.annotate(&lyrics).await?;

    tracing::info!(
      lyrics_len = lyrics.len(),
      html_len = annotation.html.len(),
      strategy = %annotation.strategy,
      model = %self.annotator.options().model,
      elapsed_ms = start.elapsed().as_millis() as u64,
      "lyrics annotated"
    );

    Ok(ProcessResponse::success(annotation.html))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn without_api_key_serves_fallback_html() {
    let service = RhymerApiServiceFull::new(&Config::default()).unwrap();

    let response = service.process("running stunning".to_string()).await.unwrap();

    assert!(response.success);
    assert_eq!(
      response.highlighted_html,
      r#"<span class="rhyme-group-1">running</span> <span class="rhyme-group-1">stunning</span>"#
    );
  }

  #[test]
  fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.rhymer.generative.api_base = "not a url".to_string();

    let err = RhymerApiServiceFull::new(&config).err().unwrap();
    assert_eq!(err.code(), "config_error");
  }
}
