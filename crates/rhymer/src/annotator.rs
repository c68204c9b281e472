// crates/rhymer/src/annotator.rs

//! RhymeAnnotator: the integration facade of the rhymer crate.
//!
//! - Primary strategy: stream a rhyme-highlighted rendition from the generative service
//! - Secondary strategy: local suffix grouping (`fallback::simple_rhyme_detection`)
//!
//! Callers such as the HTTP layer only need this struct.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use crate::config::RhymerConfig;
use crate::errors::{GenerativeError, RhymerResult};
use crate::fallback::simple_rhyme_detection;
use crate::generative::{GeminiClient, GenerationOptions, GenerativeClient};
use crate::prompt::build_rhyme_prompt;

/// Which strategy produced an [`Annotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationStrategy {
  /// HTML generated by the external service
  Generative,
  /// HTML produced by the local heuristic
  Fallback,
}

impl AnnotationStrategy {
  /// Short name used in logs.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Generative => "generative",
      Self::Fallback => "fallback",
    }
  }
}

impl fmt::Display for AnnotationStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Rhyme-highlighted HTML and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
  /// Annotated HTML
  pub html: String,
  /// Strategy that produced `html`
  pub strategy: AnnotationStrategy,
}

/// Turns lyrics into rhyme-highlighted HTML.
///
/// Holds no mutable state, so one instance can serve concurrent requests
/// behind an `Arc`.
#[derive(Clone)]
pub struct RhymeAnnotator {
  client: Arc<dyn GenerativeClient>,
  options: GenerationOptions,
}

impl RhymeAnnotator {
  /// Creates an annotator over an arbitrary generative client.
  #[must_use]
  pub fn new(client: Arc<dyn GenerativeClient>, options: GenerationOptions) -> Self {
    Self { client, options }
  }

  /// Initialization (validate configuration + build the Gemini client)
  ///
  /// # Errors
  /// - Invalid configuration (empty model, non-http base URL, zero timeout)
  /// - HTTP client construction failure
  pub fn from_config(config: &RhymerConfig) -> RhymerResult<Self> {
    config.validate()?;

    let client = GeminiClient::new(&config.generative)?;
    Ok(Self::new(Arc::new(client), config.generative.generation_options()))
  }

  /// Options sent with every generation request.
  pub fn options(&self) -> &GenerationOptions {
    &self.options
  }

  /// Annotates `lyrics`.
  ///
  /// Recoverable upstream failures (missing key, network, auth, rate limit,
  /// bad or empty stream) switch to the local heuristic and still succeed.
  ///
  /// # Errors
  /// Only failures that indicate a local defect, such as a request that
  /// cannot be constructed.
  pub async fn annotate(&self, lyrics: &str) -> RhymerResult<Annotation> {
    match self.generate(lyrics).await {
      Ok(html) => {
        debug!(html_len = html.len(), "generative annotation completed");
        Ok(Annotation { html, strategy: AnnotationStrategy::Generative })
      }
      Err(GenerativeError::NotConfigured) => {
        debug!("no API key configured, using fallback rhyme detection");
        Ok(self.fallback(lyrics))
      }
      Err(e) if e.is_recoverable() => {
        warn!(
          error = %e,
          model = %self.options.model,
          "generative annotation failed, using fallback"
        );
        Ok(self.fallback(lyrics))
      }
      Err(e) => {
        debug!(error = %e, "generative annotation failed with an unrecoverable error");
        Err(e.into())
      }
    }
  }

  /// Submits the prompt and collects the streamed answer.
  async fn generate(&self, lyrics: &str) -> Result<String, GenerativeError> {
    let prompt = build_rhyme_prompt(lyrics);
    let mut stream = self.client.stream_generate(&prompt, &self.options).await?;

    let mut html = String::new();
    while let Some(chunk) = stream.next().await {
      html.push_str(&chunk?);
    }

    let html = html.trim();
    if html.is_empty() {
      return Err(GenerativeError::EmptyResponse);
    }
    Ok(html.to_string())
  }

  fn fallback(&self, lyrics: &str) -> Annotation {
    Annotation { html: simple_rhyme_detection(lyrics), strategy: AnnotationStrategy::Fallback }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;
  use std::sync::atomic::{AtomicUsize, Ordering};

  use async_trait::async_trait;

  use super::*;
  use crate::errors::RhymerError;
  use crate::generative::ChunkStream;

  /// Scripted client: fails at submit time or yields a fixed chunk sequence.
  struct ScriptedClient {
    submit_error: Option<GenerativeError>,
    chunks: Vec<Result<String, GenerativeError>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, GenerationOptions)>>,
  }

  impl ScriptedClient {
    fn chunks(chunks: Vec<Result<&str, GenerativeError>>) -> Self {
      Self {
        submit_error: None,
        chunks: chunks.into_iter().map(|c| c.map(str::to_string)).collect(),
        calls: AtomicUsize::new(0),
        last_request: Mutex::new(None),
      }
    }

    fn failing(error: GenerativeError) -> Self {
      Self {
        submit_error: Some(error),
        chunks: Vec::new(),
        calls: AtomicUsize::new(0),
        last_request: Mutex::new(None),
      }
    }
  }

  #[async_trait]
  impl GenerativeClient for ScriptedClient {
    async fn stream_generate(
      &self,
      prompt: &str,
      options: &GenerationOptions,
    ) -> Result<ChunkStream, GenerativeError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      *self.last_request.lock().unwrap() = Some((prompt.to_string(), options.clone()));

      if let Some(error) = &self.submit_error {
        return Err(error.clone());
      }
      Ok(Box::pin(futures::stream::iter(self.chunks.clone())))
    }
  }

  fn options() -> GenerationOptions {
    GenerationOptions {
      model: "test-model".to_string(),
      search_grounding: true,
      thinking_budget: 0,
    }
  }

  fn annotator(client: Arc<ScriptedClient>) -> RhymeAnnotator {
    RhymeAnnotator::new(client, options())
  }

  const LYRICS: &str = "running stunning";
  const FALLBACK_HTML: &str =
    r#"<span class="rhyme-group-1">running</span> <span class="rhyme-group-1">stunning</span>"#;

  #[tokio::test]
  async fn concatenates_chunks_in_order_and_trims() {
    let client = Arc::new(ScriptedClient::chunks(vec![
      Ok("\n  <span style=\"background-color:#E06666\">run"),
      Ok("ning</span> "),
      Ok("stunning\n"),
    ]));

    let annotation = annotator(client.clone()).annotate(LYRICS).await.unwrap();

    assert_eq!(annotation.strategy, AnnotationStrategy::Generative);
    assert_eq!(annotation.html, "<span style=\"background-color:#E06666\">running</span> stunning");
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn sends_prompt_with_lyrics_and_configured_options() {
    let client = Arc::new(ScriptedClient::chunks(vec![Ok("<p>ok</p>")]));
    annotator(client.clone()).annotate(LYRICS).await.unwrap();

    let (prompt, sent_options) = client.last_request.lock().unwrap().clone().unwrap();
    assert!(prompt.contains(LYRICS));
    assert_eq!(sent_options, options());
  }

  #[tokio::test]
  async fn submit_failure_falls_back() {
    let client = Arc::new(ScriptedClient::failing(GenerativeError::Network("refused".into())));
    let annotation = annotator(client).annotate(LYRICS).await.unwrap();

    assert_eq!(annotation.strategy, AnnotationStrategy::Fallback);
    assert_eq!(annotation.html, FALLBACK_HTML);
  }

  #[tokio::test]
  async fn missing_key_falls_back() {
    let client = Arc::new(ScriptedClient::failing(GenerativeError::NotConfigured));
    let annotation = annotator(client).annotate(LYRICS).await.unwrap();
    assert_eq!(annotation.strategy, AnnotationStrategy::Fallback);
  }

  #[tokio::test]
  async fn mid_stream_failure_discards_partial_text() {
    let client = Arc::new(ScriptedClient::chunks(vec![
      Ok("<span>partial"),
      Err(GenerativeError::MalformedStream("bad event".into())),
      Ok("never read"),
    ]));

    let annotation = annotator(client).annotate(LYRICS).await.unwrap();

    assert_eq!(annotation.strategy, AnnotationStrategy::Fallback);
    assert_eq!(annotation.html, FALLBACK_HTML);
  }

  #[tokio::test]
  async fn empty_or_blank_stream_falls_back() {
    for chunks in [vec![], vec![Ok("  "), Ok("\n")]] {
      let client = Arc::new(ScriptedClient::chunks(chunks));
      let annotation = annotator(client).annotate(LYRICS).await.unwrap();
      assert_eq!(annotation.strategy, AnnotationStrategy::Fallback);
      assert_eq!(annotation.html, FALLBACK_HTML);
    }
  }

  #[tokio::test]
  async fn unrecoverable_failure_is_returned() {
    let client =
      Arc::new(ScriptedClient::failing(GenerativeError::InvalidRequest("bad header".into())));

    let result = annotator(client).annotate(LYRICS).await;

    assert_eq!(
      result,
      Err(RhymerError::Generative(GenerativeError::InvalidRequest("bad header".into())))
    );
  }

  #[tokio::test]
  async fn from_config_without_key_uses_fallback() {
    let annotator = RhymeAnnotator::from_config(&RhymerConfig::default()).unwrap();
    assert_eq!(annotator.options(), &RhymerConfig::default().generative.generation_options());

    let annotation = annotator.annotate("cat hat").await.unwrap();

    assert_eq!(annotation.strategy, AnnotationStrategy::Fallback);
    assert_eq!(
      annotation.html,
      r#"<span class="rhyme-group-1">cat</span> <span class="rhyme-group-2">hat</span>"#
    );
  }

  #[test]
  fn from_config_rejects_invalid_config() {
    let mut config = RhymerConfig::default();
    config.generative.model = String::new();
    assert!(RhymeAnnotator::from_config(&config).is_err());
  }

  #[test]
  fn strategy_names() {
    assert_eq!(AnnotationStrategy::Generative.to_string(), "generative");
    assert_eq!(AnnotationStrategy::Fallback.as_str(), "fallback");
  }
}
