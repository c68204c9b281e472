//! Gemini streaming client.
//!
//! Calls `models/{model}:streamGenerateContent?alt=sse` and forwards each
//! event's text through a bounded channel as it arrives.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use super::sse::SseDecoder;
use super::{ChunkStream, GenerationOptions, GenerativeClient};
use crate::config::GenerativeConfig;
use crate::errors::{GenerativeError, RhymerResult};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Upper bound on error body text kept in `GenerativeError::Api`
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Pending chunks buffered between the network task and the consumer
const CHANNEL_CAPACITY: usize = 32;

type ChunkSender = mpsc::Sender<Result<String, GenerativeError>>;

/// Gemini implementation of [`GenerativeClient`].
#[derive(Clone)]
pub struct GeminiClient {
  api_key: Option<String>,
  api_base: String,
  client: Client,
}

impl GeminiClient {
  /// Builds a client from configuration.
  ///
  /// A missing API key is accepted; every call then fails with
  /// [`GenerativeError::NotConfigured`] without touching the network.
  ///
  /// # Errors
  /// Returns an error if the underlying HTTP client cannot be constructed.
  pub fn new(config: &GenerativeConfig) -> RhymerResult<Self> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout() {
      builder = builder.timeout(timeout);
    }

    let client = builder.build().map_err(|e| {
      GenerativeError::InvalidRequest(format!("failed to build HTTP client: {e}"))
    })?;

    Ok(Self {
      api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
      api_base: config.api_base.trim().trim_end_matches('/').to_string(),
      client,
    })
  }

  /// Streaming endpoint for `model`.
  fn stream_url(&self, model: &str) -> String {
    format!("{}/models/{}:streamGenerateContent?alt=sse", self.api_base, model)
  }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
  async fn stream_generate(
    &self,
    prompt: &str,
    options: &GenerationOptions,
  ) -> Result<ChunkStream, GenerativeError> {
    let api_key = self.api_key.as_deref().ok_or(GenerativeError::NotConfigured)?;

    let request = GenerateContentRequest::new(prompt, options);
    let url = self.stream_url(&options.model);

    debug!(
      model = %options.model,
      prompt_len = prompt.len(),
      search_grounding = options.search_grounding,
      thinking_budget = options.thinking_budget,
      "starting streaming request to Gemini"
    );

    let response = self
      .client
      .post(&url)
      .header(API_KEY_HEADER, api_key)
      .json(&request)
      .send()
      .await
      .map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(status_error(status, &body));
    }

    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(pump_events(response, tx));

    Ok(Box::pin(ReceiverStream::new(rx)))
  }
}

/// Reads the SSE body and forwards text chunks until the body ends, an event
/// fails, or the receiver goes away.
async fn pump_events(response: reqwest::Response, tx: ChunkSender) {
  let mut body = response.bytes_stream();
  let mut decoder = SseDecoder::new();

  while let Some(next) = body.next().await {
    let bytes = match next {
      Ok(bytes) => bytes,
      Err(e) => {
        let _ = tx.send(Err(GenerativeError::Network(e.to_string()))).await;
        return;
      }
    };

    for data in decoder.push(&bytes) {
      if !forward_event(&tx, &data).await {
        return;
      }
    }
  }

  if let Some(data) = decoder.finish() {
    forward_event(&tx, &data).await;
  }
}

/// Returns false once the stream should stop.
async fn forward_event(tx: &ChunkSender, data: &str) -> bool {
  match event_text(data) {
    Ok(Some(text)) => tx.send(Ok(text)).await.is_ok(),
    Ok(None) => true,
    Err(e) => {
      let _ = tx.send(Err(e)).await;
      false
    }
  }
}

/// Extracts the generated text of one stream event.
fn event_text(data: &str) -> Result<Option<String>, GenerativeError> {
  let event: StreamEvent =
    serde_json::from_str(data).map_err(|e| GenerativeError::MalformedStream(e.to_string()))?;

  if let Some(error) = event.error {
    return Err(GenerativeError::Api { status: error.code.unwrap_or(0), message: error.message });
  }

  let text: String = event
    .candidates
    .into_iter()
    .next()
    .and_then(|candidate| candidate.content)
    .map(|content| {
      content
        .parts
        .into_iter()
        .filter(|part| !part.thought.unwrap_or(false))
        .filter_map(|part| part.text)
        .collect()
    })
    .unwrap_or_default();

  Ok(if text.is_empty() { None } else { Some(text) })
}

fn transport_error(err: reqwest::Error) -> GenerativeError {
  if err.is_builder() {
    GenerativeError::InvalidRequest(err.to_string())
  } else {
    GenerativeError::Network(err.to_string())
  }
}

fn status_error(status: StatusCode, body: &str) -> GenerativeError {
  match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
      GenerativeError::Unauthorized { status: status.as_u16() }
    }
    StatusCode::TOO_MANY_REQUESTS => GenerativeError::RateLimited,
    _ => GenerativeError::Api {
      status: status.as_u16(),
      message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    },
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
  contents: Vec<RequestContent<'a>>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  tools: Vec<Tool>,
  generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
  fn new(prompt: &'a str, options: &GenerationOptions) -> Self {
    let tools = if options.search_grounding {
      vec![Tool { google_search: GoogleSearch {} }]
    } else {
      Vec::new()
    };

    Self {
      contents: vec![RequestContent { role: "user", parts: vec![RequestPart { text: prompt }] }],
      tools,
      generation_config: GenerationConfig {
        thinking_config: ThinkingConfig { thinking_budget: options.thinking_budget },
      },
    }
  }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
  role: &'a str,
  parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
  text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
  google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
  thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(default)]
  error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
  #[serde(default)]
  parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
  #[serde(default)]
  text: Option<String>,
  #[serde(default)]
  thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
  #[serde(default)]
  code: Option<u16>,
  #[serde(default)]
  message: String,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn options() -> GenerationOptions {
    GenerationOptions {
      model: "gemini-flash-lite-latest".to_string(),
      search_grounding: true,
      thinking_budget: 0,
    }
  }

  #[test]
  fn request_body_matches_wire_format() {
    let body = serde_json::to_value(GenerateContentRequest::new("hello", &options())).unwrap();

    assert_eq!(
      body,
      json!({
        "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
        "tools": [{ "googleSearch": {} }],
        "generationConfig": { "thinkingConfig": { "thinkingBudget": 0 } }
      })
    );
  }

  #[test]
  fn request_body_omits_tools_without_grounding() {
    let mut opts = options();
    opts.search_grounding = false;
    let body = serde_json::to_value(GenerateContentRequest::new("hello", &opts)).unwrap();
    assert!(body.get("tools").is_none());
  }

  #[test]
  fn stream_url_uses_model_and_sse() {
    let config = GenerativeConfig {
      api_key: Some("k".to_string()),
      api_base: "https://example.test/v1beta/".to_string(),
      ..Default::default()
    };
    let client = GeminiClient::new(&config).unwrap();
    assert_eq!(
      client.stream_url("m-1"),
      "https://example.test/v1beta/models/m-1:streamGenerateContent?alt=sse"
    );
  }

  #[test]
  fn event_text_concatenates_parts_of_first_candidate() {
    let data = json!({
      "candidates": [
        { "content": { "parts": [{ "text": "<span>" }, { "text": "red</span>" }] } },
        { "content": { "parts": [{ "text": "ignored" }] } }
      ]
    })
    .to_string();
    assert_eq!(event_text(&data).unwrap(), Some("<span>red</span>".to_string()));
  }

  #[test]
  fn event_text_skips_thought_parts_and_empty_events() {
    let data = json!({
      "candidates": [{ "content": { "parts": [{ "text": "hmm", "thought": true }] } }]
    })
    .to_string();
    assert_eq!(event_text(&data).unwrap(), None);

    let usage_only = json!({ "usageMetadata": { "totalTokenCount": 3 } }).to_string();
    assert_eq!(event_text(&usage_only).unwrap(), None);
  }

  #[test]
  fn event_text_reports_upstream_error_object() {
    let data = json!({ "error": { "code": 503, "message": "overloaded" } }).to_string();
    assert_eq!(
      event_text(&data),
      Err(GenerativeError::Api { status: 503, message: "overloaded".to_string() })
    );
  }

  #[test]
  fn event_text_rejects_invalid_json() {
    assert!(matches!(event_text("{not json"), Err(GenerativeError::MalformedStream(_))));
  }

  #[test]
  fn status_error_classification() {
    assert_eq!(
      status_error(StatusCode::UNAUTHORIZED, ""),
      GenerativeError::Unauthorized { status: 401 }
    );
    assert_eq!(
      status_error(StatusCode::FORBIDDEN, ""),
      GenerativeError::Unauthorized { status: 403 }
    );
    assert_eq!(status_error(StatusCode::TOO_MANY_REQUESTS, ""), GenerativeError::RateLimited);

    let long_body = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
    match status_error(StatusCode::BAD_REQUEST, &long_body) {
      GenerativeError::Api { status, message } => {
        assert_eq!(status, 400);
        assert_eq!(message.len(), MAX_ERROR_BODY_CHARS);
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn missing_api_key_fails_without_network() {
    let config = GenerativeConfig {
      api_key: Some("  ".to_string()),
      // unroutable; reaching the network would fail differently
      api_base: "http://127.0.0.1:9".to_string(),
      ..Default::default()
    };
    let client = GeminiClient::new(&config).unwrap();

    let result = client.stream_generate("prompt", &options()).await;
    assert!(matches!(result, Err(GenerativeError::NotConfigured)));
  }
}
