//! Generative text service abstraction.
//!
//! The annotator only sees [`GenerativeClient`], so production code talks to
//! Gemini through [`gemini::GeminiClient`] while tests substitute scripted
//! clients that yield fixed chunks or fail on demand.

pub mod gemini;
pub mod sse;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::errors::GenerativeError;

pub use gemini::GeminiClient;

/// Stream of generated text chunks in arrival order.
///
/// Finite and not restartable. An `Err` item may arrive at any point,
/// including after some text has already been delivered.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, GenerativeError>> + Send>>;

/// Per-request generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
  /// Model identifier
  pub model: String,
  /// Let the model ground its answer with web search
  pub search_grounding: bool,
  /// Thinking budget in tokens; 0 asks for the fastest mode with no deliberation
  pub thinking_budget: u32,
}

/// Capability: submit a prompt, receive a lazily streamed answer.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
  /// Starts a streamed generation for `prompt`.
  ///
  /// # Errors
  /// Fails when the request cannot be sent or the service rejects it before
  /// streaming begins. Later failures are delivered through the stream.
  async fn stream_generate(
    &self,
    prompt: &str,
    options: &GenerationOptions,
  ) -> Result<ChunkStream, GenerativeError>;
}
