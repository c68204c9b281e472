//! rhymer rhyme annotation library
//!
//! Highlights rhymes in song lyrics as HTML, using a generative text service
//! with a local suffix-grouping fallback.

/// Annotator module - RhymeAnnotator, the primary/fallback strategy facade
pub mod annotator;

/// Configuration module - RhymerConfig, GenerativeConfig
pub mod config;

/// Error module - RhymerError, GenerativeError, ConfigError
pub mod errors;

/// Fallback module - orthographic rhyme grouping by word ending
pub mod fallback;

/// Generative module - GenerativeClient capability and the Gemini streaming client
pub mod generative;

/// Prompt module - instruction prompt sent to the generative service
pub mod prompt;

/// Re-exports
pub use annotator::{Annotation, AnnotationStrategy, RhymeAnnotator};
pub use config::{GenerativeConfig, RhymerConfig};
pub use errors::{RhymerError, RhymerResult};
pub use fallback::simple_rhyme_detection;
pub use generative::{ChunkStream, GenerationOptions, GenerativeClient};
