//! errors module
pub mod error_definition;

/// Re-export
pub use error_definition::{
  ApiError, ApiErrorKind, NO_LYRICS_MESSAGE, PROCESSING_FAILED_MESSAGE, Result,
};
