//! rhymer-api crate
//!
//! Web server providing rhyme highlighting for song lyrics as HTTP API.
//!
//! ## Endpoints
//! - `POST /api/process` - Rhyme Highlighting
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:8000/api/process \
//!   -H "Content-Type: application/json" \
//!   -d '{"lyrics": "I roll over my opponents instead"}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{HealthResponse, ProcessRequest, ProcessResponse};
pub use service::{RhymerApiService, RhymerApiServiceFull};
