//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::RhymerApiService;

/// Shared handler state
///
/// Cloned per request by axum; the service sits behind an `Arc` so every
/// clone points at the same annotator and HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Lyrics processing backend
  ///
  /// `RhymerApiServiceFull` in the binary, stub services in router tests
  pub service: Arc<dyn RhymerApiService>,
}

impl AppState {
  /// Bundles loaded configuration with a service
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn RhymerApiService>) -> Self {
    Self { config, service }
  }
}
