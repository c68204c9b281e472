//! Service module

mod rhymer_api_service;

pub use rhymer_api_service::{RhymerApiService, RhymerApiServiceFull};
