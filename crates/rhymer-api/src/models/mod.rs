//! モデルモジュール

mod request;
mod response;

pub use request::ProcessRequest;
pub use response::{HealthResponse, ProcessResponse};
