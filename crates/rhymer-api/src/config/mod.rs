//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_BIND_ADDR, ENV_API_BASE, ENV_API_KEY, ENV_BIND_ADDR, ENV_MODEL,
  ENV_UPSTREAM_TIMEOUT_SECS,
};
pub use env::Config;
