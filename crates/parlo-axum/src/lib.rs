#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Used by the integration tests under tests/, not by the library itself
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

// Re-export primary types
pub use bootstrap::{AppContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use sse::SseBroadcaster;
pub use state::AppState;
