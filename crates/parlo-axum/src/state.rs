//! Shared application state type.
//!
//! Defines the `AppState` type used across all handlers and routers.

use crate::bootstrap::AppContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// This is an Arc-wrapped [`AppContext`] containing the speech port, the
/// tools client, and the SSE broadcaster.
pub type AppState = Arc<AppContext>;
