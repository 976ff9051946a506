//! SSE event broadcaster for real-time event streaming.
//!
//! This module provides an SSE broadcaster that implements the core event
//! emitter port, allowing the speech service to emit events that are
//! streamed to connected web clients.

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;
use parlo_core::events::AppEvent;
use parlo_core::ports::AppEventEmitter;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

/// SSE broadcaster that implements the event emitter port.
///
/// Events are sent via a broadcast channel and streamed to connected clients.
/// Multiple clients can receive the same events simultaneously.
#[derive(Debug, Clone)]
pub struct SseBroadcaster {
    sender: broadcast::Sender<AppEvent>,
}

impl SseBroadcaster {
    /// Create a new SSE broadcaster with the specified channel capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events that can be buffered.
    ///   Slow clients may miss events if the buffer overflows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new SSE broadcaster with default capacity (256 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Create an SSE stream for a new client connection.
    ///
    /// Returns an Axum SSE response that streams named events to the client
    /// (the SSE `event:` field carries [`AppEvent::event_name`], the `data:`
    /// field the JSON payload). Takes `Arc<Self>` to ensure proper ownership
    /// for the stream. Includes a keep-alive ping every 30 seconds to prevent
    /// proxy timeouts.
    pub fn subscribe(
        self: Arc<Self>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let receiver = self.sender.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|result| {
            match result {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => Some(Ok(Event::default().event(event.event_name()).data(json))),
                    Err(e) => {
                        tracing::warn!("Failed to serialize event: {}", e);
                        None
                    }
                },
                Err(e) => {
                    // Log lagged or closed errors and continue
                    tracing::debug!("SSE stream error: {}", e);
                    None
                }
            }
        });

        Sse::new(stream).keep_alive(
            axum::response::sse::KeepAlive::new()
                .interval(std::time::Duration::from_secs(30))
                .text("ping"),
        )
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl AppEventEmitter for SseBroadcaster {
    fn emit(&self, event: AppEvent) {
        // Ignore send errors (no subscribers is fine)
        let _ = self.sender.send(event);
    }
}

/// Create a shared SSE broadcaster wrapped in Arc.
#[must_use]
pub fn create_broadcaster() -> Arc<SseBroadcaster> {
    Arc::new(SseBroadcaster::with_defaults())
}
