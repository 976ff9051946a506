//! Single-slot status channel with sequence-guarded expiry.
//!
//! The channel holds at most one message. Publishing replaces whatever is
//! there, regardless of severity. Non-error messages carry a time-to-live
//! and are expired by a timer the service schedules; error messages have
//! no TTL and persist until replaced or explicitly cleared.
//!
//! Expiry is guarded by a monotonic sequence number: a timer scheduled for
//! message N only clears the slot if N is still current, so a late timer
//! can never wipe out a newer message.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Severity ──────────────────────────────────────────────────────────────────

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSeverity {
    Info,
    Success,
    Error,
}

impl StatusSeverity {
    /// Wire label used in DTOs and event payloads.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

// ── Status message ────────────────────────────────────────────────────────────

/// A published status message.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: StatusSeverity,
    /// Wall-clock time of publication.
    pub published_at: DateTime<Utc>,
    /// Time-to-live after which the message expires; `None` for error
    /// messages, which persist.
    pub expires_in: Option<Duration>,
    /// Monotonic publication counter, used to guard expiry.
    pub seq: u64,
}

// ── Status channel ────────────────────────────────────────────────────────────

/// The single-slot holder for the current status message.
#[derive(Debug)]
pub struct StatusChannel {
    current: Option<StatusMessage>,
    seq: u64,
    default_ttl: Duration,
}

impl StatusChannel {
    #[must_use]
    pub const fn new(default_ttl: Duration) -> Self {
        Self {
            current: None,
            seq: 0,
            default_ttl,
        }
    }

    /// Publish a message, replacing any current one.
    ///
    /// Non-error messages get `ttl` or, failing that, the channel default.
    /// Error messages never expire. Returns a copy of the stored message
    /// so callers can schedule expiry from its `seq` and `expires_in`.
    pub fn publish(
        &mut self,
        severity: StatusSeverity,
        text: impl Into<String>,
        ttl: Option<Duration>,
    ) -> StatusMessage {
        self.seq += 1;
        let expires_in = match severity {
            StatusSeverity::Error => None,
            StatusSeverity::Info | StatusSeverity::Success => {
                Some(ttl.unwrap_or(self.default_ttl))
            }
        };
        let message = StatusMessage {
            text: text.into(),
            severity,
            published_at: Utc::now(),
            expires_in,
            seq: self.seq,
        };
        self.current = Some(message.clone());
        message
    }

    /// Clear the slot if `seq` still identifies the current message.
    ///
    /// Returns whether anything was cleared. A stale `seq` (the message
    /// was already replaced) is a no-op.
    pub fn expire(&mut self, seq: u64) -> bool {
        if self.current.as_ref().is_some_and(|m| m.seq == seq) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Unconditionally clear the slot, returning the cleared message's
    /// sequence number if there was one.
    pub fn clear(&mut self) -> Option<u64> {
        self.current.take().map(|m| m.seq)
    }

    #[must_use]
    pub const fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}
