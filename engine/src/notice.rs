//! Passive user-facing notices.
//!
//! A single slot: the newest notice replaces whatever was showing, and a
//! notice disappears on its own three seconds after posting. Nothing in
//! here blocks or errors — notices are the degraded-path surface for
//! things like an empty drop set or a catalog fallback.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use serde::{Deserialize, Serialize};

use crate::consts::NOTICE_DURATION_MS;

/// How prominently the renderer should style a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    Info,
    Warn,
}

/// A transient on-screen message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: NoticeSeverity,
    /// Monotonic timestamp at posting.
    pub posted_at_ms: f64,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>, severity: NoticeSeverity, now_ms: f64) -> Self {
        Self { message: message.into(), severity, posted_at_ms: now_ms }
    }

    /// Whether the notice has outlived its display window. Exclusive
    /// boundary: a notice posted at `t` is expired at exactly `t + 3000`.
    #[must_use]
    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.posted_at_ms >= NOTICE_DURATION_MS
    }
}
