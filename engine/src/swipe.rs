//! Horizontal swipe detection over the results surface.
//!
//! A swipe is tracked only while the index finger is extended; losing the
//! precondition abandons the gesture without an event. Completion needs a
//! long-enough horizontal travel, a straight-enough path, and has to land
//! inside a fixed time window.

#[cfg(test)]
#[path = "swipe_test.rs"]
mod swipe_test;

use crate::consts::{SWIPE_MAX_DY, SWIPE_MIN_DX, SWIPE_WINDOW_MS};
use crate::landmark::{INDEX_TIP, LandmarkSet};

/// In-progress swipe tracking state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeState {
    /// Whether a gesture is currently being tracked.
    pub tracking: bool,
    /// Fingertip position at tracking start.
    pub start_x: f64,
    pub start_y: f64,
    /// Most recent fingertip position.
    pub current_x: f64,
    pub current_y: f64,
    /// Monotonic timestamp at tracking start.
    pub started_at_ms: f64,
}

/// A completed swipe. Direction-agnostic for state transitions; the
/// signed horizontal delta is carried for the renderer's trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeComplete {
    pub delta_x: f64,
}

/// Tracks a single horizontal gesture on the first detected hand.
#[derive(Debug, Default)]
pub struct SwipeDetector {
    state: SwipeState,
}

impl SwipeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The state left by the most recent [`observe`](Self::observe).
    #[must_use]
    pub fn state(&self) -> SwipeState {
        self.state
    }

    /// Feed one tick's observation at monotonic time `now_ms`.
    ///
    /// Returns `Some` exactly when the gesture completes this tick:
    /// `|Δx| > 0.3 ∧ |Δy| < 0.2 ∧ elapsed < 1000 ms`. Reaching the time
    /// window without completing stops tracking silently.
    pub fn observe(&mut self, hand: Option<&LandmarkSet>, now_ms: f64) -> Option<SwipeComplete> {
        let Some(hand) = hand else {
            self.state.tracking = false;
            return None;
        };
        if !hand.index_extended() {
            self.state.tracking = false;
            return None;
        }

        let tip = hand.point(INDEX_TIP);
        if !self.state.tracking {
            self.state = SwipeState {
                tracking: true,
                start_x: tip.x,
                start_y: tip.y,
                current_x: tip.x,
                current_y: tip.y,
                started_at_ms: now_ms,
            };
            return None;
        }

        self.state.current_x = tip.x;
        self.state.current_y = tip.y;

        let delta_x = self.state.current_x - self.state.start_x;
        let delta_y = (self.state.current_y - self.state.start_y).abs();
        let elapsed = now_ms - self.state.started_at_ms;

        if elapsed >= SWIPE_WINDOW_MS {
            self.state.tracking = false;
            return None;
        }
        if delta_x.abs() > SWIPE_MIN_DX && delta_y < SWIPE_MAX_DY {
            self.state.tracking = false;
            return Some(SwipeComplete { delta_x });
        }
        None
    }

    /// Abandon any in-progress gesture.
    pub fn reset(&mut self) {
        self.state.tracking = false;
    }
}
