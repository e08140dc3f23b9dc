//! Pinch detection: thumb tip against index fingertip.
//!
//! The detector consumes one frame's first hand per tick and classifies
//! the transition edge against the previous tick. Hand disappearance
//! while pinching is a release, so a drag never sticks to a hand the
//! detector lost.

#[cfg(test)]
#[path = "pinch_test.rs"]
mod pinch_test;

use crate::consts::PINCH_THRESHOLD;
use crate::landmark::{INDEX_TIP, LandmarkSet, THUMB_TIP};

/// Transition edge between the previous and current pinch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchEdge {
    /// Not pinching, and wasn't last tick.
    None,
    /// Pinch began this tick.
    Start,
    /// Pinch held; the pinch point is refreshed.
    Continue,
    /// Pinch ended this tick, by opening the fingers or by the hand
    /// leaving the frame.
    Release,
}

/// Current pinch state. Transient — overwritten every tick, never
/// historical.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchState {
    /// Whether a pinch is currently held.
    pub pinching: bool,
    /// Last observed pinch point x (midpoint of the two fingertips).
    pub x: f64,
    /// Last observed pinch point y.
    pub y: f64,
}

/// Edge-classifying pinch detector.
#[derive(Debug, Default)]
pub struct PinchDetector {
    state: PinchState,
}

impl PinchDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The state left by the most recent [`observe`](Self::observe).
    #[must_use]
    pub fn state(&self) -> PinchState {
        self.state
    }

    /// Classify one tick's observation.
    ///
    /// `hand` is the frame's first hand, or `None` when no hand was
    /// detected. The pinch predicate is a strict threshold on the
    /// normalized fingertip distance; `(prev, curr)` maps to the edge as
    /// (false,true)→Start, (true,true)→Continue, (true,false)→Release,
    /// (false,false)→None.
    pub fn observe(&mut self, hand: Option<&LandmarkSet>) -> PinchEdge {
        let was_pinching = self.state.pinching;

        let now_pinching = match hand {
            Some(hand) => {
                let thumb = hand.point(THUMB_TIP);
                let index = hand.point(INDEX_TIP);
                if thumb.distance_to(&index) < PINCH_THRESHOLD {
                    let (x, y) = thumb.midpoint(&index);
                    self.state = PinchState { pinching: true, x, y };
                    true
                } else {
                    self.state.pinching = false;
                    false
                }
            }
            // No hand: keep the last pinch point for release handling but
            // drop the pinch itself.
            None => {
                self.state.pinching = false;
                false
            }
        };

        match (was_pinching, now_pinching) {
            (false, true) => PinchEdge::Start,
            (true, true) => PinchEdge::Continue,
            (true, false) => PinchEdge::Release,
            (false, false) => PinchEdge::None,
        }
    }

    /// Forget any held pinch, e.g. when input routing moves away from the
    /// manipulation surface.
    pub fn reset(&mut self) {
        self.state = PinchState::default();
    }
}
