//! View state machine: manipulation surface vs. results surface.
//!
//! Four phases with timed, eased transitions. Input-driven edges are
//! `Hidden→Entering` (generate) and `Visible→Exiting` (swipe); the other
//! two are time-driven and advance when the tick loop polls the machine
//! against the monotonic clock. The machine never skips a phase.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ENTER_DURATION_MS, EXIT_DURATION_MS};

/// Which of the two surfaces is active, including in-between transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPhase {
    /// Manipulation surface active; results fully hidden.
    #[default]
    Hidden,
    /// Results surface scaling/fading in.
    Entering,
    /// Results surface fully shown.
    Visible,
    /// Results surface scaling/fading out.
    Exiting,
}

/// Phase change produced by a time-driven advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    BecameVisible,
    BecameHidden,
}

/// Derived presentation values the external renderer applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewVisual {
    pub phase: ViewPhase,
    pub scale: f64,
    pub opacity: f64,
}

/// Cubic ease-out: fast start, gentle landing.
#[must_use]
pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

/// Quadratic ease-out.
#[must_use]
pub fn ease_out_quad(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(2)
}

/// The session's view machine. Exactly one phase is active at a time.
#[derive(Debug, Default)]
pub struct ViewMachine {
    phase: ViewPhase,
    started_at_ms: f64,
}

impl ViewMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Whether input should route through the swipe detector rather than
    /// the drag manager.
    #[must_use]
    pub fn results_input_active(&self) -> bool {
        self.phase != ViewPhase::Hidden
    }

    /// Begin the `Entering` transition. Only honoured from `Hidden`.
    pub fn begin_enter(&mut self, now_ms: f64) -> bool {
        if self.phase != ViewPhase::Hidden {
            return false;
        }
        self.phase = ViewPhase::Entering;
        self.started_at_ms = now_ms;
        true
    }

    /// Begin the `Exiting` transition. Only honoured from `Visible`;
    /// a swipe arriving while `Hidden` or `Entering` has no effect.
    pub fn request_exit(&mut self, now_ms: f64) -> bool {
        if self.phase != ViewPhase::Visible {
            return false;
        }
        self.phase = ViewPhase::Exiting;
        self.started_at_ms = now_ms;
        true
    }

    /// Advance time-driven transitions. Returns the change, if any;
    /// reaching `Hidden` is the caller's single reset point.
    pub fn advance(&mut self, now_ms: f64) -> Option<PhaseChange> {
        match self.phase {
            ViewPhase::Entering if now_ms - self.started_at_ms >= ENTER_DURATION_MS => {
                self.phase = ViewPhase::Visible;
                Some(PhaseChange::BecameVisible)
            }
            ViewPhase::Exiting if now_ms - self.started_at_ms >= EXIT_DURATION_MS => {
                self.phase = ViewPhase::Hidden;
                Some(PhaseChange::BecameHidden)
            }
            _ => None,
        }
    }

    /// Derived scale/opacity for the current instant.
    #[must_use]
    pub fn visual(&self, now_ms: f64) -> ViewVisual {
        match self.phase {
            ViewPhase::Hidden => ViewVisual { phase: self.phase, scale: 0.3, opacity: 0.0 },
            ViewPhase::Visible => ViewVisual { phase: self.phase, scale: 1.0, opacity: 1.0 },
            ViewPhase::Entering => {
                let progress = ((now_ms - self.started_at_ms) / ENTER_DURATION_MS).min(1.0);
                let eased = ease_out_cubic(progress);
                ViewVisual {
                    phase: self.phase,
                    scale: 0.3 + 0.7 * eased,
                    opacity: eased,
                }
            }
            ViewPhase::Exiting => {
                let progress = ((now_ms - self.started_at_ms) / EXIT_DURATION_MS).min(1.0);
                let eased = ease_out_quad(progress);
                ViewVisual {
                    phase: self.phase,
                    scale: 1.0 - 0.7 * eased,
                    opacity: 1.0 - eased,
                }
            }
        }
    }
}
