//! Drag management: pinch edges against tokens, the drop zone, and the
//! generate button.
//!
//! The manager owns the token collection and all cross-tick drag context
//! as explicit fields — the current drag target, the previous pinch
//! point, the button latch — so each tick is a plain method call with no
//! aliased state. Host-relevant outcomes are returned as [`DragEvent`]s
//! for the session to process, in the same spirit as the action lists the
//! canvas engine hands back to its host.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::consts::{FALLBACK_VIEWPORT_PX, POSITION_MAX, POSITION_MIN, TOKEN_HIT_RADIUS_PX};
use crate::token::{DroppedSet, Rect, TableToken, TokenId, TokenStore, default_drop_zone, default_generate_button};

/// Host-relevant outcome of a pinch edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// Generate pressed with a non-empty dropped set. Carries the
    /// snapshot of table names to fetch.
    GenerateRequested { tables: Vec<String> },
    /// Generate pressed while the dropped set was empty.
    GenerateRejected,
    /// A token was released inside the drop zone and newly recorded.
    TokenDropped { name: String },
}

/// Convert the fixed pixel hit radius to normalized units for the
/// current viewport. The physical grab target scales with the smaller
/// dimension; before the host reports real dimensions a reference size
/// is assumed.
#[must_use]
pub fn normalized_hit_radius(viewport_width: f64, viewport_height: f64) -> f64 {
    let smaller = viewport_width.min(viewport_height);
    let reference = if smaller > 0.0 { smaller } else { FALLBACK_VIEWPORT_PX };
    TOKEN_HIT_RADIUS_PX / reference
}

/// Owns the token collection and evaluates pinch edges against it.
#[derive(Debug)]
pub struct DragManager {
    store: TokenStore,
    zone: Rect,
    button: Rect,
    drag_target: Option<TokenId>,
    last_point: (f64, f64),
    button_hover: bool,
    button_latched: bool,
    dropped: DroppedSet,
}

impl Default for DragManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DragManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: TokenStore::new(),
            zone: default_drop_zone(),
            button: default_generate_button(),
            drag_target: None,
            last_point: (0.0, 0.0),
            button_hover: false,
            button_latched: false,
            dropped: DroppedSet::new(),
        }
    }

    /// Install the session's tokens. Called once, when the table list
    /// first becomes available.
    pub fn set_tokens(&mut self, store: TokenStore) {
        self.store = store;
    }

    // --- Queries ---

    #[must_use]
    pub fn tokens(&self) -> &[TableToken] {
        self.store.tokens()
    }

    #[must_use]
    pub fn drop_zone(&self) -> Rect {
        self.zone
    }

    #[must_use]
    pub fn button(&self) -> Rect {
        self.button
    }

    #[must_use]
    pub fn button_hovered(&self) -> bool {
        self.button_hover
    }

    #[must_use]
    pub fn dropped(&self) -> &DroppedSet {
        &self.dropped
    }

    #[must_use]
    pub fn drag_target(&self) -> Option<TokenId> {
        self.drag_target
    }

    // --- Pinch edges ---

    /// Pinch start: hit-test the button first, then each token's circular
    /// radius. First match wins; a miss is a no-op.
    pub fn on_pinch_start(&mut self, x: f64, y: f64, hit_radius: f64) -> Option<DragEvent> {
        self.last_point = (x, y);

        if self.button.contains(x, y) {
            self.button_hover = true;
            if self.button_latched {
                return None;
            }
            self.button_latched = true;
            return Some(self.evaluate_generate());
        }

        if let Some(id) = self.store.hit_test(x, y, hit_radius) {
            if let Some(token) = self.store.get_mut(id) {
                token.dragging = true;
            }
            self.drag_target = Some(id);
        }
        None
    }

    /// Pinch continue: displace the drag target by the pinch-point delta
    /// since the previous tick, then clamp to keep it fully on screen.
    pub fn on_pinch_continue(&mut self, x: f64, y: f64) {
        let (last_x, last_y) = self.last_point;
        let dx = x - last_x;
        let dy = y - last_y;
        self.last_point = (x, y);

        let Some(id) = self.drag_target else {
            return;
        };
        if let Some(token) = self.store.get_mut(id) {
            token.x = (token.x + dx).clamp(POSITION_MIN, POSITION_MAX);
            token.y = (token.y + dy).clamp(POSITION_MIN, POSITION_MAX);
        }
    }

    /// Pinch release: clear drag and button state, then commit drop-zone
    /// membership for the released token. The token stays wherever it was
    /// released.
    pub fn on_pinch_release(&mut self) -> Option<DragEvent> {
        self.button_hover = false;
        self.button_latched = false;

        let id = self.drag_target.take()?;
        let token = self.store.get_mut(id)?;
        token.dragging = false;

        if self.zone.contains(token.x, token.y) {
            let name = token.name.clone();
            if self.dropped.insert(&name) {
                return Some(DragEvent::TokenDropped { name });
            }
        }
        None
    }

    /// Drop an in-flight drag without evaluating the drop zone. Used
    /// when input routing leaves the manipulation surface mid-gesture.
    pub fn abort_drag(&mut self) {
        self.button_hover = false;
        self.button_latched = false;
        if let Some(id) = self.drag_target.take() {
            if let Some(token) = self.store.get_mut(id) {
                token.dragging = false;
            }
        }
    }

    /// Reset for a new manipulation cycle: membership cleared, any
    /// in-flight drag dropped.
    pub fn reset_cycle(&mut self) {
        self.dropped.clear();
        self.abort_drag();
    }

    fn evaluate_generate(&self) -> DragEvent {
        if self.dropped.is_empty() {
            DragEvent::GenerateRejected
        } else {
            DragEvent::GenerateRequested { tables: self.dropped.to_vec() }
        }
    }
}
