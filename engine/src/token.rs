//! Table tokens and the static screen geometry they interact with.
//!
//! Tokens are created once, when the catalog's table list first becomes
//! available, and live for the whole session — repositioned and
//! re-flagged, never destroyed. The drop zone and generate button are
//! fixed normalized rectangles.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{POSITION_MAX, POSITION_MIN, TOKEN_ROW_X_MAX, TOKEN_ROW_X_MIN, TOKEN_ROW_Y};

/// Unique identifier for a table token.
pub type TokenId = Uuid;

/// A draggable on-screen token representing one catalog table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableToken {
    /// Stable for the token's lifetime.
    pub id: TokenId,
    /// The catalog table this token stands for.
    pub name: String,
    /// Center x, normalized [0, 1].
    pub x: f64,
    /// Center y, normalized [0, 1].
    pub y: f64,
    /// Whether a pinch-drag currently references this token.
    pub dragging: bool,
}

/// Axis-aligned normalized rectangle given by center and extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self { center_x, center_y, width, height }
    }

    /// Containment test against the rectangle bounds, edges inclusive.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.center_x).abs() <= self.width / 2.0 && (y - self.center_y).abs() <= self.height / 2.0
    }
}

/// Default drop-zone geometry: lower-center of the screen.
#[must_use]
pub fn default_drop_zone() -> Rect {
    Rect::new(0.5, 0.78, 0.36, 0.26)
}

/// Default generate-button geometry: lower-right corner.
#[must_use]
pub fn default_generate_button() -> Rect {
    Rect::new(0.88, 0.9, 0.16, 0.1)
}

/// Owns all live tokens for the session.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: Vec<TableToken>,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one token per table name, spread evenly along the fixed
    /// initial row. Positions always land inside the clamp range.
    #[must_use]
    pub fn from_table_names(names: &[String]) -> Self {
        let count = names.len();
        let tokens = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let x = if count <= 1 {
                    (TOKEN_ROW_X_MIN + TOKEN_ROW_X_MAX) / 2.0
                } else {
                    let span = TOKEN_ROW_X_MAX - TOKEN_ROW_X_MIN;
                    TOKEN_ROW_X_MIN + span * (i as f64) / ((count - 1) as f64)
                };
                TableToken {
                    id: Uuid::new_v4(),
                    name: name.clone(),
                    x: x.clamp(POSITION_MIN, POSITION_MAX),
                    y: TOKEN_ROW_Y,
                    dragging: false,
                }
            })
            .collect();
        Self { tokens }
    }

    /// Tokens in creation order.
    #[must_use]
    pub fn tokens(&self) -> &[TableToken] {
        &self.tokens
    }

    /// Look up a token by id.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&TableToken> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut TableToken> {
        self.tokens.iter_mut().find(|t| t.id == id)
    }

    /// First token whose center lies within `radius` of the point,
    /// searched in creation order.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64, radius: f64) -> Option<TokenId> {
        self.tokens
            .iter()
            .find(|t| {
                let dx = t.x - x;
                let dy = t.y - y;
                (dx * dx + dy * dy).sqrt() < radius
            })
            .map(|t| t.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Ordered, duplicate-free set of table names released inside the drop
/// zone. Append-only until the view machine resets to hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DroppedSet {
    names: Vec<String>,
}

impl DroppedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a name unless already present. Returns whether it was
    /// inserted; first-insertion order is preserved.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_owned());
        true
    }

    /// Names in first-insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Snapshot the current membership.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
