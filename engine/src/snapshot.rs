//! The per-tick state snapshot handed to the external renderer.
//!
//! Everything the renderer needs to draw a frame, serialized across the
//! host boundary as plain data. The engine publishes; it never draws.

use serde::{Deserialize, Serialize};

use crate::catalog::ResultsData;
use crate::landmark::LandmarkSet;
use crate::notice::Notice;
use crate::token::{Rect, TableToken};
use crate::view::ViewVisual;

/// Pinch indicator for the renderer, present while a pinch is held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchIndicator {
    pub x: f64,
    pub y: f64,
}

/// Swipe trail endpoints, present while a swipe is being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeTrail {
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
}

/// Generate-button geometry plus its derived hover flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonView {
    pub rect: Rect,
    pub hovered: bool,
}

/// Drop-zone geometry plus current membership count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropZoneView {
    pub rect: Rect,
    pub member_count: usize,
}

/// One executed tick's full render state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// All tokens with positions and drag flags.
    pub tokens: Vec<TableToken>,
    /// Detected hands, for the renderer's skeleton pass.
    pub hands: Vec<LandmarkSet>,
    /// Present while pinching.
    pub pinch: Option<PinchIndicator>,
    /// Present while a swipe is tracked.
    pub swipe_trail: Option<SwipeTrail>,
    pub button: ButtonView,
    pub drop_zone: DropZoneView,
    /// View phase with derived scale/opacity.
    pub view: ViewVisual,
    /// Fetched (or fabricated) rows backing the results surface, when
    /// the surface is not hidden.
    pub results: Option<ResultsData>,
    /// Pending user-facing notice, if any.
    pub notice: Option<Notice>,
}
