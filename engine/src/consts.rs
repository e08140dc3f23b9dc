//! Shared numeric constants for the engine crate.

// ── Pinch ───────────────────────────────────────────────────────

/// Normalized thumb-tip↔index-tip distance below which a pinch is held.
/// Strict `<`; there is no hysteresis band, so a hand at exactly the
/// boundary may toggle per tick.
pub const PINCH_THRESHOLD: f64 = 0.05;

// ── Hit-testing and clamping ────────────────────────────────────

/// Token hit radius in screen pixels. Converted to normalized units by
/// dividing by the smaller viewport dimension, so the physical grab
/// target keeps its size on any canvas.
pub const TOKEN_HIT_RADIUS_PX: f64 = 40.0;

/// Reference viewport dimension used for the hit radius before the host
/// reports real canvas dimensions.
pub const FALLBACK_VIEWPORT_PX: f64 = 720.0;

/// Lower clamp bound for token centers, both axes.
pub const POSITION_MIN: f64 = 0.05;

/// Upper clamp bound for token centers, both axes.
pub const POSITION_MAX: f64 = 0.95;

// ── Swipe ───────────────────────────────────────────────────────

/// Minimum |Δx| (normalized) for a completed swipe. Strict `>`.
pub const SWIPE_MIN_DX: f64 = 0.3;

/// Maximum |Δy| (normalized) tolerated for a completed swipe. Strict `<`.
pub const SWIPE_MAX_DY: f64 = 0.2;

/// A swipe must complete within this window; at the boundary tracking
/// times out with no event.
pub const SWIPE_WINDOW_MS: f64 = 1000.0;

// ── View transitions ────────────────────────────────────────────

/// Duration of the `Entering` phase (cubic ease-out).
pub const ENTER_DURATION_MS: f64 = 800.0;

/// Duration of the `Exiting` phase (quadratic ease-out).
pub const EXIT_DURATION_MS: f64 = 600.0;

/// Delay between a successful generate action and the `Entering`
/// transition, leaving the posted notice visible first.
pub const GENERATE_DELAY_MS: f64 = 500.0;

// ── Scheduling ──────────────────────────────────────────────────

/// Minimum interval between executed interaction ticks (30 Hz cap).
pub const TICK_INTERVAL_MS: f64 = 1000.0 / 30.0;

// ── Notices ─────────────────────────────────────────────────────

/// User-facing notices expire this long after posting.
pub const NOTICE_DURATION_MS: f64 = 3000.0;

// ── Catalog ─────────────────────────────────────────────────────

/// Per-table row cap applied when ingesting catalog records.
pub const MAX_ROWS_PER_TABLE: usize = 20;

/// Rows fabricated per table when the catalog is unreachable.
pub const PLACEHOLDER_ROWS_PER_TABLE: usize = 5;

// ── Token layout ────────────────────────────────────────────────

/// Fixed y for the initial token row.
pub const TOKEN_ROW_Y: f64 = 0.2;

/// Horizontal span [left, right] across which the initial row spreads.
pub const TOKEN_ROW_X_MIN: f64 = 0.15;
pub const TOKEN_ROW_X_MAX: f64 = 0.85;
