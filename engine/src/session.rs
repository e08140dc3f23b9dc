//! Top-level session: owns every piece of persistent mutable state and
//! runs the per-tick pipeline.
//!
//! The host arms two callback loops and forwards their results here:
//! inference completions land in [`SessionCore::submit_frame`] (a single
//! latest-frame slot, newer results simply overwrite older ones), and the
//! render-rate loop calls [`SessionCore::frame`] which gates itself to
//! 30 Hz. Within an executed tick the order is fixed: the slot is read
//! once, detectors and managers update, time-driven transitions advance,
//! and the resulting [`RenderSnapshot`] goes back to the host.
//!
//! Both loops run on one logical thread of cooperative callbacks, which
//! is why the latest-frame slot is a plain `Option`. A port to a
//! preemptive environment must replace it with an atomically-swapped
//! handle before anything else.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use thiserror::Error;

use crate::catalog::ResultsData;
use crate::consts::GENERATE_DELAY_MS;
use crate::drag::{DragEvent, DragManager, normalized_hit_radius};
use crate::landmark::HandFrame;
use crate::notice::{Notice, NoticeSeverity};
use crate::pinch::{PinchDetector, PinchEdge};
use crate::schedule::{DeadlineKind, DeadlineTable, TickGate};
use crate::snapshot::{ButtonView, DropZoneView, PinchIndicator, RenderSnapshot, SwipeTrail};
use crate::swipe::SwipeDetector;
use crate::token::TokenStore;
use crate::view::{PhaseChange, ViewMachine, ViewPhase};

/// Errors surfaced to the host during session setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// [`SessionCore::load_tables`] was called a second time; tokens are
    /// created once and live for the session.
    #[error("table tokens already loaded")]
    TablesAlreadyLoaded,
    /// The catalog reported no tables; the host should substitute a
    /// fallback list before loading.
    #[error("table list is empty")]
    EmptyTableList,
}

/// Side effects the host must perform after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Fetch rows for the named tables from the catalog service.
    FetchTables { tables: Vec<String> },
}

/// Result of one executed tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub snapshot: RenderSnapshot,
    pub actions: Vec<SessionAction>,
}

/// The session core. See the module docs for the tick pipeline.
#[derive(Debug, Default)]
pub struct SessionCore {
    pinch: PinchDetector,
    swipe: SwipeDetector,
    drag: DragManager,
    view: ViewMachine,
    gate: TickGate,
    deadlines: DeadlineTable,
    latest_frame: Option<HandFrame>,
    results: Option<ResultsData>,
    notice: Option<Notice>,
    tokens_loaded: bool,
    viewport_width: f64,
    viewport_height: f64,
}

impl SessionCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Record the canvas dimensions used to size the token hit radius.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Create one token per table name. Called once, when the catalog's
    /// table list first becomes available.
    ///
    /// # Errors
    ///
    /// [`SessionError::TablesAlreadyLoaded`] on a repeat call;
    /// [`SessionError::EmptyTableList`] when `names` is empty.
    pub fn load_tables(&mut self, names: &[String]) -> Result<(), SessionError> {
        if self.tokens_loaded {
            return Err(SessionError::TablesAlreadyLoaded);
        }
        if names.is_empty() {
            return Err(SessionError::EmptyTableList);
        }
        self.drag.set_tokens(TokenStore::from_table_names(names));
        self.tokens_loaded = true;
        log::info!("session ready with {} table tokens", names.len());
        Ok(())
    }

    /// Overwrite the latest-frame slot with a fresh inference result.
    /// Called from the inference loop at whatever cadence detection
    /// actually achieves; ticks read whatever is newest.
    pub fn submit_frame(&mut self, frame: HandFrame) {
        self.latest_frame = Some(frame);
    }

    /// Hand over fetched (or fabricated) rows. Ignored when no results
    /// surface is pending — a late fetch landing after the user already
    /// swiped the surface away must not resurrect it.
    pub fn supply_results(&mut self, data: ResultsData) {
        if self.deadlines.is_empty() && !self.view.results_input_active() {
            log::warn!("dropping stale catalog results; no results surface pending");
            return;
        }
        self.results = Some(data);
    }

    /// Post a user-facing notice, replacing any currently shown.
    pub fn post_notice(&mut self, message: impl Into<String>, severity: NoticeSeverity, now_ms: f64) {
        self.notice = Some(Notice::new(message, severity, now_ms));
    }

    // --- Queries ---

    #[must_use]
    pub fn view_phase(&self) -> ViewPhase {
        self.view.phase()
    }

    #[must_use]
    pub fn tokens_loaded(&self) -> bool {
        self.tokens_loaded
    }

    #[must_use]
    pub fn dropped_tables(&self) -> &[String] {
        self.drag.dropped().names()
    }

    // --- Tick ---

    /// Run one frame of the interaction loop at monotonic time `now_ms`.
    ///
    /// Returns `None` when the 30 Hz gate skips this frame; the caller
    /// re-arms its callback either way.
    pub fn frame(&mut self, now_ms: f64) -> Option<TickOutput> {
        if !self.gate.should_run(now_ms) {
            return None;
        }
        Some(self.tick(now_ms))
    }

    fn tick(&mut self, now_ms: f64) -> TickOutput {
        let mut actions = Vec::new();

        // Deferred one-shots scheduled by earlier ticks.
        for kind in self.deadlines.take_due(now_ms) {
            match kind {
                DeadlineKind::ShowResults => {
                    if self.view.begin_enter(now_ms) {
                        self.pinch.reset();
                        self.drag.abort_drag();
                    }
                }
            }
        }

        // The tick's single read of the latest-frame slot.
        let frame = self.latest_frame.clone().unwrap_or_default();
        let hand = frame.first_hand();

        if self.view.results_input_active() {
            if self.swipe.observe(hand, now_ms).is_some() {
                self.view.request_exit(now_ms);
            }
        } else {
            match self.pinch.observe(hand) {
                PinchEdge::Start => {
                    let state = self.pinch.state();
                    let radius = normalized_hit_radius(self.viewport_width, self.viewport_height);
                    if let Some(event) = self.drag.on_pinch_start(state.x, state.y, radius) {
                        self.handle_drag_event(event, now_ms, &mut actions);
                    }
                }
                PinchEdge::Continue => {
                    let state = self.pinch.state();
                    self.drag.on_pinch_continue(state.x, state.y);
                }
                PinchEdge::Release => {
                    if let Some(event) = self.drag.on_pinch_release() {
                        self.handle_drag_event(event, now_ms, &mut actions);
                    }
                }
                PinchEdge::None => {}
            }
        }

        // Time-driven view transitions; reaching hidden is the single
        // reset point for the next manipulation cycle.
        if let Some(change) = self.view.advance(now_ms) {
            match change {
                PhaseChange::BecameHidden => {
                    self.results = None;
                    self.drag.reset_cycle();
                    self.swipe.reset();
                    self.deadlines.clear();
                }
                PhaseChange::BecameVisible => {}
            }
        }

        if self.notice.as_ref().is_some_and(|n| n.expired(now_ms)) {
            self.notice = None;
        }

        TickOutput { snapshot: self.snapshot(&frame, now_ms), actions }
    }

    fn handle_drag_event(&mut self, event: DragEvent, now_ms: f64, actions: &mut Vec<SessionAction>) {
        match event {
            DragEvent::GenerateRequested { tables } => {
                self.post_notice(
                    format!("Generating results for {} table(s)…", tables.len()),
                    NoticeSeverity::Info,
                    now_ms,
                );
                self.deadlines.schedule(DeadlineKind::ShowResults, now_ms, GENERATE_DELAY_MS);
                actions.push(SessionAction::FetchTables { tables });
            }
            DragEvent::GenerateRejected => {
                self.post_notice("Drop a table into the zone first", NoticeSeverity::Warn, now_ms);
            }
            DragEvent::TokenDropped { name } => {
                log::debug!("table {name} added to the drop zone");
            }
        }
    }

    fn snapshot(&self, frame: &HandFrame, now_ms: f64) -> RenderSnapshot {
        let pinch_state = self.pinch.state();
        let swipe_state = self.swipe.state();
        RenderSnapshot {
            tokens: self.drag.tokens().to_vec(),
            hands: frame.hands().to_vec(),
            pinch: pinch_state
                .pinching
                .then_some(PinchIndicator { x: pinch_state.x, y: pinch_state.y }),
            swipe_trail: swipe_state.tracking.then_some(SwipeTrail {
                start_x: swipe_state.start_x,
                start_y: swipe_state.start_y,
                current_x: swipe_state.current_x,
                current_y: swipe_state.current_y,
            }),
            button: ButtonView { rect: self.drag.button(), hovered: self.drag.button_hovered() },
            drop_zone: DropZoneView { rect: self.drag.drop_zone(), member_count: self.drag.dropped().len() },
            view: self.view.visual(now_ms),
            results: if self.view.results_input_active() { self.results.clone() } else { None },
            notice: self.notice.clone(),
        }
    }
}
