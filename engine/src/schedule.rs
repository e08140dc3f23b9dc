//! Frame scheduling primitives: the 30 Hz tick gate and the deadline
//! table.
//!
//! Both loops in the host re-arm unconditionally; the gate decides
//! whether an armed callback actually does work. Deferred one-shot
//! actions (the generate delay) live in an explicit deadline table
//! checked once per executed tick, so teardown is just dropping the
//! table — no opaque scheduled callbacks to hunt down.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use crate::consts::TICK_INTERVAL_MS;

/// Elapsed-time gate capping executed ticks at 30 Hz.
///
/// Under-budget frames return `false` and leave the accounting
/// untouched; the caller still re-arms its callback.
#[derive(Debug, Default)]
pub struct TickGate {
    last_tick_ms: Option<f64>,
}

impl TickGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tick at `now_ms` is due. Advances the gate when it is.
    pub fn should_run(&mut self, now_ms: f64) -> bool {
        match self.last_tick_ms {
            Some(last) if now_ms - last < TICK_INTERVAL_MS => false,
            _ => {
                self.last_tick_ms = Some(now_ms);
                true
            }
        }
    }
}

/// What a fired deadline means to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineKind {
    /// The generate delay elapsed; the results surface may enter.
    ShowResults,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    kind: DeadlineKind,
    due_at_ms: f64,
}

/// One-shot deadlines polled against the monotonic clock.
#[derive(Debug, Default)]
pub struct DeadlineTable {
    entries: Vec<Deadline>,
}

impl DeadlineTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once `delay_ms` from `now_ms`.
    pub fn schedule(&mut self, kind: DeadlineKind, now_ms: f64, delay_ms: f64) {
        self.entries.push(Deadline { kind, due_at_ms: now_ms + delay_ms });
    }

    /// Remove and return every deadline due at `now_ms`, in scheduling
    /// order. Each entry fires exactly once.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<DeadlineKind> {
        let mut due = Vec::new();
        self.entries.retain(|entry| {
            if entry.due_at_ms <= now_ms {
                due.push(entry.kind);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop all pending deadlines (teardown, or a surface reset).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
