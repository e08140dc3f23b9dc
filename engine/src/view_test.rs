#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn entered(now_ms: f64) -> ViewMachine {
    let mut machine = ViewMachine::new();
    assert!(machine.begin_enter(now_ms));
    machine
}

fn visible(now_ms: f64) -> ViewMachine {
    let mut machine = entered(0.0);
    assert_eq!(machine.advance(ENTER_DURATION_MS), Some(PhaseChange::BecameVisible));
    assert!(now_ms >= ENTER_DURATION_MS);
    machine
}

// =============================================================
// Phase transitions
// =============================================================

#[test]
fn starts_hidden() {
    let machine = ViewMachine::new();
    assert_eq!(machine.phase(), ViewPhase::Hidden);
    assert!(!machine.results_input_active());
}

#[test]
fn enter_only_from_hidden() {
    let mut machine = entered(0.0);
    assert_eq!(machine.phase(), ViewPhase::Entering);
    assert!(!machine.begin_enter(10.0));
    assert_eq!(machine.phase(), ViewPhase::Entering);
}

#[test]
fn entering_becomes_visible_after_duration() {
    let mut machine = entered(100.0);
    assert_eq!(machine.advance(100.0 + ENTER_DURATION_MS - 1.0), None);
    assert_eq!(machine.phase(), ViewPhase::Entering);
    assert_eq!(machine.advance(100.0 + ENTER_DURATION_MS), Some(PhaseChange::BecameVisible));
    assert_eq!(machine.phase(), ViewPhase::Visible);
}

#[test]
fn exit_only_from_visible() {
    let mut machine = ViewMachine::new();
    assert!(!machine.request_exit(0.0));
    assert_eq!(machine.phase(), ViewPhase::Hidden);

    let mut machine = entered(0.0);
    assert!(!machine.request_exit(10.0));
    assert_eq!(machine.phase(), ViewPhase::Entering);

    let mut machine = visible(900.0);
    assert!(machine.request_exit(900.0));
    assert_eq!(machine.phase(), ViewPhase::Exiting);
}

#[test]
fn exiting_becomes_hidden_after_duration() {
    let mut machine = visible(900.0);
    machine.request_exit(900.0);
    assert_eq!(machine.advance(900.0 + EXIT_DURATION_MS - 1.0), None);
    assert_eq!(machine.advance(900.0 + EXIT_DURATION_MS), Some(PhaseChange::BecameHidden));
    assert_eq!(machine.phase(), ViewPhase::Hidden);
}

#[test]
fn full_cycle_never_skips_a_phase() {
    let mut machine = ViewMachine::new();
    let mut phases = vec![machine.phase()];
    machine.begin_enter(0.0);
    phases.push(machine.phase());
    machine.advance(ENTER_DURATION_MS);
    phases.push(machine.phase());
    machine.request_exit(1000.0);
    phases.push(machine.phase());
    machine.advance(1000.0 + EXIT_DURATION_MS);
    phases.push(machine.phase());
    assert_eq!(
        phases,
        [
            ViewPhase::Hidden,
            ViewPhase::Entering,
            ViewPhase::Visible,
            ViewPhase::Exiting,
            ViewPhase::Hidden,
        ]
    );
}

#[test]
fn advance_is_idle_in_stable_phases() {
    let mut machine = ViewMachine::new();
    assert_eq!(machine.advance(1e9), None);
    let mut machine = visible(900.0);
    assert_eq!(machine.advance(1e9), None);
}

#[test]
fn input_routing_flag_per_phase() {
    let mut machine = ViewMachine::new();
    assert!(!machine.results_input_active());
    machine.begin_enter(0.0);
    assert!(machine.results_input_active());
    machine.advance(ENTER_DURATION_MS);
    assert!(machine.results_input_active());
    machine.request_exit(1000.0);
    assert!(machine.results_input_active());
    machine.advance(1000.0 + EXIT_DURATION_MS);
    assert!(!machine.results_input_active());
}

// =============================================================
// Easing
// =============================================================

#[test]
fn ease_out_cubic_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
}

#[test]
fn ease_out_cubic_midpoint() {
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
}

#[test]
fn ease_out_quad_endpoints() {
    assert_eq!(ease_out_quad(0.0), 0.0);
    assert_eq!(ease_out_quad(1.0), 1.0);
}

#[test]
fn ease_out_quad_midpoint() {
    assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-12);
}

// =============================================================
// Visuals
// =============================================================

#[test]
fn hidden_visual_is_collapsed() {
    let machine = ViewMachine::new();
    let visual = machine.visual(0.0);
    assert_eq!(visual.opacity, 0.0);
    assert_eq!(visual.scale, 0.3);
}

#[test]
fn entering_visual_starts_collapsed() {
    let machine = entered(0.0);
    let visual = machine.visual(0.0);
    assert_eq!(visual.phase, ViewPhase::Entering);
    assert_eq!(visual.scale, 0.3);
    assert_eq!(visual.opacity, 0.0);
}

#[test]
fn entering_visual_follows_cubic_ease() {
    let machine = entered(0.0);
    let visual = machine.visual(400.0);
    let eased = ease_out_cubic(0.5);
    assert!((visual.scale - (0.3 + 0.7 * eased)).abs() < 1e-12);
    assert!((visual.opacity - eased).abs() < 1e-12);
}

#[test]
fn entering_visual_saturates_past_duration() {
    // Progress clamps at 1 even if the machine hasn't been advanced yet.
    let machine = entered(0.0);
    let visual = machine.visual(ENTER_DURATION_MS * 2.0);
    assert!((visual.scale - 1.0).abs() < 1e-12);
    assert_eq!(visual.opacity, 1.0);
}

#[test]
fn visible_visual_is_full() {
    let machine = visible(900.0);
    let visual = machine.visual(5000.0);
    assert_eq!(visual.scale, 1.0);
    assert_eq!(visual.opacity, 1.0);
}

#[test]
fn exiting_visual_follows_quadratic_ease() {
    let mut machine = visible(900.0);
    machine.request_exit(1000.0);
    let visual = machine.visual(1300.0);
    let eased = ease_out_quad(0.5);
    assert!((visual.scale - (1.0 - 0.7 * eased)).abs() < 1e-12);
    assert!((visual.opacity - (1.0 - eased)).abs() < 1e-12);
}

#[test]
fn exiting_visual_ends_collapsed() {
    let mut machine = visible(900.0);
    machine.request_exit(1000.0);
    let visual = machine.visual(1000.0 + EXIT_DURATION_MS);
    assert!((visual.scale - 0.3).abs() < 1e-12);
    assert_eq!(visual.opacity, 0.0);
}
