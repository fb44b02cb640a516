// Host-side tests for deferred actions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod schedule {
    include!("../src/core/schedule.rs");
}

use schedule::*;

#[test]
fn actions_fire_only_once_due() {
    let mut s = Scheduler::new();
    s.schedule(1.0, Deferred::ResetDeck { round: 0 });
    let mut out = Vec::new();
    s.advance(0.5, &mut out);
    assert!(out.is_empty());
    assert_eq!(s.len(), 1);
    s.advance(0.6, &mut out);
    assert_eq!(out, vec![Deferred::ResetDeck { round: 0 }]);
    assert_eq!(s.len(), 0);

    out.clear();
    s.advance(10.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn due_actions_come_out_in_time_order() {
    let mut s = Scheduler::new();
    s.schedule(0.3, Deferred::HideLabel { card: 2, serial: 1 });
    s.schedule(0.1, Deferred::HideLabel { card: 1, serial: 1 });
    s.schedule(0.3, Deferred::ResetDeck { round: 4 });
    let mut out = Vec::new();
    s.advance(1.0, &mut out);
    assert_eq!(
        out,
        vec![
            Deferred::HideLabel { card: 1, serial: 1 },
            Deferred::HideLabel { card: 2, serial: 1 },
            Deferred::ResetDeck { round: 4 },
        ]
    );
}

#[test]
fn delays_are_relative_to_the_current_clock() {
    let mut s = Scheduler::new();
    let mut out = Vec::new();
    s.advance(2.0, &mut out);
    s.schedule(0.5, Deferred::ResetDeck { round: 1 });
    s.advance(0.4, &mut out);
    assert!(out.is_empty());
    s.advance(0.2, &mut out);
    assert_eq!(out.len(), 1);
    assert!((s.now_sec() - 2.6).abs() < 1e-5);
}

#[test]
fn negative_inputs_are_treated_as_zero() {
    let mut s = Scheduler::new();
    let mut out = Vec::new();
    s.advance(-3.0, &mut out);
    assert_eq!(s.now_sec(), 0.0);
    s.schedule(-1.0, Deferred::ResetDeck { round: 0 });
    s.advance(0.0, &mut out);
    assert_eq!(out.len(), 1);
}

#[test]
fn cancel_where_drops_matching_actions() {
    let mut s = Scheduler::new();
    s.schedule(1.0, Deferred::HideLabel { card: 0, serial: 3 });
    s.schedule(1.0, Deferred::HideLabel { card: 1, serial: 3 });
    s.schedule(1.0, Deferred::ResetDeck { round: 0 });
    assert!(s.is_pending(|a| matches!(a, Deferred::ResetDeck { .. })));

    s.cancel_where(|a| matches!(a, Deferred::HideLabel { card: 0, .. }));
    assert_eq!(s.len(), 2);
    s.cancel_where(|a| matches!(a, Deferred::ResetDeck { .. }));
    assert!(!s.is_pending(|a| matches!(a, Deferred::ResetDeck { .. })));

    let mut out = Vec::new();
    s.advance(2.0, &mut out);
    assert_eq!(out, vec![Deferred::HideLabel { card: 1, serial: 3 }]);
}
