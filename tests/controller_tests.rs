// Host-side tests for the interaction and animation controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod burst {
        include!("../src/core/burst.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod controller {
        include!("../src/core/controller.rs");
    }
    pub mod deck {
        include!("../src/core/deck.rs");
    }
    pub mod dust {
        include!("../src/core/dust.rs");
    }
    pub mod palette {
        include!("../src/core/palette.rs");
    }
    pub mod pick {
        include!("../src/core/pick.rs");
    }
    pub mod rng {
        include!("../src/core/rng.rs");
    }
    pub mod schedule {
        include!("../src/core/schedule.rs");
    }
    pub mod words {
        include!("../src/core/words.rs");
    }
}

use crate::core::config::ToyConfig;
use crate::core::constants::*;
use crate::core::controller::*;
use crate::core::deck::{FlipState, NullTextures};
use crate::core::rng::SeededRandom;
use crate::core::words::WordPool;
use glam::{Vec2, Vec3};
use std::collections::HashSet;

const FRAME: f32 = 1.0 / 60.0;

type Toy = Controller<NullTextures, SeededRandom>;

fn make_toy(cards: usize) -> Toy {
    let config = ToyConfig {
        card_count: Some(cards),
        dust_count: 0,
        ..ToyConfig::default()
    };
    Controller::new(config, WordPool::with_defaults(), SeededRandom::new(7), NullTextures)
}

fn run(toy: &mut Toy, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        toy.tick(FRAME);
    }
}

fn states(toy: &Toy) -> Vec<FlipState> {
    toy.deck().cards.iter().map(|c| c.flip).collect()
}

fn labels(toy: &Toy) -> Vec<String> {
    toy.deck().cards.iter().map(|c| c.label.clone()).collect()
}

#[test]
fn pick_starts_a_flip_and_counts_it() {
    let mut toy = make_toy(12);
    let ev = toy.pick(Some(3)).expect("idle card should flip");
    assert_eq!(ev.card, 3);
    assert!(ev.tone_index < TONE_BASE_FREQUENCIES.len());
    assert!(ev.playback_rate >= TONE_PITCH_MIN && ev.playback_rate <= TONE_PITCH_MAX);
    let expected_hz = TONE_BASE_FREQUENCIES[ev.tone_index] * ev.playback_rate;
    assert!((ev.frequency_hz - expected_hz).abs() < 1e-3);

    assert!(toy.deck().cards[3].flip.is_flipping());
    assert_eq!(toy.deck().flips_this_round, 1);
    assert_eq!(toy.bursts().len(), 1);
    assert_eq!(toy.bursts()[0].color, toy.deck().cards[3].palette.accent);
}

#[test]
fn picking_a_flipping_card_changes_nothing() {
    let mut toy = make_toy(12);
    toy.pick(Some(0));
    run(&mut toy, 0.1);
    let before = toy.deck().cards[0].flip;
    let serial = toy.deck().cards[0].flip_serial;

    assert!(toy.pick(Some(0)).is_none());
    assert_eq!(toy.deck().cards[0].flip, before);
    assert_eq!(toy.deck().cards[0].flip_serial, serial);
    assert_eq!(toy.deck().flips_this_round, 1);
    assert_eq!(toy.bursts().len(), 1);
}

#[test]
fn picking_empty_space_leaves_cards_alone() {
    let mut toy = make_toy(10);
    toy.pick(Some(1));
    run(&mut toy, 0.2);
    let before = states(&toy);

    assert!(toy.pick(None).is_none());
    assert!(toy.pick(Some(99)).is_none());
    assert_eq!(states(&toy), before);
    assert_eq!(toy.deck().flips_this_round, 1);
}

#[test]
fn flip_progress_rises_monotonically_then_returns_to_zero() {
    let mut toy = make_toy(10);
    toy.pick(Some(2));
    let mut last = 0.0;
    let mut frames = 0;
    while toy.deck().cards[2].flip.is_flipping() {
        toy.tick(FRAME);
        let p = toy.deck().cards[2].flip_progress();
        if toy.deck().cards[2].flip.is_flipping() {
            assert!(p >= last, "progress went backwards: {last} -> {p}");
            last = p;
        }
        frames += 1;
        assert!(frames < 600, "flip never completed");
    }
    assert_eq!(toy.deck().cards[2].flip, FlipState::Idle);
    assert_eq!(toy.deck().cards[2].flip_progress(), 0.0);
    // 0.55 s at 60 fps
    assert!((30..=36).contains(&frames), "took {frames} frames");
}

#[test]
fn label_is_revealed_past_the_halfway_mark() {
    let mut toy = make_toy(10);
    toy.pick(Some(0));
    run(&mut toy, 0.1);
    assert!(!toy.deck().cards[0].is_revealed());
    assert!(toy.deck().cards[0].label_opacity < 1e-6);
    run(&mut toy, 0.3);
    assert!(toy.deck().cards[0].is_revealed());
    assert!(toy.deck().cards[0].label_opacity > 0.0);
}

#[test]
fn completed_flip_hides_label_after_linger() {
    let mut toy = make_toy(10);
    toy.pick(Some(4));
    run(&mut toy, FLIP_DURATION_SEC + 0.05);
    assert!(!toy.deck().cards[4].flip.is_flipping());
    assert_eq!(toy.pending_actions(), 1);
    assert!(toy.deck().cards[4].label_opacity > 0.0);

    run(&mut toy, LABEL_LINGER_SEC + 0.05);
    assert_eq!(toy.pending_actions(), 0);
    assert_eq!(toy.deck().cards[4].label_opacity, 0.0);
    assert_eq!(toy.deck().cards[4].spin, 0.0);
}

#[test]
fn stale_hide_label_does_not_touch_a_reflipped_card() {
    let mut toy = make_toy(10);
    toy.pick(Some(0));
    run(&mut toy, FLIP_DURATION_SEC + 0.05); // first hide now pending
    assert!(toy.pick(Some(0)).is_some());
    run(&mut toy, FLIP_DURATION_SEC + 0.05); // second flip done, second hide pending

    // first hide comes due here; it belongs to the earlier flip
    run(&mut toy, LABEL_LINGER_SEC - FLIP_DURATION_SEC);
    let card = &toy.deck().cards[0];
    assert!(card.label_opacity > 0.0, "label snapped by a stale hide");
    assert!(card.spin > 0.0);
    assert_eq!(toy.pending_actions(), 1);

    run(&mut toy, FLIP_DURATION_SEC + 0.1);
    assert_eq!(toy.deck().cards[0].label_opacity, 0.0);
    assert_eq!(toy.pending_actions(), 0);
}

#[test]
fn four_flips_do_not_schedule_a_reset() {
    let mut toy = make_toy(12);
    for i in 0..4 {
        assert!(toy.pick(Some(i)).is_some());
        run(&mut toy, 0.05);
    }
    assert_eq!(toy.deck().flips_this_round, 4);
    assert!(!toy.reset_pending());
    run(&mut toy, 5.0);
    assert_eq!(toy.deck().round, 0);
    assert_eq!(toy.deck().flips_this_round, 4);
}

#[test]
fn fifth_flip_resets_the_round_after_the_delay() {
    let mut toy = make_toy(12);
    for i in 0..5 {
        assert!(toy.pick(Some(i)).is_some());
        run(&mut toy, 0.05);
    }
    assert_eq!(toy.deck().flips_this_round, 5);
    assert!(toy.reset_pending());

    // the deck is locked until the reset lands
    assert!(toy.pick(Some(8)).is_none());
    assert_eq!(toy.deck().flips_this_round, 5);
    assert!(!toy.deck().cards[8].flip.is_flipping());

    run(&mut toy, RESET_DELAY_SEC + 0.1);
    let deck = toy.deck();
    assert_eq!(deck.round, 1);
    assert_eq!(deck.flips_this_round, 0);
    assert_eq!(deck.len(), 12);
    assert!(deck.cards.iter().all(|c| c.flip == FlipState::Idle));
    assert!(deck.cards.iter().all(|c| c.label_opacity == 0.0));
    assert!(!toy.reset_pending());
    // hides queued by the old round were dropped
    assert_eq!(toy.pending_actions(), 0);

    let fresh = labels(&toy);
    let unique: HashSet<_> = fresh.iter().collect();
    assert_eq!(unique.len(), 12);
    assert_eq!(toy.deck().pool().remaining(), toy.deck().pool().len() - 12);

    // a new round accepts picks again
    assert!(toy.pick(Some(8)).is_some());
    assert_eq!(toy.deck().flips_this_round, 1);
}

#[test]
fn reset_is_scheduled_exactly_once() {
    let mut toy = make_toy(10);
    for i in 0..5 {
        toy.pick(Some(i));
    }
    // five flips in flight, one reset
    assert_eq!(toy.pending_actions(), 1);
    run(&mut toy, RESET_DELAY_SEC + 0.1);
    assert_eq!(toy.deck().round, 1);
    run(&mut toy, 5.0);
    assert_eq!(toy.deck().round, 1);
}

#[test]
fn manual_reset_cancels_the_pending_round_reset() {
    let mut toy = make_toy(10);
    for i in 0..5 {
        toy.pick(Some(i));
    }
    assert!(toy.reset_pending());
    toy.request_reset();
    assert_eq!(toy.deck().round, 1);
    assert_eq!(toy.deck().flips_this_round, 0);
    assert!(!toy.reset_pending());
    assert_eq!(toy.pending_actions(), 0);

    run(&mut toy, RESET_DELAY_SEC + 1.0);
    assert_eq!(toy.deck().round, 1);
}

#[test]
fn manual_reset_mid_flip_returns_cards_to_idle() {
    let mut toy = make_toy(10);
    toy.pick(Some(0));
    run(&mut toy, 0.2);
    toy.request_reset();
    assert_eq!(toy.deck().cards[0].flip, FlipState::Idle);
    assert_eq!(toy.deck().cards[0].spin, 0.0);
    run(&mut toy, 3.0);
    assert_eq!(toy.pending_actions(), 0);
}

fn front_card(toy: &Toy) -> (usize, CardPose) {
    toy.card_poses()
        .enumerate()
        .max_by(|a, b| a.1.position.z.total_cmp(&b.1.position.z))
        .expect("deck is not empty")
}

fn ndc_of(toy: &Toy, world: Vec3) -> Vec2 {
    let clip = toy.camera().view_projection() * world.extend(1.0);
    (clip / clip.w).truncate().truncate()
}

#[test]
fn hover_lifts_only_idle_cards() {
    let mut toy = make_toy(10);
    toy.tick(FRAME);
    let (front, pose) = front_card(&toy);
    toy.set_pointer(Some(ndc_of(&toy, pose.position)));
    assert_eq!(toy.hover(), Some(front));
    run(&mut toy, 0.5);
    assert_eq!(toy.hover(), Some(front));
    assert!(toy.deck().cards[front].hover_lift > 0.5 * HOVER_LIFT);
    assert!(toy.card_poses().nth(front).map(|p| p.hovered).unwrap_or(false));

    toy.pick(Some(front));
    assert!(!toy.card_poses().nth(front).map(|p| p.hovered).unwrap_or(true));

    toy.set_pointer(None);
    assert_eq!(toy.hover(), None);
    toy.set_pointer(Some(Vec2::new(f32::NAN, 0.0)));
    assert_eq!(toy.hover(), None);
}

#[test]
fn hover_follows_cards_moving_under_a_still_pointer() {
    let mut toy = make_toy(12);
    toy.tick(FRAME);
    let (front, pose) = front_card(&toy);
    // just inside the card's side edge, so drift and orbit carry it away
    let edge = pose.position + pose.rotation * Vec3::new(0.48 * CARD_WIDTH, 0.0, 0.0);
    let ndc = ndc_of(&toy, edge);
    toy.set_pointer(Some(ndc));
    assert_eq!(toy.hover(), Some(front));

    let mut left_card = false;
    for _ in 0..1800 {
        let under_pointer = toy.hit_test(ndc);
        toy.tick(FRAME);
        assert_eq!(toy.hover(), under_pointer);
        if under_pointer != Some(front) {
            left_card = true;
            assert!(!toy.card_poses().nth(front).map(|p| p.hovered).unwrap_or(true));
        }
    }
    assert!(left_card, "pointer never left the card");
}

#[test]
fn idle_spin_and_label_decay_gradually_before_the_snap() {
    let mut toy = make_toy(10);
    toy.pick(Some(3));
    while toy.deck().cards[3].flip.is_flipping() {
        toy.tick(FRAME);
    }
    let spin_keep = 1.0 - frame_lerp(IDLE_SPIN_DECAY, FRAME);
    let label_keep = 1.0 - frame_lerp(IDLE_LABEL_DECAY, FRAME);
    let card = &toy.deck().cards[3];
    let (mut spin, mut label) = (card.spin, card.label_opacity);
    assert!(spin > 3.0 && label > 0.99);

    // well inside the linger window, so no snap yet
    for _ in 0..60 {
        toy.tick(FRAME);
        let card = &toy.deck().cards[3];
        assert!((card.spin - spin * spin_keep).abs() < 1e-4);
        assert!((card.label_opacity - label * label_keep).abs() < 1e-4);
        assert!(card.spin > 0.0 && card.spin < spin);
        assert!(card.label_opacity > 0.0 && card.label_opacity < label);
        spin = card.spin;
        label = card.label_opacity;
    }
    assert_eq!(toy.pending_actions(), 1);
}

#[test]
fn ring_rotation_eases_toward_its_slot_after_reset() {
    let mut toy = make_toy(12);
    run(&mut toy, 1.0);
    toy.request_reset();
    let ease = frame_lerp(RING_EASE, FRAME);
    for _ in 0..240 {
        let before: Vec<f32> = toy.deck().cards.iter().map(|c| c.ring_rotation).collect();
        toy.tick(FRAME);
        let t = toy.elapsed_sec();
        for (card, old) in toy.deck().cards.iter().zip(before) {
            let sway = (t * RING_DRIFT_FREQUENCY + card.wobble_phase()).sin() * RING_DRIFT_AMPLITUDE;
            let target = card.base_rotation + sway;
            let expected = old + (target - old) * ease;
            assert!((card.ring_rotation - expected).abs() < 1e-5);
            assert!((card.ring_rotation - card.base_rotation).abs() <= RING_DRIFT_AMPLITUDE + 1e-4);
        }
    }
}

#[test]
fn tick_clamps_bad_frame_times() {
    let mut toy = make_toy(10);
    toy.tick(f32::NAN);
    assert_eq!(toy.elapsed_sec(), 0.0);
    toy.tick(-1.0);
    assert_eq!(toy.elapsed_sec(), 0.0);
    toy.tick(5.0);
    assert!((toy.elapsed_sec() - MAX_TICK_SEC).abs() < 1e-6);
}

#[test]
fn idle_cards_stay_near_their_ring_slot() {
    let mut toy = make_toy(12);
    run(&mut toy, 20.0);
    let bound = DRIFT_MAGNITUDE + BOB_AMPLITUDE + HOVER_LIFT + 1e-3;
    for card in &toy.deck().cards {
        let d = card.position - card.base_position;
        assert!(d.length() <= bound, "card drifted {}", d.length());
        assert!(card.orientation.is_normalized());
    }
}

#[test]
fn bursts_expire_and_leave_the_active_set() {
    let mut toy = make_toy(10);
    toy.pick(Some(0));
    toy.pick(Some(1));
    for _ in 0..50 {
        toy.tick(FRAME);
        for b in toy.bursts() {
            assert!(b.age_sec >= 0.0 && b.age_sec <= BURST_LIFETIME_SEC);
            assert_eq!(b.particles.len(), BURST_PARTICLES);
        }
    }
    assert_eq!(toy.bursts().len(), 2);
    run(&mut toy, 0.5);
    assert!(toy.bursts().is_empty());
}

#[test]
fn hit_test_finds_the_front_card() {
    let mut toy = make_toy(12);
    toy.set_aspect(16.0 / 9.0);
    toy.tick(FRAME);
    let (front, pose) = front_card(&toy);
    assert_eq!(toy.hit_test(ndc_of(&toy, pose.position)), Some(front));
}

#[test]
fn flip_nudges_the_camera() {
    let mut still = make_toy(10);
    let mut nudged = make_toy(10);
    run(&mut still, 0.1);
    run(&mut nudged, 0.1);
    nudged.pick(Some(0));
    run(&mut still, 0.3);
    run(&mut nudged, 0.3);
    let moved = nudged.camera().eye - still.camera().eye;
    assert!(moved.length() > 1e-4);
    assert_eq!(nudged.camera().target, still.camera().target);
}
