// Host-side tests for deck generation and reset.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod deck {
        include!("../src/core/deck.rs");
    }
    pub mod palette {
        include!("../src/core/palette.rs");
    }
    pub mod rng {
        include!("../src/core/rng.rs");
    }
    pub mod words {
        include!("../src/core/words.rs");
    }
}

use crate::core::constants::*;
use crate::core::deck::*;
use crate::core::palette::{Rgb, PALETTES};
use crate::core::rng::{SeededRandom, SequenceRandom};
use crate::core::words::WordPool;
use glam::{Quat, Vec3};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

struct Tracked(Rc<Cell<usize>>);

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Default)]
struct CountingTextures {
    made: usize,
    dropped: Rc<Cell<usize>>,
    last_label: Option<String>,
}

impl TextureFactory for CountingTextures {
    type Texture = Tracked;

    fn gradient_texture(&mut self, stops: &[Rgb]) -> Tracked {
        assert_eq!(stops.len(), 3);
        self.made += 1;
        Tracked(self.dropped.clone())
    }

    fn label_texture(&mut self, word: &str) -> Tracked {
        self.made += 1;
        self.last_label = Some(word.to_string());
        Tracked(self.dropped.clone())
    }
}

fn unique_labels<T>(deck: &Deck<T>) -> usize {
    deck.cards.iter().map(|c| c.label.as_str()).collect::<HashSet<_>>().len()
}

#[test]
fn card_count_is_always_in_range() {
    for seed in 0..200 {
        let mut rng = SeededRandom::new(seed);
        let n = random_card_count(&mut rng);
        assert!((CARD_COUNT_MIN..=CARD_COUNT_MAX).contains(&n), "seed {seed} gave {n}");
    }
    // extremes of the unit interval map to the ends of the range
    assert_eq!(random_card_count(&mut SequenceRandom::new(vec![0.0])), CARD_COUNT_MIN);
    assert_eq!(random_card_count(&mut SequenceRandom::new(vec![1.0])), CARD_COUNT_MAX);
}

#[test]
fn new_deck_has_unique_labels() {
    for count in CARD_COUNT_MIN..=CARD_COUNT_MAX {
        let mut rng = SeededRandom::new(count as u64);
        let deck = Deck::new(count, WordPool::with_defaults(), &mut rng, &mut NullTextures);
        assert_eq!(deck.len(), count);
        assert_eq!(unique_labels(&deck), count);
        assert_eq!(deck.flips_this_round, 0);
        assert_eq!(deck.round, 0);
        assert!(deck.cards.iter().all(|c| c.flip == FlipState::Idle));
    }
}

#[test]
fn cards_sit_on_the_ring_facing_outward() {
    let mut rng = SeededRandom::new(3);
    let deck = Deck::new(12, WordPool::with_defaults(), &mut rng, &mut NullTextures);
    for card in &deck.cards {
        let flat = Vec3::new(card.base_position.x, 0.0, card.base_position.z);
        let r = flat.length();
        assert!((r - RING_RADIUS).abs() <= RING_RADIUS_JITTER + 1e-4);
        assert!(card.base_position.y.abs() <= RING_HEIGHT_JITTER + 1e-4);

        let facing = Quat::from_rotation_y(card.base_rotation) * Vec3::Z;
        assert!(facing.dot(flat / r) > 0.999);
    }
}

#[test]
fn palettes_come_from_the_table() {
    let mut rng = SeededRandom::new(11);
    let deck = Deck::new(15, WordPool::with_defaults(), &mut rng, &mut NullTextures);
    for card in &deck.cards {
        assert!(PALETTES.contains(&card.palette));
    }
}

#[test]
fn reset_regenerates_every_card() {
    let mut rng = SeededRandom::new(5);
    let mut deck = Deck::new(12, WordPool::with_defaults(), &mut rng, &mut NullTextures);
    deck.flips_this_round = 5;
    deck.cards[0].flip = FlipState::Flipping {
        progress: 0.7,
        revealed: true,
    };
    deck.cards[0].spin = 2.0;
    deck.cards[0].label_opacity = 0.8;
    let serials: Vec<u32> = deck.cards.iter().map(|c| c.flip_serial).collect();

    deck.reset(&mut rng, &mut NullTextures);

    assert_eq!(deck.len(), 12);
    assert_eq!(deck.round, 1);
    assert_eq!(deck.flips_this_round, 0);
    assert_eq!(unique_labels(&deck), 12);
    for (card, old) in deck.cards.iter().zip(serials) {
        assert_eq!(card.flip, FlipState::Idle);
        assert_eq!(card.spin, 0.0);
        assert_eq!(card.label_opacity, 0.0);
        assert_ne!(card.flip_serial, old);
        assert_eq!(card.appearance_epoch, 1);
    }
    // fresh shuffle, then one draw per card
    assert_eq!(deck.pool().remaining(), deck.pool().len() - 12);
}

#[test]
fn reset_drops_each_replaced_texture_once() {
    let mut rng = SeededRandom::new(9);
    let mut textures = CountingTextures::default();
    let dropped = textures.dropped.clone();
    let mut deck = Deck::new(10, WordPool::with_defaults(), &mut rng, &mut textures);
    assert_eq!(textures.made, 30);
    assert_eq!(dropped.get(), 0);

    deck.reset(&mut rng, &mut textures);
    assert_eq!(textures.made, 60);
    assert_eq!(dropped.get(), 30);

    let last = deck.cards.last().map(|c| c.label.clone());
    assert_eq!(textures.last_label, last);

    drop(deck);
    assert_eq!(dropped.get(), 60);
}

#[test]
fn flip_progress_reads_the_state() {
    let mut rng = SeededRandom::new(1);
    let mut deck = Deck::new(10, WordPool::with_defaults(), &mut rng, &mut NullTextures);
    let card = &mut deck.cards[0];
    assert_eq!(card.flip_progress(), 0.0);
    assert!(!card.is_revealed());
    card.flip = FlipState::Flipping {
        progress: 0.6,
        revealed: true,
    };
    assert!((card.flip_progress() - 0.6).abs() < 1e-6);
    assert!(card.is_revealed());
}
