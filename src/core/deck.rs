use super::constants::*;
use super::palette::{random_palette, Palette, Rgb};
use super::rng::RandomSource;
use super::words::WordPool;
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Produces the images a card is drawn with.
///
/// Handles are owned by the card that requested them and are released by
/// dropping them, which happens when a reset replaces them.
pub trait TextureFactory {
    type Texture;

    fn gradient_texture(&mut self, stops: &[Rgb]) -> Self::Texture;
    fn label_texture(&mut self, word: &str) -> Self::Texture;
}

/// Texture factory for headless use: every handle is `()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTextures;

impl TextureFactory for NullTextures {
    type Texture = ();

    fn gradient_texture(&mut self, _stops: &[Rgb]) -> Self::Texture {}
    fn label_texture(&mut self, _word: &str) -> Self::Texture {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlipState {
    Idle,
    /// `progress` runs 0 -> 1; `revealed` flips on past the halfway mark.
    Flipping { progress: f32, revealed: bool },
}

impl FlipState {
    #[inline]
    pub fn is_flipping(&self) -> bool {
        matches!(self, FlipState::Flipping { .. })
    }
}

/// Anchor of a card on the ring.
#[derive(Clone, Copy, Debug)]
pub struct RingSlot {
    pub position: Vec3,
    /// Yaw that turns the card's +Z face outward from the ring center.
    pub yaw: f32,
}

pub fn ring_slot(index: usize, count: usize, rng: &mut impl RandomSource) -> RingSlot {
    let angle = index as f32 / count.max(1) as f32 * TAU;
    let radius = RING_RADIUS + rng.signed(RING_RADIUS_JITTER);
    let y = rng.signed(RING_HEIGHT_JITTER);
    RingSlot {
        position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
        yaw: FRAC_PI_2 - angle,
    }
}

pub fn random_card_count(rng: &mut impl RandomSource) -> usize {
    CARD_COUNT_MIN + rng.index(CARD_COUNT_MAX - CARD_COUNT_MIN + 1)
}

fn random_axis(rng: &mut impl RandomSource) -> Vec3 {
    Vec3::new(rng.signed(1.0), rng.signed(1.0), rng.signed(1.0))
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

pub struct Card<T> {
    pub position: Vec3,
    pub orientation: Quat,
    pub ring_rotation: f32,
    pub base_position: Vec3,
    pub base_rotation: f32,

    pub front: T,
    pub back: T,
    pub label_texture: T,
    pub palette: Palette,
    pub label: String,

    pub flip: FlipState,
    pub spin: f32,
    pub label_opacity: f32,
    pub hover_lift: f32,

    /// Bumped on every flip start and every reset.
    pub flip_serial: u32,
    /// Bumped whenever the textures are regenerated.
    pub appearance_epoch: u32,

    wobble_axis: Vec3,
    wobble_speed: f32,
    wobble_phase: f32,
    drift_vector: Vec3,
}

impl<T> Card<T> {
    fn generate<F, R>(slot: RingSlot, label: String, rng: &mut R, textures: &mut F) -> Self
    where
        F: TextureFactory<Texture = T>,
        R: RandomSource,
    {
        let palette = random_palette(rng);
        let wobble_axis = random_axis(rng);
        let wobble_speed = rng.range(WOBBLE_SPEED_MIN, WOBBLE_SPEED_MAX);
        let wobble_phase = rng.range(0.0, TAU);
        let drift_vector = random_axis(rng) * DRIFT_MAGNITUDE;
        Self {
            position: slot.position,
            orientation: Quat::IDENTITY,
            ring_rotation: slot.yaw,
            base_position: slot.position,
            base_rotation: slot.yaw,
            front: textures.gradient_texture(&palette.stops),
            back: textures.gradient_texture(&palette.back_stops()),
            label_texture: textures.label_texture(&label),
            palette,
            label,
            flip: FlipState::Idle,
            spin: 0.0,
            label_opacity: 0.0,
            hover_lift: 0.0,
            flip_serial: 0,
            appearance_epoch: 0,
            wobble_axis,
            wobble_speed,
            wobble_phase,
            drift_vector,
        }
    }

    /// Normalized time in the current flip; 0 while idle.
    #[inline]
    pub fn flip_progress(&self) -> f32 {
        match self.flip {
            FlipState::Idle => 0.0,
            FlipState::Flipping { progress, .. } => progress,
        }
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        matches!(self.flip, FlipState::Flipping { revealed: true, .. })
    }

    pub fn wobble_axis(&self) -> Vec3 {
        self.wobble_axis
    }

    pub fn wobble_speed(&self) -> f32 {
        self.wobble_speed
    }

    pub fn wobble_phase(&self) -> f32 {
        self.wobble_phase
    }

    pub fn drift_vector(&self) -> Vec3 {
        self.drift_vector
    }
}

/// All cards plus the per-round bookkeeping.
pub struct Deck<T> {
    pub cards: Vec<Card<T>>,
    pub flips_this_round: u32,
    /// Bumped on every reset.
    pub round: u32,
    pool: WordPool,
}

impl<T> Deck<T> {
    pub fn new<F, R>(count: usize, mut pool: WordPool, rng: &mut R, textures: &mut F) -> Self
    where
        F: TextureFactory<Texture = T>,
        R: RandomSource,
    {
        let mut cards = Vec::with_capacity(count);
        for i in 0..count {
            let slot = ring_slot(i, count, rng);
            let label = pool.draw(rng);
            cards.push(Card::generate(slot, label, rng, textures));
        }
        log::info!("[deck] created {} cards", count);
        Self {
            cards,
            flips_this_round: 0,
            round: 0,
            pool,
        }
    }

    /// Regenerate every card in place: new palette, label, textures and ring
    /// slot. Cards keep their idle-motion parameters.
    pub fn reset<F, R>(&mut self, rng: &mut R, textures: &mut F)
    where
        F: TextureFactory<Texture = T>,
        R: RandomSource,
    {
        self.pool.reshuffle(rng);
        let count = self.cards.len();
        for (i, card) in self.cards.iter_mut().enumerate() {
            let palette = random_palette(rng);
            let label = self.pool.draw(rng);
            // assigning drops the previous handles
            card.front = textures.gradient_texture(&palette.stops);
            card.back = textures.gradient_texture(&palette.back_stops());
            card.label_texture = textures.label_texture(&label);
            card.palette = palette;
            card.label = label;

            let slot = ring_slot(i, count, rng);
            card.base_position = slot.position;
            card.base_rotation = slot.yaw;

            card.flip = FlipState::Idle;
            card.spin = 0.0;
            card.label_opacity = 0.0;
            card.flip_serial = card.flip_serial.wrapping_add(1);
            card.appearance_epoch = card.appearance_epoch.wrapping_add(1);
        }
        self.flips_this_round = 0;
        self.round = self.round.wrapping_add(1);
        log::info!("[deck] reset to round {} ({} cards)", self.round, count);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }
}
