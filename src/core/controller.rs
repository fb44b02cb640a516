use super::burst::Burst;
use super::camera::{Camera, CameraRig};
use super::config::ToyConfig;
use super::constants::*;
use super::deck::{random_card_count, Deck, FlipState, TextureFactory};
use super::dust::DustField;
use super::pick::pick_card;
use super::rng::RandomSource;
use super::schedule::{Deferred, Scheduler};
use super::words::WordPool;
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::PI;

/// What the frontend needs to react to a successful flip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipEvent {
    pub card: usize,
    /// Index into `TONE_BASE_FREQUENCIES`.
    pub tone_index: usize,
    /// Pitch factor applied to the base tone.
    pub playback_rate: f32,
    pub frequency_hz: f32,
}

/// Final transform and overlay state of one card for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub label_opacity: f32,
    pub hovered: bool,
}

/// Owns the deck and drives everything that moves.
///
/// Input handlers call `set_pointer`, `pick` and `request_reset`; the frame loop
/// calls `tick` once per frame and reads `card_poses`, `bursts`, `dust` and
/// `camera`.
pub struct Controller<F: TextureFactory, R: RandomSource> {
    config: ToyConfig,
    deck: Deck<F::Texture>,
    bursts: Vec<Burst>,
    dust: DustField,
    camera: Camera,
    rig: CameraRig,
    scheduler: Scheduler,
    pointer: Option<Vec2>,
    hover: Option<usize>,
    elapsed_sec: f32,
    reset_pending: bool,
    rng: R,
    textures: F,
    due: Vec<Deferred>,
}

impl<F: TextureFactory, R: RandomSource> Controller<F, R> {
    pub fn new(config: ToyConfig, pool: WordPool, mut rng: R, mut textures: F) -> Self {
        let config = config.sanitized();
        let count = config
            .card_count
            .unwrap_or_else(|| random_card_count(&mut rng));
        let deck = Deck::new(count, pool, &mut rng, &mut textures);
        let dust = DustField::new(config.dust_count, &mut rng);
        Self {
            config,
            deck,
            bursts: Vec::new(),
            dust,
            camera: Camera::default(),
            rig: CameraRig::default(),
            scheduler: Scheduler::new(),
            pointer: None,
            hover: None,
            elapsed_sec: 0.0,
            reset_pending: false,
            rng,
            textures,
            due: Vec::new(),
        }
    }

    /// Latest pointer position in NDC, `None` once it leaves the canvas.
    ///
    /// Hover is re-picked from this position on every tick, so it follows
    /// cards and camera moving under a still pointer.
    pub fn set_pointer(&mut self, ndc: Option<Vec2>) {
        self.pointer = ndc.filter(|p| p.is_finite());
        self.hover = self.pointer.and_then(|p| self.hit_test(p));
    }

    /// Pointer-down on `hit`. Returns the flip that started, if any.
    ///
    /// Missing the deck, picking a card that is already flipping and picking
    /// while the end-of-round reset is pending are all no-ops.
    pub fn pick(&mut self, hit: Option<usize>) -> Option<FlipEvent> {
        let index = hit?;
        if self.reset_pending {
            log::debug!("[pick] card {} ignored: round reset pending", index);
            return None;
        }
        let card = self.deck.cards.get_mut(index)?;
        if card.flip.is_flipping() {
            return None;
        }
        card.flip = FlipState::Flipping {
            progress: 0.0,
            revealed: false,
        };
        card.flip_serial = card.flip_serial.wrapping_add(1);
        let position = card.position;
        let accent = card.palette.accent;

        self.deck.flips_this_round += 1;
        let tone_index = self.rng.index(TONE_BASE_FREQUENCIES.len());
        let playback_rate = self.rng.range(TONE_PITCH_MIN, TONE_PITCH_MAX);
        self.bursts.push(Burst::spawn(position, accent));
        self.rig.nudge_toward(self.camera.eye, position);

        if self.deck.flips_this_round >= self.config.flips_before_reset {
            self.scheduler.schedule(
                self.config.reset_delay_sec,
                Deferred::ResetDeck {
                    round: self.deck.round,
                },
            );
            self.reset_pending = true;
            log::debug!("[round] reset scheduled for round {}", self.deck.round);
        }
        log::debug!(
            "[pick] flip card {} ({}/{})",
            index,
            self.deck.flips_this_round,
            self.config.flips_before_reset
        );

        Some(FlipEvent {
            card: index,
            tone_index,
            playback_rate,
            frequency_hz: TONE_BASE_FREQUENCIES[tone_index] * playback_rate,
        })
    }

    /// Regenerate the deck now, regardless of the flip counter.
    pub fn request_reset(&mut self) {
        log::info!("[round] manual reset");
        self.reset_deck();
    }

    fn reset_deck(&mut self) {
        self.deck.reset(&mut self.rng, &mut self.textures);
        // everything queued before this point refers to the old deck
        self.scheduler.cancel_where(|_| true);
        self.reset_pending = false;
    }

    fn run_deferred(&mut self, action: Deferred) {
        match action {
            Deferred::HideLabel { card, serial } => {
                if let Some(c) = self.deck.cards.get_mut(card) {
                    if c.flip_serial == serial && !c.flip.is_flipping() {
                        c.spin = 0.0;
                        c.label_opacity = 0.0;
                    }
                }
            }
            Deferred::ResetDeck { round } => {
                if round == self.deck.round {
                    self.reset_deck();
                }
            }
        }
    }

    /// Advance all animation by `dt_sec`.
    pub fn tick(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, MAX_TICK_SEC)
        } else {
            0.0
        };
        self.elapsed_sec += dt;
        let t = self.elapsed_sec;

        let mut due = std::mem::take(&mut self.due);
        self.scheduler.advance(dt, &mut due);
        for action in due.drain(..) {
            self.run_deferred(action);
        }
        self.due = due;

        self.hover = self.pointer.and_then(|p| self.hit_test(p));

        let rate = self.config.flip_rate_per_sec;
        let linger = self.config.label_linger_sec;
        let spin_f = frame_lerp(IDLE_SPIN_DECAY, dt);
        let label_f = frame_lerp(IDLE_LABEL_DECAY, dt);
        let wobble_f = frame_lerp(WOBBLE_SLERP, dt);
        let ring_f = frame_lerp(RING_EASE, dt);
        let hover_f = frame_lerp(HOVER_EASE, dt);

        for (i, card) in self.deck.cards.iter_mut().enumerate() {
            match card.flip {
                FlipState::Flipping { progress, .. } => {
                    let progress = (progress + dt * rate).min(1.0);
                    card.spin = smoothstep(0.0, 1.0, progress) * PI;
                    card.label_opacity = smoothstep(REVEAL_PROGRESS, 1.0, progress);
                    if progress >= 1.0 {
                        card.flip = FlipState::Idle;
                        self.scheduler.schedule(
                            linger,
                            Deferred::HideLabel {
                                card: i,
                                serial: card.flip_serial,
                            },
                        );
                    } else {
                        card.flip = FlipState::Flipping {
                            progress,
                            revealed: progress >= REVEAL_PROGRESS,
                        };
                    }
                }
                FlipState::Idle => {
                    card.spin -= card.spin * spin_f;
                    card.label_opacity -= card.label_opacity * label_f;
                }
            }

            let phase = card.wobble_phase();
            let angle = (t * card.wobble_speed() + phase).sin() * WOBBLE_ANGLE;
            let wobble = Quat::from_axis_angle(card.wobble_axis(), angle);
            card.orientation = card.orientation.slerp(wobble, wobble_f).normalize();

            let ring_target =
                card.base_rotation + (t * RING_DRIFT_FREQUENCY + phase).sin() * RING_DRIFT_AMPLITUDE;
            card.ring_rotation += (ring_target - card.ring_rotation) * ring_f;

            let lift_target = if self.hover == Some(i) && !card.flip.is_flipping() {
                HOVER_LIFT
            } else {
                0.0
            };
            card.hover_lift += (lift_target - card.hover_lift) * hover_f;

            let drift = card.drift_vector() * (t * DRIFT_FREQUENCY + phase).sin();
            let bob = (t * BOB_FREQUENCY + phase * 1.7).sin() * BOB_AMPLITUDE;
            card.position = card.base_position + drift + Vec3::Y * (bob + card.hover_lift);
        }

        for burst in self.bursts.iter_mut() {
            burst.update(dt, &mut self.rng);
        }
        self.bursts.retain(|b| !b.is_expired());

        self.dust.update(dt, t);
        self.rig.update(&mut self.camera, dt, t);
    }

    pub fn card_poses(&self) -> impl Iterator<Item = CardPose> + '_ {
        self.deck.cards.iter().enumerate().map(move |(i, c)| CardPose {
            position: c.position,
            rotation: Quat::from_rotation_y(c.ring_rotation)
                * c.orientation
                * Quat::from_rotation_y(c.spin),
            label_opacity: c.label_opacity,
            hovered: self.hover == Some(i) && !c.flip.is_flipping(),
        })
    }

    /// Card under a pointer at `ndc`, using the current camera.
    pub fn hit_test(&self, ndc: Vec2) -> Option<usize> {
        let ray = self.camera.ray_from_ndc(ndc);
        pick_card(ray, self.card_poses().map(|p| (p.position, p.rotation)))
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn deck(&self) -> &Deck<F::Texture> {
        &self.deck
    }

    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    pub fn dust(&self) -> &DustField {
        &self.dust
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &ToyConfig {
        &self.config
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }
}
