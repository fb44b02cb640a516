use super::constants::*;
use super::palette::Rgb;
use super::rng::RandomSource;
use glam::Vec3;
use smallvec::SmallVec;

/// Short-lived particle puff spawned where a card was flipped.
#[derive(Clone, Debug)]
pub struct Burst {
    pub particles: SmallVec<[Vec3; BURST_PARTICLES]>,
    pub age_sec: f32,
    pub opacity: f32,
    pub point_size: f32,
    pub color: Rgb,
}

impl Burst {
    pub fn spawn(origin: Vec3, color: Rgb) -> Self {
        Self {
            particles: SmallVec::from_elem(origin, BURST_PARTICLES),
            age_sec: 0.0,
            opacity: 1.0,
            point_size: BURST_SIZE_START,
            color,
        }
    }

    pub fn update(&mut self, dt_sec: f32, rng: &mut impl RandomSource) {
        self.age_sec += dt_sec;
        let frames = dt_sec * REFERENCE_FPS;
        for p in self.particles.iter_mut() {
            let jitter = Vec3::new(
                rng.signed(BURST_JITTER),
                rng.signed(BURST_JITTER) + BURST_RISE,
                rng.signed(BURST_JITTER),
            );
            *p += jitter * frames;
        }
        let fade = frame_lerp(BURST_FADE, dt_sec);
        self.opacity += (BURST_OPACITY_FLOOR - self.opacity) * fade;
        self.point_size += (BURST_SIZE_FLOOR - self.point_size) * fade;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age_sec > BURST_LIFETIME_SEC
    }
}
