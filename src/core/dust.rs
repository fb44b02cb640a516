use super::constants::*;
use super::rng::RandomSource;
use glam::Vec3;

/// Ambient motes drifting through the scene, wrapped inside a box.
#[derive(Clone, Debug, Default)]
pub struct DustField {
    pub positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    phases: Vec<f32>,
}

impl DustField {
    pub fn new(count: usize, rng: &mut impl RandomSource) -> Self {
        let ext = Vec3::from(DUST_EXTENT);
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        let mut phases = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(Vec3::new(
                rng.signed(ext.x),
                rng.signed(ext.y),
                rng.signed(ext.z),
            ));
            velocities.push(Vec3::new(
                rng.signed(DUST_SPEED),
                rng.signed(DUST_SPEED * 0.5),
                rng.signed(DUST_SPEED),
            ));
            phases.push(rng.range(0.0, std::f32::consts::TAU));
        }
        Self {
            positions,
            velocities,
            phases,
        }
    }

    pub fn update(&mut self, dt_sec: f32, elapsed_sec: f32) {
        let ext = Vec3::from(DUST_EXTENT);
        for ((p, v), phase) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter())
            .zip(self.phases.iter())
        {
            let sway = (elapsed_sec * 0.5 + phase).sin() * 0.02;
            *p += (*v + Vec3::new(sway, 0.0, -sway)) * dt_sec;
            p.x = wrap(p.x, ext.x);
            p.y = wrap(p.y, ext.y);
            p.z = wrap(p.z, ext.z);
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

#[inline]
fn wrap(v: f32, half: f32) -> f32 {
    if v > half {
        v - 2.0 * half
    } else if v < -half {
        v + 2.0 * half
    } else {
        v
    }
}
