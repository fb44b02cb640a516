use super::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::from(CAMERA_BASE_EYE),
            target: Vec3::from(CAMERA_LOOK_AT),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        let dir = (far - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        Ray {
            origin: self.eye,
            dir,
        }
    }
}

/// Convert pixel coordinates in a `width x height` viewport to NDC.
#[inline]
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new(2.0 * x / w - 1.0, 1.0 - 2.0 * y / h)
}

/// Slow lateral orbit plus a decaying nudge toward flipped cards.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub base_eye: Vec3,
    pub look_at: Vec3,
    /// Accumulated nudge; decays geometrically every frame.
    pub drift: Vec3,
    /// Displacement integrated from `drift`, relaxing back to zero.
    pub offset: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            base_eye: Vec3::from(CAMERA_BASE_EYE),
            look_at: Vec3::from(CAMERA_LOOK_AT),
            drift: Vec3::ZERO,
            offset: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    pub fn nudge_toward(&mut self, eye: Vec3, point: Vec3) {
        if let Some(dir) = (point - eye).try_normalize() {
            self.drift += dir * CAMERA_NUDGE;
        }
    }

    /// Advance drift and orbit; writes the new eye/target into `camera`.
    pub fn update(&mut self, camera: &mut Camera, dt_sec: f32, elapsed_sec: f32) {
        self.offset += self.drift * frame_lerp(CAMERA_DRIFT_FOLLOW, dt_sec);
        self.drift *= frame_decay(CAMERA_DRIFT_DECAY, dt_sec);
        self.offset *= 1.0 - frame_lerp(CAMERA_OFFSET_RELAX, dt_sec);

        let orbit = (elapsed_sec * CAMERA_ORBIT_FREQUENCY).sin() * CAMERA_ORBIT_AMPLITUDE;
        camera.eye = self.base_eye + Vec3::new(orbit, 0.0, 0.0) + self.offset;
        camera.target = self.look_at;
    }
}
