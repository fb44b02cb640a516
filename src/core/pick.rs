use super::camera::Ray;
use super::constants::{CARD_HEIGHT, CARD_WIDTH};
use glam::{Quat, Vec3};

/// Ray/rectangle intersection for a card centered at `center` and rotated by
/// `rotation` (local +Z is the face normal). Returns the ray parameter.
#[inline]
pub fn ray_card(ray: Ray, center: Vec3, rotation: Quat, half_w: f32, half_h: f32) -> Option<f32> {
    let normal = rotation * Vec3::Z;
    let denom = ray.dir.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let local = ray.origin + ray.dir * t - center;
    let u = local.dot(rotation * Vec3::X);
    let v = local.dot(rotation * Vec3::Y);
    (u.abs() <= half_w && v.abs() <= half_h).then_some(t)
}

/// Nearest card hit by `ray`, if any. `cards` yields `(center, rotation)`.
pub fn pick_card<I>(ray: Ray, cards: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec3, Quat)>,
{
    let mut best = None::<(usize, f32)>;
    for (i, (center, rotation)) in cards.into_iter().enumerate() {
        if let Some(t) = ray_card(ray, center, rotation, CARD_WIDTH * 0.5, CARD_HEIGHT * 0.5) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
