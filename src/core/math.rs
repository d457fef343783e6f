// Geometry helpers for facing and gather jitter

use glam::Vec3;
use rand::Rng;

/// Uniformly sample a point inside the unit sphere (rejection sampling)
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}

/// Move `target` onto the same height as `from`, so that looking at it only
/// rotates around the vertical axis
pub fn level_with(target: Vec3, from: Vec3) -> Vec3 {
    Vec3::new(target.x, from.y, target.z)
}
