//! Guarded vector helpers on top of glam.

use crate::Vec3;

/// Squared length below which a vector is treated as zero.
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// Normalize `v`, returning the zero vector when `v` is (nearly) zero.
///
/// Never produces NaN or infinity, unlike `Vec3::normalize`.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq < NORMALIZE_EPSILON {
        Vec3::ZERO
    } else {
        v / len_sq.sqrt()
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
