//! Random streams and hemisphere sampling.

use card_math::{Frame, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f32::consts::TAU;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Cosine-weighted direction in the hemisphere around `normal`.
///
/// `u1` picks the azimuth and `u2` the squared cosine to the normal.
pub fn cosine_hemisphere(normal: Vec3, u1: f32, u2: f32) -> Vec3 {
    let phi = TAU * u1;
    let sin_theta = (1.0 - u2).sqrt();
    let local = Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, u2.sqrt());
    Frame::from_normal(normal).to_world(local)
}

/// Independent random stream for one pixel.
///
/// Streams depend only on `(seed, x, y)`, so any pixel renders the same no
/// matter which thread or in which order it is computed. The seed is mixed
/// on its own first, so each seed gives a separate set of streams.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let key = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(splitmix64(splitmix64(seed) ^ key))
}

/// SplitMix64 finalizer, used to decorrelate neighbouring pixel keys.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
