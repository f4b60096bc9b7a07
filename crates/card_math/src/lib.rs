// Re-export glam for convenience
pub use glam::*;

// Card math types
mod aabb;
mod frame;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use frame::Frame;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, safe_normalize, NORMALIZE_EPSILON};
