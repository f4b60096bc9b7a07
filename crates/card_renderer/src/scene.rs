//! The scene field: a union of tagged signed distance primitives.

use crate::sdf::{LetterLogo, RoomSdf, Sdf, SkyPlane};
use card_math::Vec3;

/// Which kind of surface is nearest to a queried point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Decorative letters, rendered as a mirror.
    Logo,
    /// Room walls, floor and ceiling planks.
    Wall,
    /// The emissive region above the ceiling.
    Sky,
}

/// Result of evaluating the scene field at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSample {
    pub distance: f32,
    pub kind: SurfaceKind,
}

struct Primitive {
    shape: Box<dyn Sdf>,
    kind: SurfaceKind,
}

/// Ordered union of primitives.
///
/// `query` returns the closest primitive; on an exact tie the one added
/// first wins.
pub struct SceneField {
    primitives: Vec<Primitive>,
}

impl SceneField {
    /// The room lit by the sky, without letters.
    pub fn new() -> Self {
        Self::from_parts(RoomSdf::default(), SkyPlane::default())
    }

    /// Build the room scene from explicit room and sky primitives.
    pub fn from_parts(room: RoomSdf, sky: SkyPlane) -> Self {
        Self {
            primitives: vec![
                Primitive {
                    shape: Box::new(room),
                    kind: SurfaceKind::Wall,
                },
                Primitive {
                    shape: Box::new(sky),
                    kind: SurfaceKind::Sky,
                },
            ],
        }
    }

    /// Add the mirrored letter logo in front of the other primitives.
    pub fn with_logo(self) -> Self {
        self.with_primitive_first(LetterLogo::pixar(), SurfaceKind::Logo)
    }

    /// Insert a primitive ahead of the existing ones, so it wins ties.
    pub fn with_primitive_first(mut self, shape: impl Sdf + 'static, kind: SurfaceKind) -> Self {
        self.primitives.insert(
            0,
            Primitive {
                shape: Box::new(shape),
                kind,
            },
        );
        self
    }

    /// Number of primitives in the union.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Evaluate the field at `position`.
    pub fn query(&self, position: Vec3) -> SceneSample {
        let mut closest = SceneSample {
            distance: f32::MAX,
            kind: SurfaceKind::Wall,
        };
        for primitive in &self.primitives {
            let distance = primitive.shape.distance(position);
            if distance < closest.distance {
                closest = SceneSample {
                    distance,
                    kind: primitive.kind,
                };
            }
        }
        closest
    }

    /// Signed distance only, for gradient estimation.
    #[inline]
    pub fn distance(&self, position: Vec3) -> f32 {
        self.query(position).distance
    }
}

impl Default for SceneField {
    fn default() -> Self {
        Self::new()
    }
}
