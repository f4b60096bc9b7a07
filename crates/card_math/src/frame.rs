use crate::Vec3;

/// Orthonormal basis around a surface normal.
///
/// Built with the branch-on-sign construction, which stays finite for every
/// normal including (0, 0, ±1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

impl Frame {
    /// Build a frame whose third axis is `normal` (expected unit length).
    pub fn from_normal(normal: Vec3) -> Self {
        let g = if normal.z < 0.0 { -1.0 } else { 1.0 };
        let u = -1.0 / (g + normal.z);
        let v = normal.x * normal.y * u;

        let tangent = Vec3::new(v, g + normal.y * normal.y * u, -normal.y);
        let bitangent = Vec3::new(1.0 + g * normal.x * normal.x * u, g * v, -g * normal.x);

        Self {
            tangent,
            bitangent,
            normal,
        }
    }

    /// Transform a local-space vector (x along tangent, z along normal) to world space.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.tangent * local.x + self.bitangent * local.y + self.normal * local.z
    }
}
