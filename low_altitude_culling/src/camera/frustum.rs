/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a DVec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Planes are kept in f64: globe positions are Earth-centered coordinates
/// in meters, far beyond what f32 resolves at model scale.

use glam::{DMat4, DVec3, DVec4};

/// Result of a 3-way frustum classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Volume is entirely outside the frustum
    Outside,
    /// Volume is entirely inside the frustum
    Inside,
    /// Volume straddles at least one plane
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Sphere approximating an entity's spatial extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// World-space center
    pub center: DVec3,
    /// Radius in meters
    pub radius: f64,
}

impl BoundingSphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [DVec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method for glam's zero-to-one depth range:
    /// the near plane is row 2 alone, the far plane row 3 minus row 2.
    /// Works for both perspective and orthographic projections.
    pub fn from_view_projection(vp: &DMat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            DVec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            DVec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            DVec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            DVec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row2
            DVec4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
            // Far:    row3 - row2
            DVec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from a point to a plane (positive = inside).
    fn signed_distance(plane: &DVec4, point: DVec3) -> f64 {
        plane.truncate().dot(point) + plane.w
    }

    /// Test if a point lies inside all six planes.
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.planes
            .iter()
            .all(|plane| Self::signed_distance(plane, point) >= 0.0)
    }

    /// Classify a bounding sphere against the frustum (3-way test).
    ///
    /// - Center further than `radius` behind any plane → `Outside` (early out)
    /// - Center closer than `radius` to some plane → `Partial`
    /// - Otherwise → `Inside`
    pub fn classify_sphere(&self, sphere: &BoundingSphere) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let distance = Self::signed_distance(plane, sphere.center);

            if distance < -sphere.radius {
                return FrustumTest::Outside;
            }

            if distance < sphere.radius {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// Test if a bounding sphere is (potentially) visible.
    ///
    /// Partial intersection counts as visible.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.classify_sphere(sphere) != FrustumTest::Outside
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
