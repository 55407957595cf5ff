//! Collision primitives module
//!
//! This module provides the static collision primitives the player sphere
//! is resolved against, and the closest-point queries used to resolve it.
//!
//! # Closest Point Queries
//!
//! - Triangle: project onto the plane, keep the projection if it lies inside
//!   all three edges, otherwise take the nearest of the three clamped edge
//!   projections.
//! - Box: per-axis clamp of the point into `[min, max]`.
//!
//! # Example
//!
//! ```ignore
//! use rolling_sphere_engine::physics::collision::{StaticTriangle, closest_point_on_triangle};
//! use glam::Vec3;
//!
//! let tri = StaticTriangle::new(
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(2.0, 0.0, 0.0),
//!     Vec3::new(0.0, 0.0, 2.0),
//! )?;
//!
//! // Directly above the interior: perpendicular projection
//! let p = tri.closest_point(Vec3::new(0.3, 1.0, 0.3));
//! assert_eq!(p, Vec3::new(0.3, 0.0, 0.3));
//! ```

use glam::Vec3;

use super::error::PhysicsError;

/// Result of resolving the sphere against one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the primitive surface (after any face fallback)
    pub point: Vec3,
    /// Unit push-out direction, from the surface toward the sphere center
    pub normal: Vec3,
    /// How far the sphere was inside the primitive before push-out
    pub penetration: f32,
    /// Whether the contact lies below the sphere center (ground contact)
    pub grounded: bool,
}

/// An immutable triangle collision primitive.
///
/// Construction rejects collinear or coincident vertices, so every
/// `StaticTriangle` has a well-defined face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticTriangle {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    normal: Vec3,
}

impl StaticTriangle {
    /// Creates a triangle from three vertices.
    ///
    /// The face normal follows the right-hand rule over `a -> b -> c`.
    ///
    /// # Errors
    ///
    /// * `NonFinite` if any vertex contains NaN or infinity
    /// * `DegenerateTriangle` if the vertices are collinear or coincident
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Result<Self, PhysicsError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(PhysicsError::NonFinite("triangle vertex"));
        }

        let ab = b - a;
        let ac = c - a;
        let cross = ab.cross(ac);
        // Relative test so tiny and huge triangles are judged alike
        if cross.length_squared() <= f32::EPSILON * ab.length_squared() * ac.length_squared() {
            return Err(PhysicsError::DegenerateTriangle);
        }
        let normal = cross.try_normalize().ok_or(PhysicsError::DegenerateTriangle)?;

        Ok(Self { a, b, c, normal })
    }

    /// Unit face normal.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Closest point on the triangle to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        closest_point_on_triangle(p, self.a, self.b, self.c)
    }
}

/// An axis-aligned box collision primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    min: Vec3,
    max: Vec3,
}

impl StaticBox {
    /// Creates a box from its minimum and maximum corners.
    ///
    /// # Errors
    ///
    /// * `NonFinite` if either corner contains NaN or infinity
    /// * `InvalidBox` if `min > max` on any axis
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, PhysicsError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(PhysicsError::NonFinite("box bounds"));
        }
        if min.cmpgt(max).any() {
            return Err(PhysicsError::InvalidBox { min, max });
        }
        Ok(Self { min, max })
    }

    /// Closest point on (or in) the box to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        closest_point_on_box(p, self.min, self.max)
    }

    /// Nearest face to a point inside the box.
    ///
    /// Returns the projection of `p` onto that face and the face's outward
    /// normal. Ties prefer the top face, then bottom, then X, then Z faces.
    pub fn exit_face(&self, p: Vec3) -> (Vec3, Vec3) {
        let faces = [
            (self.max.y - p.y, Vec3::Y),
            (p.y - self.min.y, Vec3::NEG_Y),
            (self.max.x - p.x, Vec3::X),
            (p.x - self.min.x, Vec3::NEG_X),
            (self.max.z - p.z, Vec3::Z),
            (p.z - self.min.z, Vec3::NEG_Z),
        ];

        let mut best = faces[0];
        for face in &faces[1..] {
            if face.0 < best.0 {
                best = *face;
            }
        }

        let (depth, normal) = best;
        (p + normal * depth.max(0.0), normal)
    }
}

/// A static collision primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Triangle from a collision mesh
    Triangle(StaticTriangle),
    /// Axis-aligned box
    Box(StaticBox),
}

impl Collider {
    /// Closest point on the primitive to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        match self {
            Collider::Triangle(tri) => tri.closest_point(p),
            Collider::Box(aabb) => aabb.closest_point(p),
        }
    }
}

impl From<StaticTriangle> for Collider {
    fn from(tri: StaticTriangle) -> Self {
        Collider::Triangle(tri)
    }
}

impl From<StaticBox> for Collider {
    fn from(aabb: StaticBox) -> Self {
        Collider::Box(aabb)
    }
}

/// Closest point on segment `a-b` to `p`.
///
/// The projection parameter is clamped to `[0, 1]`. A zero-length
/// segment returns `a`.
pub fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= super::types::DEGENERATE_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest point on triangle `a, b, c` to `p`.
///
/// If the plane projection of `p` is strictly inside all three edges it is
/// returned directly; otherwise the nearest of the three edge points wins.
/// Degenerate triangles have no plane and go straight to the edge search.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    if let Some(normal) = (b - a).cross(c - a).try_normalize() {
        let dist = normal.dot(p - a);
        let projected = p - normal * dist;

        let inside = (b - a).cross(projected - a).dot(normal) > 0.0
            && (c - b).cross(projected - b).dot(normal) > 0.0
            && (a - c).cross(projected - c).dot(normal) > 0.0;
        if inside {
            return projected;
        }
    }

    let closest_ab = closest_point_on_segment(p, a, b);
    let closest_bc = closest_point_on_segment(p, b, c);
    let closest_ca = closest_point_on_segment(p, c, a);

    let d_ab = p.distance_squared(closest_ab);
    let d_bc = p.distance_squared(closest_bc);
    let d_ca = p.distance_squared(closest_ca);

    // AB must be strictly nearest; ties fall through to the later edge
    if d_ab < d_bc && d_ab < d_ca {
        closest_ab
    } else if d_bc < d_ca {
        closest_bc
    } else {
        closest_ca
    }
}

/// Closest point in the box `[min, max]` to `p` (per-axis clamp).
#[inline]
pub fn closest_point_on_box(p: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    p.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_triangle() -> StaticTriangle {
        StaticTriangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        )
        .unwrap()
    }

    #[test]
    fn test_segment_clamps_to_endpoints() {
        let a = Vec3::ZERO;
        let b = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(closest_point_on_segment(Vec3::new(-3.0, 1.0, 0.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec3::new(4.0, 1.0, 0.0), a, b), b);
        assert_eq!(
            closest_point_on_segment(Vec3::new(0.25, 5.0, 0.0), a, b),
            Vec3::new(0.25, 0.0, 0.0)
        );
    }

    #[test]
    fn test_zero_length_segment_returns_start() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(closest_point_on_segment(Vec3::ZERO, a, a), a);
    }

    #[test]
    fn test_triangle_interior_projection() {
        let p = floor_triangle().closest_point(Vec3::new(0.3, 1.0, 0.3));
        assert!((p - Vec3::new(0.3, 0.0, 0.3)).length() < 1e-6);
    }

    #[test]
    fn test_triangle_beyond_hypotenuse_hits_edge() {
        let p = floor_triangle().closest_point(Vec3::new(5.0, 1.0, 5.0));
        // Hypotenuse runs from (2,0,0) to (0,0,2); its midpoint is nearest
        assert!((p - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_triangle_beyond_vertex_hits_vertex() {
        let p = floor_triangle().closest_point(Vec3::new(-1.0, 0.5, -1.0));
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn test_corner_ties_return_shared_vertex() {
        let tri = floor_triangle();
        // Beyond each corner the two adjacent edges clamp to the same vertex
        let corners = [
            (Vec3::new(-1.0, 0.5, -1.0), Vec3::ZERO),
            (Vec3::new(3.0, -0.5, -1.0), Vec3::new(2.0, 0.0, 0.0)),
            (Vec3::new(-1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 2.0)),
        ];
        for (p, vertex) in corners {
            assert!((tri.closest_point(p) - vertex).length() < 1e-6, "{p}");
        }
    }

    #[test]
    fn test_winding_does_not_change_closest_point() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 2.0);
        let p = Vec3::new(0.5, -2.0, 0.7);
        let ccw = closest_point_on_triangle(p, a, b, c);
        let cw = closest_point_on_triangle(p, a, c, b);
        assert!((ccw - cw).length() < 1e-6);
    }

    #[test]
    fn test_collinear_triangle_rejected() {
        let result = StaticTriangle::new(
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(result, Err(PhysicsError::DegenerateTriangle));
    }

    #[test]
    fn test_coincident_triangle_rejected() {
        let p = Vec3::new(4.0, 0.0, 4.0);
        assert_eq!(StaticTriangle::new(p, p, p), Err(PhysicsError::DegenerateTriangle));
    }

    #[test]
    fn test_nan_triangle_rejected() {
        let result = StaticTriangle::new(Vec3::ZERO, Vec3::X, Vec3::new(f32::NAN, 0.0, 1.0));
        assert!(matches!(result, Err(PhysicsError::NonFinite(_))));
    }

    #[test]
    fn test_degenerate_free_function_uses_edges() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 0.0, 0.0);
        let p = closest_point_on_triangle(Vec3::new(1.0, 3.0, 0.0), a, b, b);
        assert!((p - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_triangle_normal_right_handed() {
        // (2,0,0) x (0,0,2) points down
        assert!((floor_triangle().normal() - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_box_rejects_inverted_bounds() {
        let result = StaticBox::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert!(matches!(result, Err(PhysicsError::InvalidBox { .. })));
    }

    #[test]
    fn test_box_accepts_flat_bounds() {
        assert!(StaticBox::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)).is_ok());
    }

    #[test]
    fn test_box_closest_point_clamps() {
        let aabb = StaticBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        assert_eq!(aabb.closest_point(Vec3::new(0.5, 3.0, -4.0)), Vec3::new(0.5, 1.0, -1.0));
        assert_eq!(aabb.closest_point(Vec3::new(0.2, 0.3, 0.4)), Vec3::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_box_exit_face_picks_nearest() {
        let aabb = StaticBox::new(Vec3::new(-1.0, -100.0, -10.0), Vec3::new(1.0, 10.0, 1.0)).unwrap();
        let (point, normal) = aabb.exit_face(Vec3::new(0.0, 9.5, -5.0));
        assert_eq!(normal, Vec3::Y);
        assert!((point - Vec3::new(0.0, 10.0, -5.0)).length() < 1e-6);

        let (point, normal) = aabb.exit_face(Vec3::new(0.9, 0.0, -5.0));
        assert_eq!(normal, Vec3::X);
        assert!((point.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_box_exit_face_tie_prefers_top() {
        let aabb = StaticBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        let (_, normal) = aabb.exit_face(Vec3::ZERO);
        assert_eq!(normal, Vec3::Y);
    }

    #[test]
    fn test_collider_dispatch() {
        let aabb: Collider = StaticBox::new(Vec3::ZERO, Vec3::ONE).unwrap().into();
        let tri: Collider = floor_triangle().into();
        let p = Vec3::new(0.5, 2.0, 0.5);
        assert_eq!(aabb.closest_point(p), Vec3::new(0.5, 1.0, 0.5));
        assert!((tri.closest_point(p) - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-6);
    }
}
