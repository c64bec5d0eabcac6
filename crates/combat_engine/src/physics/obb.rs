//! Narrow-phase collision primitives
//!
//! Provides the bounding sphere used for cheap rejection tests and the
//! oriented bounding box with its separating-axis overlap predicate.

use crate::foundation::math::{Quat, Vec3};

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

/// An oriented bounding box: a box with arbitrary rotation, used for
/// narrow-phase overlap tests.
///
/// The axes are derived from the owning body's orientation each time the
/// box is built and are orthonormal by construction; they are never
/// mutated independently of that orientation.
#[derive(Debug, Clone, Copy)]
pub struct OrientedBoundingBox {
    /// Box center in world space
    pub center: Vec3,
    /// Half extents along each local axis (all components >= 0)
    pub half_extents: Vec3,
    /// Local X, Y, Z axes in world space (orthonormal)
    pub axes: [Vec3; 3],
}

impl OrientedBoundingBox {
    /// Build a box from a world-space center, local half extents, and a
    /// unit-quaternion orientation.
    pub fn from_rotation(center: Vec3, half_extents: Vec3, rotation: &Quat) -> Self {
        Self {
            center,
            half_extents,
            axes: [
                rotation * Vec3::x(),
                rotation * Vec3::y(),
                rotation * Vec3::z(),
            ],
        }
    }

    /// The smallest sphere enclosing this box.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center, self.half_extents.magnitude())
    }

    /// Radius of this box's projection onto an axis.
    fn projected_radius(&self, axis: &Vec3) -> f32 {
        self.half_extents.x * self.axes[0].dot(axis).abs()
            + self.half_extents.y * self.axes[1].dot(axis).abs()
            + self.half_extents.z * self.axes[2].dot(axis).abs()
    }

    /// Separating-axis overlap test against another box.
    ///
    /// Tests the 15 candidate axes for two oriented boxes: each box's three
    /// face normals plus the nine pairwise edge cross products. The boxes
    /// overlap iff no candidate axis separates their projected intervals.
    /// Symmetric in its arguments and allocation-free.
    pub fn intersects(&self, other: &OrientedBoundingBox) -> bool {
        const EPSILON: f32 = 1e-6;

        let center_delta = other.center - self.center;

        // A degenerate cross product (near-parallel edges) carries no
        // separation information; skipping it must never report a false
        // separation, so it counts as overlapping on that axis.
        let separated = |axis: Vec3| -> bool {
            if axis.magnitude_squared() < EPSILON {
                return false;
            }
            let distance = center_delta.dot(&axis).abs();
            distance > self.projected_radius(&axis) + other.projected_radius(&axis)
        };

        for axis in &self.axes {
            if separated(*axis) {
                return false;
            }
        }

        for axis in &other.axes {
            if separated(*axis) {
                return false;
            }
        }

        for a in &self.axes {
            for b in &other.axes {
                if separated(a.cross(b)) {
                    return false;
                }
            }
        }

        true
    }
}
