//! Math utilities and types
//!
//! Provides the fundamental math types used by the physics, combat, and
//! terrain subsystems.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3};

/// 2D vector type (screen-space terrain bounds)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build a yaw rotation (about the local Y axis) from an angle in radians.
///
/// Positive angles turn left when looking down the world up axis.
pub fn yaw_rotation(angle: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), angle)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (scale, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        let rotated = self.rotation * point.coords.component_mul(&self.scale);
        Point3::from(rotated + self.position)
    }

    /// Apply this transform to a direction vector (ignores translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector.component_mul(&self.scale)
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Transform {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation * (-self.position).component_mul(&inv_scale);

        Transform {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transform_point_round_trips_through_inverse() {
        let transform = Transform::from_position_rotation(
            Vec3::new(3.0, -1.0, 7.5),
            yaw_rotation(0.9),
        );
        let point = Point3::new(1.0, 2.0, 3.0);

        let there = transform.transform_point(point);
        let back = transform.inverse().transform_point(there);

        assert_relative_eq!(back.x, point.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, point.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, point.z, epsilon = 1e-5);
    }

    #[test]
    fn yaw_rotation_keeps_up_axis_fixed() {
        let quarter_turn = yaw_rotation(std::f32::consts::FRAC_PI_2);
        let up = quarter_turn * Vec3::y();

        assert_relative_eq!(up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn transform_point_matches_matrix_form() {
        let transform = Transform {
            position: Vec3::new(-2.0, 4.0, 1.0),
            rotation: yaw_rotation(1.3),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };
        let point = Point3::new(0.5, -0.5, 2.0);

        let direct = transform.transform_point(point);
        let via_matrix = transform.to_matrix().transform_point(&point);

        assert_relative_eq!(direct.x, via_matrix.x, epsilon = 1e-5);
        assert_relative_eq!(direct.y, via_matrix.y, epsilon = 1e-5);
        assert_relative_eq!(direct.z, via_matrix.z, epsilon = 1e-5);
    }
}
