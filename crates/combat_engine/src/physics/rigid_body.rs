//! Rigid-body kinematic state
//!
//! A body owns position, orientation, velocity, mass, and an awake flag for
//! one physical entity, and derives its world transform and oriented
//! bounding box from that state. Movement commands are gated on the body
//! being upright; a tipped-over vehicle cannot drive.

use crate::foundation::math::{yaw_rotation, Quat, Transform, Vec3};
use crate::physics::obb::{BoundingSphere, OrientedBoundingBox};

/// Lower bound (inclusive) of the upright gate: the cosine between world up
/// and the body's local up axis must lie in `[UPRIGHT_MIN_COSINE, 1.0]` for
/// movement commands to take effect.
pub const UPRIGHT_MIN_COSINE: f32 = 0.7;

/// Whether an up-axis alignment cosine passes the movement gate.
///
/// Inclusive at both ends: exactly 0.7 and exactly 1.0 both pass.
pub fn upright_gate(cosine: f32) -> bool {
    (UPRIGHT_MIN_COSINE..=1.0).contains(&cosine)
}

/// Kinematic state for one physical entity.
///
/// Mass is fixed at construction. The orientation is renormalized after
/// every composition so it stays a unit quaternion.
#[derive(Debug, Clone)]
pub struct RigidBody {
    position: Vec3,
    orientation: Quat,
    velocity: Vec3,
    mass: f32,
    awake: bool,
    half_extents: Vec3,
}

impl RigidBody {
    /// Create a body at rest.
    pub fn new(position: Vec3, half_extents: Vec3, mass: f32) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
            velocity: Vec3::zeros(),
            mass,
            awake: true,
            half_extents,
        }
    }

    /// Replace position and orientation outright (respawn/placement).
    /// Velocity is cleared.
    pub fn set_state(&mut self, position: Vec3, orientation: Quat) {
        self.position = position;
        self.orientation = orientation;
        self.orientation.renormalize();
        self.velocity = Vec3::zeros();
    }

    /// Current world position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current orientation.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Directly set the orientation (movement commands use the gated
    /// `turn_*` methods instead).
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
        self.orientation.renormalize();
    }

    /// Current linear velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Directly set the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Mass in simulation units; immutable once set at spawn.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Local half extents of the body's collision box.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Whether the owning manager should integrate this body. Sleeping
    /// bodies still participate in collision queries.
    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Mark the body awake.
    pub fn wake(&mut self) {
        self.awake = true;
    }

    /// Mark the body asleep; integration may be skipped until it wakes.
    pub fn sleep(&mut self) {
        self.awake = false;
    }

    /// Advance position by the current velocity over `dt` time units.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Local forward direction (-Z) in world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation * -Vec3::z()
    }

    /// Cosine of the angle between world up and the body's local up axis.
    pub fn upright_alignment(&self) -> f32 {
        (self.orientation * Vec3::y()).dot(&Vec3::y())
    }

    /// Whether the body is upright enough to accept movement commands.
    pub fn is_upright(&self) -> bool {
        upright_gate(self.upright_alignment())
    }

    /// Drive forward at `speed`. Wakes the body unconditionally; a tipped
    /// body rejects the command and keeps its velocity.
    pub fn go_forward(&mut self, speed: f32) {
        self.awake = true;
        if !self.is_upright() {
            return;
        }
        self.velocity = self.forward() * speed;
    }

    /// Drive backward at `speed`. Same gating as `go_forward`.
    pub fn go_backward(&mut self, speed: f32) {
        self.awake = true;
        if !self.is_upright() {
            return;
        }
        self.velocity = self.forward() * -speed;
    }

    /// Turn left by `angle` radians about the local up axis.
    pub fn turn_left(&mut self, angle: f32) {
        self.awake = true;
        if !self.is_upright() {
            return;
        }
        self.orientation = self.orientation * yaw_rotation(angle);
        self.orientation.renormalize();
    }

    /// Turn right by `angle` radians about the local up axis.
    pub fn turn_right(&mut self, angle: f32) {
        self.awake = true;
        if !self.is_upright() {
            return;
        }
        self.orientation = self.orientation * yaw_rotation(-angle);
        self.orientation.renormalize();
    }

    /// World transform of this body (unit scale).
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.orientation)
    }

    /// Oriented bounding box derived from the current state.
    pub fn obb(&self) -> OrientedBoundingBox {
        OrientedBoundingBox::from_rotation(self.position, self.half_extents, &self.orientation)
    }

    /// Bounding sphere enclosing the body's box.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.half_extents.magnitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_body() -> RigidBody {
        RigidBody::new(Vec3::zeros(), Vec3::new(1.0, 0.5, 2.0), 30.0)
    }

    #[test]
    fn upright_gate_is_inclusive_at_both_ends() {
        assert!(!upright_gate(0.69));
        assert!(upright_gate(0.70));
        assert!(upright_gate(1.0));
        assert!(!upright_gate(1.01));
        assert!(!upright_gate(-1.0));
    }

    #[test]
    fn tipped_body_rejects_movement_but_wakes() {
        let mut body = test_body();
        // Roll 90 degrees about Z: local up ends up on world X.
        body.set_state(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_2),
        );
        body.sleep();

        body.go_forward(5.0);

        assert!(body.is_awake());
        assert_eq!(body.velocity(), Vec3::zeros());
    }

    #[test]
    fn upright_body_drives_along_its_forward_axis() {
        let mut body = test_body();
        body.turn_left(std::f32::consts::FRAC_PI_2);
        body.go_forward(4.0);
        body.integrate(1.0);

        // Forward starts at -Z; a quarter turn left points it down -X.
        assert_relative_eq!(body.position().x, -4.0, epsilon = 1e-4);
        assert_relative_eq!(body.position().z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn go_backward_reverses_forward() {
        let mut body = test_body();
        body.go_backward(2.0);
        body.integrate(0.5);

        assert_relative_eq!(body.position().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn set_state_clears_velocity_and_replaces_pose() {
        let mut body = test_body();
        body.go_forward(10.0);
        body.set_state(Vec3::new(7.0, 0.0, 7.0), Quat::identity());

        assert_eq!(body.velocity(), Vec3::zeros());
        assert_eq!(body.position(), Vec3::new(7.0, 0.0, 7.0));
    }

    #[test]
    fn turning_keeps_orientation_normalized() {
        let mut body = test_body();
        for _ in 0..1000 {
            body.turn_left(0.013);
        }

        assert_relative_eq!(body.orientation().norm(), 1.0, epsilon = 1e-5);
        assert!(body.is_upright());
    }

    #[test]
    fn sleeping_body_still_exposes_collision_shapes() {
        let mut body = test_body();
        body.sleep();

        let obb = body.obb();
        assert_eq!(obb.half_extents, Vec3::new(1.0, 0.5, 2.0));
        assert!(body.bounding_sphere().radius > 0.0);
    }
}
