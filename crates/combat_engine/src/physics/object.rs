//! The collidable-object contract
//!
//! Every entity that takes part in collision detection implements
//! [`PhysicsObject`]. Reactions are dispatched over a closed set of object
//! kinds rather than by runtime type inspection: each object describes
//! itself as a [`ContactKind`], and the collision manager hands that
//! description to the other side of the pair.

use crate::combat::ShotClass;
use crate::foundation::math::Vec3;
use crate::physics::obb::{BoundingSphere, OrientedBoundingBox};

/// What an object is, from the point of view of whatever it just hit.
///
/// Captured by the collision manager before either reaction runs, so both
/// sides observe the pair as it was at test time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactKind {
    /// A static structure (building, wreck)
    Structure,

    /// A mobile combat vehicle
    Vehicle,

    /// An ammo round in flight
    Projectile {
        /// Shot classification, which fixes the base penetration force
        shot: ShotClass,
        /// The round's world position at impact time
        impact: Vec3,
    },
}

/// Capability set implemented by every collidable entity.
pub trait PhysicsObject {
    /// This object's kind, as observed by the other side of a collision.
    fn contact_kind(&self) -> ContactKind;

    /// The object's oriented bounding box in world space.
    fn transformed_obb(&self) -> OrientedBoundingBox;

    /// A sphere enclosing the object's box, for cheap pair rejection.
    fn transformed_bounding_sphere(&self) -> BoundingSphere;

    /// Static objects never need re-testing against other static objects.
    fn is_static(&self) -> bool;

    /// Called once per step for each confirmed collision partner.
    fn reaction(&mut self, other: &ContactKind);

    /// Advance per-frame state by `dt` simulated time units.
    fn update(&mut self, dt: f32);
}

impl<T: PhysicsObject + ?Sized> PhysicsObject for Box<T> {
    fn contact_kind(&self) -> ContactKind {
        (**self).contact_kind()
    }

    fn transformed_obb(&self) -> OrientedBoundingBox {
        (**self).transformed_obb()
    }

    fn transformed_bounding_sphere(&self) -> BoundingSphere {
        (**self).transformed_bounding_sphere()
    }

    fn is_static(&self) -> bool {
        (**self).is_static()
    }

    fn reaction(&mut self, other: &ContactKind) {
        (**self).reaction(other)
    }

    fn update(&mut self, dt: f32) {
        (**self).update(dt)
    }
}
