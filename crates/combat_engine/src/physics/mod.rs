//! Physics module for collision detection and response
//!
//! Provides rigid-body kinematic state, the oriented-bounding-box
//! narrow-phase predicate, and the all-pairs broad-phase collision manager
//! that drives object reactions once per confirmed pair per step.

pub mod manager;
pub mod obb;
pub mod object;
pub mod rigid_body;

pub use manager::CollisionManager;
pub use obb::{BoundingSphere, OrientedBoundingBox};
pub use object::{ContactKind, PhysicsObject};
pub use rigid_body::{upright_gate, RigidBody, UPRIGHT_MIN_COSINE};
