//! # Combat Engine
//!
//! A frame-stepped simulation engine for vehicle combat games.
//!
//! ## Features
//!
//! - **Rigid-body kinematics**: positional state with upright-gated movement
//! - **Collision detection**: all-pairs broad phase with oriented-bounding-box
//!   narrow-phase testing
//! - **Combat resolution**: directional armor zones, penetration rolls, and
//!   weapon cooldown gating
//! - **Terrain partitioning**: bottom-up quadtree over static terrain tiles
//!   for level-of-detail selection
//!
//! The engine is single-threaded and synchronous: a host loop advances every
//! body once per frame, then runs the collision manager, which drives each
//! object's reaction. There is no rendering, input, or asset I/O here; hosts
//! supply world transforms and elapsed time, and poll combat state for
//! effects.
//!
//! ## Quick Start
//!
//! ```rust
//! use combat_engine::physics::{CollisionManager, PhysicsObject};
//!
//! let mut manager = CollisionManager::new();
//! let mut objects: Vec<Box<dyn PhysicsObject>> = Vec::new();
//! // ... register objects via the host's entity registry ...
//! manager.update(&mut objects);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod combat;
pub mod foundation;
pub mod physics;
pub mod terrain;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        combat::{
            ArmorProfile, ArmorZone, DamageOutcome, DamageResolver, ShotClass, WeaponTimers,
        },
        foundation::math::{Quat, Transform, Vec3},
        physics::{
            BoundingSphere, CollisionManager, ContactKind, OrientedBoundingBox, PhysicsObject,
            RigidBody,
        },
        terrain::{TerrainLeaf, TerrainQuadtree},
    };
}
