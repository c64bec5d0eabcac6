//! Entity registry
//!
//! Owns the live entity list in registration order and drives one
//! simulation step per frame: advance every entity's kinematics, run the
//! collision manager over the full list, then prune spent rounds. Removal
//! semantics live here, outside the physics core.

use combat_engine::physics::{CollisionManager, PhysicsObject};
use log::debug;

use crate::components::{GameEntity, Tank};

/// Handle to a registered entity.
///
/// Handles index the registration order and stay valid as long as every
/// earlier registration is still alive; pruning only ever removes rounds,
/// which are registered after the long-lived entities.
pub type EntityHandle = usize;

/// Registration-ordered entity store plus the collision manager.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<GameEntity>,
    manager: CollisionManager,
    clock: f32,
}

impl EntityRegistry {
    /// Empty registry at simulated time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the broad-phase candidate set.
    pub fn register(&mut self, entity: GameEntity) -> EntityHandle {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Current simulated time in elapsed-dt units.
    pub fn time(&self) -> f32 {
        self.clock
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Confirmed contacts in the most recent step.
    pub fn contacts_last_step(&self) -> usize {
        self.manager.contacts_last_step()
    }

    /// Entity behind a handle.
    pub fn entity(&self, handle: EntityHandle) -> &GameEntity {
        &self.entities[handle]
    }

    /// Mutable entity behind a handle.
    pub fn entity_mut(&mut self, handle: EntityHandle) -> &mut GameEntity {
        &mut self.entities[handle]
    }

    /// The tank behind a handle, if that entity is a tank.
    pub fn tank(&self, handle: EntityHandle) -> Option<&Tank> {
        self.entities[handle].as_tank()
    }

    /// Mutable tank view behind a handle.
    pub fn tank_mut(&mut self, handle: EntityHandle) -> Option<&mut Tank> {
        self.entities[handle].as_tank_mut()
    }

    /// Advance the world by `dt` simulated time units.
    pub fn step(&mut self, dt: f32) {
        self.clock += dt;

        for entity in &mut self.entities {
            entity.update(dt);
        }

        self.manager.update(&mut self.entities);

        let before = self.entities.len();
        self.entities
            .retain(|entity| !matches!(entity, GameEntity::Round(round) if round.is_spent()));
        let pruned = before - self.entities.len();
        if pruned > 0 {
            debug!("pruned {pruned} spent round(s)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AmmoRound, Building, SharedResolver, Tank, FULL_HULL};
    use combat_engine::combat::{ArmorProfile, DamageResolver, ShotClass};
    use combat_engine::foundation::math::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn resolver() -> SharedResolver {
        Rc::new(RefCell::new(DamageResolver::from_seed(5)))
    }

    fn tank_at(position: Vec3, resolver: &SharedResolver) -> Tank {
        Tank::new(position, ArmorProfile::default(), Rc::clone(resolver), 40.0, 8.0)
    }

    #[test]
    fn round_flies_into_a_tank_and_is_pruned() {
        let resolver = resolver();
        let mut registry = EntityRegistry::new();
        let target = registry.register(GameEntity::Tank(tank_at(Vec3::zeros(), &resolver)));

        // A heavy round closing from 10 units down +Z at 40 units/time.
        let round = AmmoRound::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, -40.0),
            ShotClass::Artillery,
            8.0,
        );
        registry.register(GameEntity::Round(round));
        assert_eq!(registry.len(), 2);

        for _ in 0..10 {
            registry.step(0.1);
        }

        // The round hit, damaged the hull, and was pruned.
        assert_eq!(registry.len(), 1);
        let tank = registry.tank(target).expect("tank stays registered");
        assert!(tank.hull() < FULL_HULL);
        assert!(tank.last_hit().is_some());
    }

    #[test]
    fn expired_round_is_pruned_without_a_hit() {
        let mut registry = EntityRegistry::new();
        registry.register(GameEntity::Round(AmmoRound::new(
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, -40.0),
            ShotClass::Laser,
            0.5,
        )));

        for _ in 0..6 {
            registry.step(0.1);
        }

        assert!(registry.is_empty());
    }

    #[test]
    fn overlapping_tanks_react_every_step() {
        let resolver = resolver();
        let mut registry = EntityRegistry::new();
        let a = registry.register(GameEntity::Tank(tank_at(Vec3::zeros(), &resolver)));
        registry.register(GameEntity::Tank(tank_at(Vec3::new(1.0, 0.0, 0.0), &resolver)));

        for _ in 0..3 {
            // Vehicle-vehicle contact keeps halting the drive, so the pair
            // stays overlapping and fires again on every step.
            registry.tank_mut(a).expect("tank").drive_forward(6.0);
            registry.step(0.1);
            assert_eq!(registry.contacts_last_step(), 1);
            assert_eq!(
                registry.tank(a).expect("tank").body().velocity(),
                Vec3::zeros()
            );
        }
    }

    #[test]
    fn buildings_never_pair_with_each_other() {
        let mut registry = EntityRegistry::new();
        registry.register(GameEntity::Building(Building::new(
            Vec3::zeros(),
            Vec3::new(4.0, 4.0, 4.0),
        )));
        registry.register(GameEntity::Building(Building::new(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(4.0, 4.0, 4.0),
        )));

        registry.step(0.1);

        assert_eq!(registry.contacts_last_step(), 0);
    }

    #[test]
    fn clock_accumulates_dt() {
        let mut registry = EntityRegistry::new();
        for _ in 0..5 {
            registry.step(0.25);
        }
        assert!((registry.time() - 1.25).abs() < 1e-6);
    }
}
