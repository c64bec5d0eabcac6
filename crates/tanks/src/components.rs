//! Game entities
//!
//! Tanks, buildings, and ammo rounds, each implementing the engine's
//! `PhysicsObject` contract. Reactions dispatch over the closed
//! `ContactKind` set; the tank's projectile reaction runs the full combat
//! pipeline (zone classification, force roll, armor assessment).

use std::cell::RefCell;
use std::rc::Rc;

use combat_engine::combat::{
    assess, classify_impact, ArmorProfile, ArmorZone, DamageOutcome, DamageResolver, ShotClass,
    WeaponTimers,
};
use combat_engine::foundation::math::Vec3;
use combat_engine::physics::{
    BoundingSphere, ContactKind, OrientedBoundingBox, PhysicsObject, RigidBody,
};
use log::{debug, info};

/// Hull integrity every tank spawns with.
pub const FULL_HULL: i32 = 100;

/// The one damage-roll generator of the simulation, shared by all tanks.
///
/// The world is single-threaded and frame-stepped, so a plain `Rc<RefCell>`
/// carries the resolver without locks.
pub type SharedResolver = Rc<RefCell<DamageResolver>>;

/// The most recent hit a tank absorbed, for hosts to poll.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Armor zone that was struck
    pub zone: ArmorZone,
    /// What the strike did
    pub outcome: DamageOutcome,
}

/// A mobile combat vehicle.
#[derive(Debug)]
pub struct Tank {
    body: RigidBody,
    armor: ArmorProfile,
    hull: i32,
    timers: WeaponTimers,
    resolver: SharedResolver,
    last_hit: Option<HitRecord>,
    round_speed: f32,
    round_lifetime: f32,
}

impl Tank {
    /// Tank half extents: 2 wide, 1 tall, 4 long.
    pub fn hull_half_extents() -> Vec3 {
        Vec3::new(1.0, 0.5, 2.0)
    }

    /// Spawn a tank at `position` with full hull and no cooldown history.
    pub fn new(
        position: Vec3,
        armor: ArmorProfile,
        resolver: SharedResolver,
        round_speed: f32,
        round_lifetime: f32,
    ) -> Self {
        Self {
            body: RigidBody::new(position, Self::hull_half_extents(), 32_000.0),
            armor,
            hull: FULL_HULL,
            timers: WeaponTimers::new(),
            resolver,
            last_hit: None,
            round_speed,
            round_lifetime,
        }
    }

    /// The tank's rigid body.
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Mutable access to the rigid body (placement, respawn).
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    /// Remaining hull integrity. No floor; destroyed tanks go negative.
    pub fn hull(&self) -> i32 {
        self.hull
    }

    /// A tank at or below zero hull is destroyed: inert but still
    /// collidable, and never removed by the physics core.
    pub fn is_destroyed(&self) -> bool {
        self.hull <= 0
    }

    /// The last hit absorbed, if any.
    pub fn last_hit(&self) -> Option<HitRecord> {
        self.last_hit
    }

    /// Whether the tank may drive or turn: it must be upright and alive.
    pub fn can_move(&self) -> bool {
        self.hull > 0 && self.body.is_upright()
    }

    /// Drive forward. Wakes the body; destroyed tanks stay put.
    pub fn drive_forward(&mut self, speed: f32) {
        self.body.wake();
        if self.hull <= 0 {
            return;
        }
        self.body.go_forward(speed);
    }

    /// Drive backward. Same gating as `drive_forward`.
    pub fn drive_backward(&mut self, speed: f32) {
        self.body.wake();
        if self.hull <= 0 {
            return;
        }
        self.body.go_backward(speed);
    }

    /// Turn left by `angle` radians.
    pub fn turn_left(&mut self, angle: f32) {
        self.body.wake();
        if self.hull <= 0 {
            return;
        }
        self.body.turn_left(angle);
    }

    /// Turn right by `angle` radians.
    pub fn turn_right(&mut self, angle: f32) {
        self.body.wake();
        if self.hull <= 0 {
            return;
        }
        self.body.turn_right(angle);
    }

    /// Whether a fire request of `shot` at time `now` would be granted.
    ///
    /// A `true` result has already consumed the cooldown slot; callers must
    /// treat it as a commitment to fire.
    pub fn can_fire(&mut self, now: f32, shot: ShotClass) -> bool {
        if self.hull <= 0 {
            return false;
        }
        self.timers.try_fire(now, shot)
    }

    /// Fire `shot` at time `now`, spawning a round just beyond the muzzle.
    pub fn fire(&mut self, now: f32, shot: ShotClass) -> Option<AmmoRound> {
        if !self.can_fire(now, shot) {
            return None;
        }

        let forward = self.body.forward();
        let muzzle = self.body.position()
            + forward * (Self::hull_half_extents().z + AmmoRound::half_extents().z + 0.5);
        debug!("fired {shot:?} from {muzzle:?}");

        Some(AmmoRound::new(
            muzzle,
            forward * self.round_speed,
            shot,
            self.round_lifetime,
        ))
    }

    fn apply_projectile_hit(&mut self, shot: ShotClass, impact: Vec3) {
        let zone = classify_impact(impact, &self.body.transform(), self.body.half_extents());
        let force = self.resolver.borrow_mut().roll_force(shot);
        let outcome = assess(force, self.armor.rating(zone));

        let was_alive = self.hull > 0;
        self.hull -= outcome.damage();
        self.last_hit = Some(HitRecord { zone, outcome });
        info!(
            "{shot:?} hit {zone:?} armor with force {force}: {outcome:?}, hull now {}",
            self.hull
        );

        if was_alive && self.hull <= 0 {
            // Dead hulls stop where they are and stay collidable.
            self.body.set_velocity(Vec3::zeros());
            info!("tank destroyed");
        }
    }
}

impl PhysicsObject for Tank {
    fn contact_kind(&self) -> ContactKind {
        ContactKind::Vehicle
    }

    fn transformed_obb(&self) -> OrientedBoundingBox {
        self.body.obb()
    }

    fn transformed_bounding_sphere(&self) -> BoundingSphere {
        self.body.bounding_sphere()
    }

    fn is_static(&self) -> bool {
        false
    }

    fn reaction(&mut self, other: &ContactKind) {
        match *other {
            ContactKind::Projectile { shot, impact } => self.apply_projectile_hit(shot, impact),
            // Running into a wall or another hull halts the drive.
            ContactKind::Structure | ContactKind::Vehicle => {
                self.body.set_velocity(Vec3::zeros());
            }
        }
    }

    fn update(&mut self, dt: f32) {
        if self.body.is_awake() {
            self.body.integrate(dt);
        }
    }
}

/// A static structure. Collidable, immovable, indifferent.
#[derive(Debug)]
pub struct Building {
    body: RigidBody,
}

impl Building {
    /// Place a building at `position` with the given half extents.
    pub fn new(position: Vec3, half_extents: Vec3) -> Self {
        let mut body = RigidBody::new(position, half_extents, 1.0e6);
        body.sleep();
        Self { body }
    }

    /// The building's rigid body.
    pub fn body(&self) -> &RigidBody {
        &self.body
    }
}

impl PhysicsObject for Building {
    fn contact_kind(&self) -> ContactKind {
        ContactKind::Structure
    }

    fn transformed_obb(&self) -> OrientedBoundingBox {
        self.body.obb()
    }

    fn transformed_bounding_sphere(&self) -> BoundingSphere {
        self.body.bounding_sphere()
    }

    fn is_static(&self) -> bool {
        true
    }

    fn reaction(&mut self, _other: &ContactKind) {}

    fn update(&mut self, _dt: f32) {}
}

/// A projectile in flight.
#[derive(Debug)]
pub struct AmmoRound {
    body: RigidBody,
    shot: ShotClass,
    spent: bool,
    lifetime: f32,
}

impl AmmoRound {
    /// Round half extents.
    pub fn half_extents() -> Vec3 {
        Vec3::new(0.1, 0.1, 0.3)
    }

    /// Launch a round from `position` with the given velocity.
    pub fn new(position: Vec3, velocity: Vec3, shot: ShotClass, lifetime: f32) -> Self {
        let mut body = RigidBody::new(position, Self::half_extents(), 5.0);
        body.set_velocity(velocity);
        Self {
            body,
            shot,
            spent: false,
            lifetime,
        }
    }

    /// The round's shot classification.
    pub fn shot(&self) -> ShotClass {
        self.shot
    }

    /// The round's rigid body.
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    /// A round is done once it has hit anything or flown past its
    /// lifetime; the registry prunes it at the end of the step.
    pub fn is_spent(&self) -> bool {
        self.spent || self.lifetime <= 0.0
    }
}

impl PhysicsObject for AmmoRound {
    fn contact_kind(&self) -> ContactKind {
        ContactKind::Projectile {
            shot: self.shot,
            impact: self.body.position(),
        }
    }

    fn transformed_obb(&self) -> OrientedBoundingBox {
        self.body.obb()
    }

    fn transformed_bounding_sphere(&self) -> BoundingSphere {
        self.body.bounding_sphere()
    }

    fn is_static(&self) -> bool {
        false
    }

    fn reaction(&mut self, _other: &ContactKind) {
        // One resolved collision, against anything, ends the flight.
        self.spent = true;
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.lifetime -= dt;
    }
}

/// Closed set of game entities the registry can own.
#[derive(Debug)]
pub enum GameEntity {
    /// A mobile combat vehicle
    Tank(Tank),
    /// A static structure
    Building(Building),
    /// A projectile in flight
    Round(AmmoRound),
}

impl GameEntity {
    /// This entity as a tank, if it is one.
    pub fn as_tank(&self) -> Option<&Tank> {
        match self {
            GameEntity::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    /// Mutable tank view, if this entity is one.
    pub fn as_tank_mut(&mut self) -> Option<&mut Tank> {
        match self {
            GameEntity::Tank(tank) => Some(tank),
            _ => None,
        }
    }
}

impl PhysicsObject for GameEntity {
    fn contact_kind(&self) -> ContactKind {
        match self {
            GameEntity::Tank(tank) => tank.contact_kind(),
            GameEntity::Building(building) => building.contact_kind(),
            GameEntity::Round(round) => round.contact_kind(),
        }
    }

    fn transformed_obb(&self) -> OrientedBoundingBox {
        match self {
            GameEntity::Tank(tank) => tank.transformed_obb(),
            GameEntity::Building(building) => building.transformed_obb(),
            GameEntity::Round(round) => round.transformed_obb(),
        }
    }

    fn transformed_bounding_sphere(&self) -> BoundingSphere {
        match self {
            GameEntity::Tank(tank) => tank.transformed_bounding_sphere(),
            GameEntity::Building(building) => building.transformed_bounding_sphere(),
            GameEntity::Round(round) => round.transformed_bounding_sphere(),
        }
    }

    fn is_static(&self) -> bool {
        match self {
            GameEntity::Tank(tank) => tank.is_static(),
            GameEntity::Building(building) => building.is_static(),
            GameEntity::Round(round) => round.is_static(),
        }
    }

    fn reaction(&mut self, other: &ContactKind) {
        match self {
            GameEntity::Tank(tank) => tank.reaction(other),
            GameEntity::Building(building) => building.reaction(other),
            GameEntity::Round(round) => round.reaction(other),
        }
    }

    fn update(&mut self, dt: f32) {
        match self {
            GameEntity::Tank(tank) => tank.update(dt),
            GameEntity::Building(building) => building.update(dt),
            GameEntity::Round(round) => round.update(dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SharedResolver {
        Rc::new(RefCell::new(DamageResolver::from_seed(11)))
    }

    fn test_tank(position: Vec3) -> Tank {
        Tank::new(position, ArmorProfile::default(), resolver(), 40.0, 8.0)
    }

    fn pummel(tank: &mut Tank) {
        // Artillery against default front armor always penetrates; a few
        // hits drive the hull below zero.
        while tank.hull() > 0 {
            tank.reaction(&ContactKind::Projectile {
                shot: ShotClass::Artillery,
                impact: tank.body().position() + Vec3::new(0.0, 0.0, -2.0),
            });
        }
    }

    #[test]
    fn projectile_hit_reduces_hull_and_records_zone() {
        let mut tank = test_tank(Vec3::zeros());
        tank.reaction(&ContactKind::Projectile {
            shot: ShotClass::Artillery,
            impact: Vec3::new(0.0, 0.0, -2.0),
        });

        let hit = tank.last_hit().expect("hit must be recorded");
        assert_eq!(hit.zone, ArmorZone::Front);
        assert!(tank.hull() < FULL_HULL);
    }

    #[test]
    fn deflected_hit_leaves_hull_untouched() {
        // Laser base 12 + bonus at most 5 stays below an 18-point plate.
        let mut tank = test_tank(Vec3::zeros());
        tank.reaction(&ContactKind::Projectile {
            shot: ShotClass::Laser,
            impact: Vec3::new(0.0, 0.0, -2.0),
        });

        assert_eq!(tank.hull(), FULL_HULL);
        let hit = tank.last_hit().expect("hit must be recorded");
        assert_eq!(hit.outcome, DamageOutcome::Deflected);
    }

    #[test]
    fn destroyed_tank_cannot_move_or_fire() {
        let mut tank = test_tank(Vec3::zeros());
        pummel(&mut tank);
        assert!(tank.hull() <= 0);

        assert!(!tank.can_move());
        tank.drive_forward(5.0);
        assert_eq!(tank.body().velocity(), Vec3::zeros());

        // Upright, and any cooldown long since elapsed: still no.
        assert!(tank.body().is_upright());
        assert!(!tank.can_fire(1.0e6, ShotClass::Laser));
        assert!(!tank.can_fire(1.0e6, ShotClass::Artillery));
    }

    #[test]
    fn destroyed_tank_remains_collidable() {
        let mut tank = test_tank(Vec3::zeros());
        pummel(&mut tank);

        assert!(!tank.is_static());
        assert!(tank.transformed_bounding_sphere().radius > 0.0);
    }

    #[test]
    fn fire_spawns_round_beyond_the_hull_box() {
        let mut tank = test_tank(Vec3::zeros());
        let round = tank.fire(0.0, ShotClass::Laser).expect("gate is open at t=0");

        assert!(!round.transformed_obb().intersects(&tank.transformed_obb()));
        assert_eq!(round.shot(), ShotClass::Laser);
    }

    #[test]
    fn fire_respects_the_cooldown_gate() {
        let mut tank = test_tank(Vec3::zeros());
        assert!(tank.fire(0.0, ShotClass::Laser).is_some());
        assert!(tank.fire(5.0, ShotClass::Laser).is_none());
        assert!(tank.fire(10.0, ShotClass::Laser).is_some());
    }

    #[test]
    fn round_is_spent_after_any_reaction() {
        let mut round = AmmoRound::new(Vec3::zeros(), Vec3::zeros(), ShotClass::Laser, 8.0);
        assert!(!round.is_spent());

        round.reaction(&ContactKind::Structure);
        assert!(round.is_spent());
    }

    #[test]
    fn round_expires_after_its_lifetime() {
        let mut round = AmmoRound::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), ShotClass::Laser, 1.0);
        round.update(0.6);
        assert!(!round.is_spent());
        round.update(0.6);
        assert!(round.is_spent());
    }

    #[test]
    fn vehicle_contact_halts_the_drive() {
        let mut tank = test_tank(Vec3::zeros());
        tank.drive_forward(6.0);
        assert!(tank.body().velocity().magnitude() > 0.0);

        tank.reaction(&ContactKind::Vehicle);
        assert_eq!(tank.body().velocity(), Vec3::zeros());
    }
}
