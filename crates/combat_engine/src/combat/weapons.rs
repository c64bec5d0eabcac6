//! Weapon classes and firing cooldowns
//!
//! Each shot class carries a base penetration force and a fixed cooldown.
//! Cooldowns are tracked per class in simulation time units, not wall
//! clock; the host supplies the current simulated time with every request.

use log::debug;

/// Shot classification, fixing base force and cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotClass {
    /// Light, fast-cycling shot
    Laser,
    /// Heavy shot with a long cooldown
    Artillery,
}

impl ShotClass {
    /// Base penetration force before the random bonus roll.
    pub fn base_force(self) -> i32 {
        match self {
            ShotClass::Laser => 12,
            ShotClass::Artillery => 20,
        }
    }

    /// Fixed cooldown between successful fires of this class.
    pub fn cooldown(self) -> f32 {
        match self {
            ShotClass::Laser => 10.0,
            ShotClass::Artillery => 25.0,
        }
    }
}

/// Per-class last-fire bookkeeping for one entity.
///
/// A class that has never fired succeeds immediately, so the first request
/// at t = 0 goes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponTimers {
    last_laser: Option<f32>,
    last_artillery: Option<f32>,
}

impl WeaponTimers {
    /// Fresh timers with no recorded fires.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a fire of `shot` at simulated time `now`.
    ///
    /// Succeeds when at least the class cooldown has elapsed since that
    /// class's last successful fire (inclusive). A `true` result records
    /// `now` as the new last-fire time as a side effect: the cooldown slot
    /// is consumed even if the caller never spawns the round.
    pub fn try_fire(&mut self, now: f32, shot: ShotClass) -> bool {
        let slot = match shot {
            ShotClass::Laser => &mut self.last_laser,
            ShotClass::Artillery => &mut self.last_artillery,
        };

        if let Some(last) = *slot {
            if now - last < shot.cooldown() {
                debug!("{shot:?} on cooldown: {:.3} of {:.1}", now - last, shot.cooldown());
                return false;
            }
        }

        *slot = Some(now);
        true
    }

    /// Last successful fire time for `shot`, if any.
    pub fn last_fired(&self, shot: ShotClass) -> Option<f32> {
        match shot {
            ShotClass::Laser => self.last_laser,
            ShotClass::Artillery => self.last_artillery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_at_time_zero_succeeds() {
        let mut timers = WeaponTimers::new();
        assert!(timers.try_fire(0.0, ShotClass::Laser));
        assert_eq!(timers.last_fired(ShotClass::Laser), Some(0.0));
    }

    #[test]
    fn cooldown_boundary_is_inclusive() {
        let mut timers = WeaponTimers::new();
        assert!(timers.try_fire(0.0, ShotClass::Laser));
        assert!(!timers.try_fire(9.999, ShotClass::Laser));
        assert!(timers.try_fire(10.0, ShotClass::Laser));
    }

    #[test]
    fn failed_request_does_not_consume_the_slot() {
        let mut timers = WeaponTimers::new();
        assert!(timers.try_fire(0.0, ShotClass::Laser));
        assert!(!timers.try_fire(5.0, ShotClass::Laser));
        // The rejected request at t=5 must not push the window back.
        assert!(timers.try_fire(10.0, ShotClass::Laser));
    }

    #[test]
    fn classes_cool_down_independently() {
        let mut timers = WeaponTimers::new();
        assert!(timers.try_fire(0.0, ShotClass::Laser));
        assert!(timers.try_fire(0.0, ShotClass::Artillery));

        // Laser cycles at 10; artillery is still cooling at 24.9.
        assert!(timers.try_fire(10.0, ShotClass::Laser));
        assert!(!timers.try_fire(24.9, ShotClass::Artillery));
        assert!(timers.try_fire(25.0, ShotClass::Artillery));
    }

    #[test]
    fn successful_fire_resets_the_window() {
        let mut timers = WeaponTimers::new();
        assert!(timers.try_fire(0.0, ShotClass::Laser));
        assert!(timers.try_fire(12.0, ShotClass::Laser));
        assert!(!timers.try_fire(21.9, ShotClass::Laser));
        assert!(timers.try_fire(22.0, ShotClass::Laser));
    }
}
