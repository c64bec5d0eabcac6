//! Penetration rolls and damage assessment
//!
//! Force is compared against the struck zone's armor rating: a matching
//! force scores a surface impact, a greater force penetrates for double
//! damage, a lesser force deflects. The random bonus comes from one
//! resolver-owned generator seeded at startup; rolls never reseed, so two
//! rolls in the same instant still differ.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::combat::weapons::ShotClass;

/// Result of assessing a penetration force against an armor rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Force below the rating: no damage
    Deflected,
    /// Force equal to the rating: hull loses the force
    Surface {
        /// Hull points removed
        damage: i32,
    },
    /// Force above the rating: hull loses twice the force
    Penetrating {
        /// Hull points removed
        damage: i32,
    },
}

impl DamageOutcome {
    /// Hull points this outcome removes.
    pub fn damage(self) -> i32 {
        match self {
            DamageOutcome::Deflected => 0,
            DamageOutcome::Surface { damage } | DamageOutcome::Penetrating { damage } => damage,
        }
    }
}

/// Compare a rolled force against a zone rating.
///
/// Pure; the caller rolls the force. Hull values have no floor, so a
/// destroyed hull keeps taking (meaningless) damage.
pub fn assess(force: i32, armor: i32) -> DamageOutcome {
    if force > armor {
        DamageOutcome::Penetrating { damage: force * 2 }
    } else if force == armor {
        DamageOutcome::Surface { damage: force }
    } else {
        DamageOutcome::Deflected
    }
}

/// Owns the random source for penetration bonus rolls.
///
/// Exactly one resolver exists per simulation, seeded once at startup and
/// shared by every vehicle. Injecting a fixed seed makes damage rolls
/// reproducible in tests.
#[derive(Debug)]
pub struct DamageResolver {
    rng: StdRng,
}

impl DamageResolver {
    /// Resolver with a caller-chosen seed (reproducible sessions/tests).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resolver seeded from OS entropy, once, at startup.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Roll the penetration force for a shot: class base plus a uniform
    /// bonus from 1 to 5 inclusive.
    pub fn roll_force(&mut self, shot: ShotClass) -> i32 {
        shot.base_force() + self.rng.gen_range(1..=5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_force_scores_surface_damage() {
        assert_eq!(assess(14, 14), DamageOutcome::Surface { damage: 14 });
    }

    #[test]
    fn greater_force_penetrates_for_double() {
        assert_eq!(assess(15, 14), DamageOutcome::Penetrating { damage: 30 });
    }

    #[test]
    fn lesser_force_deflects() {
        assert_eq!(assess(13, 14), DamageOutcome::Deflected);
        assert_eq!(DamageOutcome::Deflected.damage(), 0);
    }

    #[test]
    fn rolls_stay_inside_the_bonus_band() {
        let mut resolver = DamageResolver::from_seed(7);
        for _ in 0..200 {
            let force = resolver.roll_force(ShotClass::Laser);
            let bonus = force - ShotClass::Laser.base_force();
            assert!((1..=5).contains(&bonus), "bonus {bonus} out of band");
        }
    }

    #[test]
    fn identical_seeds_reproduce_the_roll_sequence() {
        let mut a = DamageResolver::from_seed(99);
        let mut b = DamageResolver::from_seed(99);

        let rolls_a: Vec<i32> = (0..32).map(|_| a.roll_force(ShotClass::Artillery)).collect();
        let rolls_b: Vec<i32> = (0..32).map(|_| b.roll_force(ShotClass::Artillery)).collect();

        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn consecutive_rolls_are_not_all_identical() {
        // The shared-generator requirement exists precisely so same-instant
        // rolls differ; a 40-roll run collapsing to one value would mean
        // the generator is being reseeded per roll.
        let mut resolver = DamageResolver::from_seed(3);
        let rolls: Vec<i32> = (0..40).map(|_| resolver.roll_force(ShotClass::Laser)).collect();
        assert!(rolls.iter().any(|r| *r != rolls[0]));
    }
}
