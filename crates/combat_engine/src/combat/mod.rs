//! Combat resolution
//!
//! Armor-zone classification, penetration rolls against zone ratings, and
//! per-weapon-class cooldown gating. Damage application is the subsystem's
//! only externally observable output; hosts poll hull values and hit
//! records to drive effects.

pub mod armor;
pub mod damage;
pub mod weapons;

pub use armor::{classify_impact, ArmorProfile, ArmorZone};
pub use damage::{assess, DamageOutcome, DamageResolver};
pub use weapons::{ShotClass, WeaponTimers};
