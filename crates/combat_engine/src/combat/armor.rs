//! Armor zones and impact classification
//!
//! A hull has four directional armor zones. An impact is classified by
//! transforming the world-space hit point into the hull's local frame and
//! comparing its coordinates against fixed fractions of the hull's size.

use crate::foundation::math::{Point3, Transform, Vec3};

/// One of the four directional regions of a vehicle hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorZone {
    /// Frontal plate, usually the thickest
    Front,
    /// Rear plate, usually the weakest
    Rear,
    /// Left/right side plates
    Lateral,
    /// Top deck
    Upper,
}

/// Per-zone armor ratings (positive; rear typically lowest).
#[derive(Debug, Clone, Copy)]
pub struct ArmorProfile {
    /// Frontal armor rating
    pub front: i32,
    /// Top-deck armor rating
    pub upper: i32,
    /// Side armor rating
    pub lateral: i32,
    /// Rear armor rating
    pub rear: i32,
}

impl ArmorProfile {
    /// Rating of the given zone.
    pub fn rating(&self, zone: ArmorZone) -> i32 {
        match zone {
            ArmorZone::Front => self.front,
            ArmorZone::Rear => self.rear,
            ArmorZone::Lateral => self.lateral,
            ArmorZone::Upper => self.upper,
        }
    }
}

impl Default for ArmorProfile {
    fn default() -> Self {
        Self {
            front: 18,
            upper: 16,
            lateral: 14,
            rear: 8,
        }
    }
}

/// Classify a world-space impact point against a hull.
///
/// The point is carried into the hull's local frame with the inverse of its
/// world transform, then shifted by the half extents on X and Z so the box
/// spans `[0, width] x [0, height] x [0, length]`.
///
/// The branch order is load-bearing: Upper is tested first, then Front,
/// then Rear. Front's length band overlaps Rear's, so an impact in the
/// 30-70% mid band always resolves to Front.
pub fn classify_impact(
    impact: Vec3,
    hull_transform: &Transform,
    half_extents: Vec3,
) -> ArmorZone {
    let local = hull_transform.inverse().transform_point(Point3::from(impact));

    // Re-centered length coordinate: 0 at the nose plane, `length` at the
    // tail plane. The matching X shift plays no part in zone selection.
    let shifted_z = local.z + half_extents.z;

    let height = half_extents.y * 2.0;
    let length = half_extents.z * 2.0;

    if local.y.abs() >= height * 0.9 {
        ArmorZone::Upper
    } else if shifted_z.abs() <= length * 0.7 {
        ArmorZone::Front
    } else if shifted_z.abs() >= length * 0.3 {
        ArmorZone::Rear
    } else {
        ArmorZone::Lateral
    }
}
