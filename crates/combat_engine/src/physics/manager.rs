//! Broad-phase collision manager
//!
//! Each simulation step the manager scans every unordered pair of live
//! objects, skips static-static pairs, confirms candidates with the OBB
//! separating-axis test, and invokes both reaction callbacks. The scan is
//! O(n²) in the live object count: the pruning rule set is exactly
//! "static-static never collides", with no spatial acceleration structure,
//! so the confirmed pair set is the full all-pairs result.

use log::debug;

use crate::physics::object::PhysicsObject;

/// Pairwise collision driver for the current set of live physics objects.
///
/// The manager retains nothing between steps; the host's entity registry
/// owns the object list and passes it in fresh on every update.
#[derive(Debug, Default)]
pub struct CollisionManager {
    contacts_last_step: usize,
}

impl CollisionManager {
    /// Create a new collision manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of confirmed contacts in the most recent step.
    pub fn contacts_last_step(&self) -> usize {
        self.contacts_last_step
    }

    /// Run one collision step over `objects` (in registration order).
    ///
    /// For each colliding pair the reactions fire in a fixed order: the
    /// earlier-registered object first, then the later one, exactly once
    /// per pair. Pairs that remain overlapping fire again on every
    /// subsequent step; there is no edge triggering.
    pub fn update<O: PhysicsObject>(&mut self, objects: &mut [O]) {
        self.contacts_last_step = 0;

        for i in 0..objects.len() {
            for j in (i + 1)..objects.len() {
                if objects[i].is_static() && objects[j].is_static() {
                    continue;
                }

                // Sphere rejection is conservative: the sphere encloses the
                // box, so this never drops a pair the OBB test would accept.
                let sphere_i = objects[i].transformed_bounding_sphere();
                let sphere_j = objects[j].transformed_bounding_sphere();
                if !sphere_i.intersects(&sphere_j) {
                    continue;
                }

                if !objects[i].transformed_obb().intersects(&objects[j].transformed_obb()) {
                    continue;
                }

                // Both sides react to the pair as it stood at test time.
                let kind_i = objects[i].contact_kind();
                let kind_j = objects[j].contact_kind();
                debug!("contact: #{i} {kind_i:?} <-> #{j} {kind_j:?}");

                objects[i].reaction(&kind_j);
                objects[j].reaction(&kind_i);
                self.contacts_last_step += 1;
            }
        }
    }
}
