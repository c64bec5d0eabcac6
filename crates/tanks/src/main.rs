//! Headless tank duel
//!
//! Drives the full simulation core without a renderer: builds the terrain
//! quadtree, spawns two tanks and a building, then runs a fixed-dt loop of
//! scripted movement and firing until one hull gives out. Rendering,
//! input, and audio hosts would sit where the log statements are.

mod components;
mod config;
mod registry;

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use combat_engine::combat::{ArmorProfile, DamageResolver, ShotClass};
use combat_engine::foundation::math::Vec3;
use combat_engine::terrain::{
    LodRange, ScreenRect, TerrainLeaf, TerrainQuadtree, TerrainTriangle, LOD_TIERS,
};
use log::info;
use nalgebra::Vector2;

use components::{Building, GameEntity, SharedResolver, Tank};
use config::{GameConfig, TerrainConfig};
use registry::EntityRegistry;

/// Fixed simulation step, in simulated time units.
const STEP_DT: f32 = 0.1;

/// Steps to run before giving up on a decision.
const MAX_STEPS: u32 = 4000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    combat_engine::foundation::logging::init();

    let config = match GameConfig::load("tanks.toml") {
        Ok(config) => config,
        Err(err) => {
            info!("no usable tanks.toml ({err}); running with defaults");
            GameConfig::default()
        }
    };

    let terrain = build_terrain(&config.terrain)?;
    info!(
        "terrain quadtree: {} leaves, {} nodes, depth {}",
        terrain.leaf_count(),
        terrain.node_count(),
        terrain.depth()
    );

    let resolver: SharedResolver = Rc::new(RefCell::new(match config.rng_seed {
        Some(seed) => DamageResolver::from_seed(seed),
        None => DamageResolver::from_entropy(),
    }));

    let mut registry = EntityRegistry::new();
    let gameplay = &config.gameplay;
    let armor = ArmorProfile::from(&gameplay.armor);

    // Alpha faces -Z toward bravo; bravo turns around to face it.
    let alpha = registry.register(GameEntity::Tank(Tank::new(
        Vec3::new(0.0, 0.0, 40.0),
        armor,
        Rc::clone(&resolver),
        gameplay.round_speed,
        gameplay.round_lifetime,
    )));
    let bravo = registry.register(GameEntity::Tank(Tank::new(
        Vec3::new(0.0, 0.0, -40.0),
        armor,
        Rc::clone(&resolver),
        gameplay.round_speed,
        gameplay.round_lifetime,
    )));
    if let Some(tank) = registry.tank_mut(bravo) {
        tank.turn_left(PI);
    }
    registry.register(GameEntity::Building(Building::new(
        Vec3::new(20.0, 0.0, 0.0),
        Vec3::new(4.0, 6.0, 4.0),
    )));

    info!("duel begins");
    let mut steps = 0;
    while steps < MAX_STEPS {
        steps += 1;
        let now = registry.time();

        for handle in [alpha, bravo] {
            let other = if handle == alpha { bravo } else { alpha };
            let Some(gap) = tank_gap(&registry, handle, other) else {
                continue;
            };

            let round = registry.tank_mut(handle).and_then(|tank| {
                // Close to mid range, then trade fire: lasers on every
                // cycle, artillery whenever its slot is free.
                if gap > 30.0 {
                    tank.drive_forward(gameplay.tank_speed);
                } else {
                    tank.drive_forward(0.0);
                }
                tank.fire(now, ShotClass::Artillery)
                    .or_else(|| tank.fire(now, ShotClass::Laser))
            });
            if let Some(round) = round {
                registry.register(GameEntity::Round(round));
            }
        }

        registry.step(STEP_DT);

        if let Some(loser) = [alpha, bravo]
            .into_iter()
            .find(|handle| registry.tank(*handle).is_some_and(Tank::is_destroyed))
        {
            let name = if loser == alpha { "alpha" } else { "bravo" };
            info!("{name} is destroyed after {steps} steps");
            break;
        }
    }

    for (name, handle) in [("alpha", alpha), ("bravo", bravo)] {
        if let Some(tank) = registry.tank(handle) {
            info!(
                "{name}: hull {}, last hit {:?}",
                tank.hull(),
                tank.last_hit()
            );
        }
    }

    Ok(())
}

/// Distance between two tanks' hull centers, if both are still registered.
fn tank_gap(registry: &EntityRegistry, a: usize, b: usize) -> Option<f32> {
    let pa = registry.tank(a)?.body().position();
    let pb = registry.tank(b)?.body().position();
    Some((pa - pb).magnitude())
}

/// Synthesize the flat leaf grid an asset pipeline would deserialize.
///
/// Each tile carries a two-triangle ground quad and per-tier windows into
/// the shared terrain index buffer, coarser tiers drawing fewer primitives.
fn build_terrain(config: &TerrainConfig) -> Result<TerrainQuadtree, Box<dyn std::error::Error>> {
    let side = config.grid_side;
    let tile = config.tile_size;
    let origin = -(side as f32) * tile * 0.5;

    let mut leaves = Vec::with_capacity(side * side);
    for row in 0..side {
        for col in 0..side {
            let x = origin + col as f32 * tile;
            let z = origin + row as f32 * tile;

            let mut lod_ranges = [LodRange::default(); LOD_TIERS];
            let tile_index = (row * side + col) as u32;
            for (tier, range) in lod_ranges.iter_mut().enumerate() {
                let primitive_count = 2 << (LOD_TIERS - 1 - tier);
                *range = LodRange {
                    first_index: tile_index * 64 + tier as u32 * 16,
                    primitive_count,
                };
            }

            leaves.push(TerrainLeaf {
                triangles: vec![
                    TerrainTriangle {
                        v0: Vec3::new(x, 0.0, z),
                        v1: Vec3::new(x + tile, 0.0, z),
                        v2: Vec3::new(x, 0.0, z + tile),
                    },
                    TerrainTriangle {
                        v0: Vec3::new(x + tile, 0.0, z),
                        v1: Vec3::new(x + tile, 0.0, z + tile),
                        v2: Vec3::new(x, 0.0, z + tile),
                    },
                ],
                lod_ranges,
                bounds: ScreenRect {
                    upper_left: Vector2::new(x, z),
                    lower_right: Vector2::new(x + tile, z + tile),
                },
            });
        }
    }

    Ok(TerrainQuadtree::build(leaves)?)
}
