#![warn(missing_debug_implementations)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A streamed, procedurally generated block world: an island city built from
//! deterministic terrain with hand-authored landmarks stamped on top.
//!
//! ## Key Modules
//!
//! * `core` - Shared single-threaded resource handles
//! * `config` - Explicit world and engine configuration
//! * `engine_state` - The world, chunk streaming, meshing and the render adapter contract
//! * `error` - The error type for the few fallible entry points
//!
//! ## Architecture
//!
//! The crate is single-threaded and tick-driven. Each frame the viewer
//! position goes into [`engine_state::EngineState::tick`]; the world mounts and
//! unmounts chunks around it and a render adapter rebuilds the geometry of
//! whatever changed. The graphics API itself sits behind
//! [`engine_state::rendering::GeometryBackend`].
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{config::EngineConfig, engine_state::EngineState};
//!
//! let mut engine = EngineState::new(EngineConfig::default());
//! engine.tick(Point3::new(0.0, 20.0, 0.0));
//! assert!(engine.world.is_solid_at(Point3::new(0.5, 0.5, 0.5)));
//! ```

use std::path::Path;

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3, VectorSpace};
use log::info;

pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;

use config::EngineConfig;
use engine_state::{voxels::world::MapTile, EngineState};
use error::EngineResult;

/// Height the demo viewer walks at.
const DEMO_EYE_HEIGHT: f32 = 20.0;

/// Distance the demo viewer moves per frame.
const DEMO_STEP: f32 = 4.0;

/// The demo walk: plaza, city gate, promenade, El Morro, cathedral, La Fortaleza.
const DEMO_WAYPOINTS: [(f32, f32); 7] = [
    (0.0, 0.0),
    (2.0, -30.0),
    (20.0, -41.0),
    (-60.0, -15.0),
    (30.0, 34.0),
    (52.0, -2.0),
    (0.0, 0.0),
];

/// Runs the headless demo: streams the city along a fixed walk and logs what
/// the HUD would show.
///
/// # Arguments
/// * `config_path` - Optional JSON configuration file
///
/// # Errors
/// Fails if the configuration file cannot be read or parsed.
pub fn run(config_path: Option<&Path>) -> EngineResult<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };
    info!("Configuration: {}", config.to_json_string()?);

    let mut engine = EngineState::new(config);
    let mut last_plaque: Option<String> = None;

    for leg in DEMO_WAYPOINTS.windows(2) {
        let from = Vector3::new(leg[0].0, DEMO_EYE_HEIGHT, leg[0].1);
        let to = Vector3::new(leg[1].0, DEMO_EYE_HEIGHT, leg[1].1);
        let steps = ((to - from).magnitude() / DEMO_STEP).ceil().max(1.0) as usize;

        for step in 0..=steps {
            let viewer = Point3::from_vec(from.lerp(to, step as f32 / steps as f32));
            engine.tick(viewer);

            let plaque = engine
                .plaque()
                .map(|view| (view.hit.landmark.name.clone(), view.hit.distance, view.pinned));
            let name = plaque.as_ref().map(|(name, _, _)| name.clone());
            if name != last_plaque {
                if let Some((name, distance, pinned)) = &plaque {
                    info!(
                        "Plaque: {} ({:.1} blocks{})",
                        name,
                        distance,
                        if *pinned { ", pinned" } else { "" }
                    );
                }
                last_plaque = name;
            }
        }

        // Pin whatever is nearby at each waypoint, so the plaque follows it
        // along the next leg.
        engine.interact();
    }

    let stats = engine.stats();
    info!(
        "Chunks active {} / generated {} | Radius {} | Generation runs {}",
        stats.active_chunks, stats.generated_chunks, stats.load_radius, stats.generation_runs
    );
    if let Some(renderer) = engine.renderer() {
        info!(
            "Renderer: {} groups, {} rebuilds, {} live buffers ({} bytes)",
            renderer.mounted_chunks().len(),
            renderer.rebuild_count(),
            renderer.backend().live_count(),
            renderer.backend().live_bytes()
        );
    }

    let (mut water, mut road, mut land) = (0, 0, 0);
    for z in (-128..128).step_by(4) {
        for x in (-128..128).step_by(4) {
            match engine.world.map_tile_at(x as f32, z as f32) {
                MapTile::Water => water += 1,
                MapTile::Road => road += 1,
                MapTile::Land => land += 1,
            }
        }
    }
    info!("Map: {} water, {} road, {} land tiles", water, road, land);

    Ok(())
}
