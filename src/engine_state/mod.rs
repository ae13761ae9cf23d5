//! # Engine State Module
//!
//! The per-frame coordinator of the voxel engine.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world and the landmark tracker and drives one tick per frame
//! * `rendering` - Chunk meshing and the render adapter contract
//! * `voxels` - Voxel data, terrain generation, landmarks and streaming
//!
//! ## Architecture
//!
//! Data flows one way per tick: the viewer position goes to the world, the
//! world updates its streaming window and notifies the attached render
//! adapter, and the adapter rebuilds geometry for the chunks that changed.
//! All of it happens synchronously inside [`EngineState::tick`].

use std::rc::Rc;

use cgmath::Point3;
use log::debug;
use web_time::{Duration, Instant};

use crate::config::EngineConfig;
use rendering::{ChunkRenderAdapter, CpuGeometryBackend, MeshRendererManager};
use voxels::{
    block::BlockRegistry,
    landmarks::{tracker::PlaqueView, LandmarkTracker},
    world::{WorldManager, WorldStats},
};

pub mod rendering;
pub mod voxels;

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks that entered the active set
    pub mounted: usize,
    /// Chunks that left the active set
    pub unmounted: usize,
    /// Rebuild notifications delivered for new chunks and their neighbours.
    /// Zero when the engine runs without a render adapter.
    pub rebuilt: usize,
    /// Wall time spent in the tick
    pub elapsed: Duration,
}

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{config::EngineConfig, engine_state::EngineState};
///
/// let mut engine = EngineState::new(EngineConfig::default());
/// let report = engine.tick(Point3::new(0.0, 20.0, 0.0));
/// assert_eq!(report.mounted, 81);
/// ```
#[derive(Debug)]
pub struct EngineState {
    /// The voxel world and its attached render adapter
    pub world: WorldManager,
    /// Configuration the engine was built with
    config: EngineConfig,
    /// Landmark plaque pinning
    tracker: LandmarkTracker,
    /// Viewer position at the last tick
    viewer: Point3<f32>,
    /// Number of ticks run so far
    frames: u64,
}

impl EngineState {
    /// Creates an engine that meshes into an in-memory geometry backend.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_adapter(
            config,
            Rc::new(BlockRegistry::default()),
            Some(Box::new(MeshRendererManager::new(CpuGeometryBackend::new()))),
        )
    }

    /// Creates an engine with a caller-supplied registry and render adapter.
    ///
    /// # Arguments
    /// * `config` - World and landmark settings
    /// * `registry` - Block attributes shared by meshing and collision
    /// * `adapter` - The renderer to notify, or `None` to run without one
    pub fn with_adapter(
        config: EngineConfig,
        registry: Rc<BlockRegistry>,
        adapter: Option<Box<dyn ChunkRenderAdapter>>,
    ) -> Self {
        let mut world = WorldManager::new(registry, config.world);
        if let Some(adapter) = adapter {
            world.attach_adapter(adapter);
        }

        EngineState {
            world,
            config,
            tracker: LandmarkTracker::new(),
            viewer: Point3::new(0.0, 0.0, 0.0),
            frames: 0,
        }
    }

    /// Advances one frame with the viewer at `viewer`.
    pub fn tick(&mut self, viewer: Point3<f32>) -> TickReport {
        let started = Instant::now();
        self.viewer = viewer;
        self.frames += 1;

        let update = self.world.update(viewer);
        let report = TickReport {
            mounted: update.mounted.len(),
            unmounted: update.unmounted.len(),
            rebuilt: update.rebuilds,
            elapsed: started.elapsed(),
        };

        if !update.is_empty() {
            debug!("Frame {}: {:?}", self.frames, report);
        }
        report
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewer(&self) -> Point3<f32> {
        self.viewer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> WorldStats {
        self.world.stats()
    }

    /// Changes the streaming radius for the following ticks.
    pub fn set_load_radius(&mut self, radius: i32) {
        self.world.set_load_radius(radius);
        self.config.world.load_radius = self.world.load_radius();
    }

    /// The landmark plaque for the current viewer position.
    pub fn plaque(&self) -> Option<PlaqueView<'_>> {
        self.tracker.resolve(
            self.world.layout(),
            self.viewer,
            self.config.landmark_probe_distance,
        )
    }

    /// Pins the nearby landmark, or clears the pin.
    pub fn interact(&mut self) {
        let nearby = self
            .world
            .nearest_landmark(self.viewer, self.config.landmark_probe_distance);
        self.tracker.toggle_pin(nearby);
    }

    pub fn tracker(&self) -> &LandmarkTracker {
        &self.tracker
    }

    /// The built-in renderer, if the engine was created with [`EngineState::new`].
    pub fn renderer(&self) -> Option<&MeshRendererManager<CpuGeometryBackend>> {
        self.world.adapter::<MeshRendererManager<CpuGeometryBackend>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn config(load_radius: i32) -> EngineConfig {
        EngineConfig {
            world: WorldConfig {
                seed: 1942,
                load_radius,
            },
            ..Default::default()
        }
    }

    #[test]
    fn first_tick_mounts_the_whole_window() {
        let mut engine = EngineState::new(config(2));
        let report = engine.tick(Point3::new(0.0, 20.0, 0.0));

        assert_eq!(report.mounted, 25);
        assert_eq!(report.unmounted, 0);
        assert_eq!(report.rebuilt, 125);

        let renderer = engine.renderer().unwrap();
        assert_eq!(renderer.mounted_chunks().len(), 25);
    }

    #[test]
    fn crossing_a_chunk_border_streams_one_column() {
        let mut engine = EngineState::new(config(2));
        engine.tick(Point3::new(8.0, 20.0, 8.0));
        let report = engine.tick(Point3::new(24.0, 20.0, 8.0));

        assert_eq!(report.mounted, 5);
        assert_eq!(report.unmounted, 5);
        assert_eq!(engine.stats().active_chunks, 25);
    }

    #[test]
    fn radius_changes_are_reflected_in_config() {
        let mut engine = EngineState::with_adapter(config(4), Rc::new(BlockRegistry::default()), None);
        engine.set_load_radius(12);
        assert_eq!(engine.config().world.load_radius, 8);
        assert!(engine.renderer().is_none());
    }

    #[test]
    fn tick_without_adapter_reports_no_rebuilds() {
        let mut engine = EngineState::with_adapter(config(2), Rc::new(BlockRegistry::default()), None);
        let report = engine.tick(Point3::new(0.0, 20.0, 0.0));
        assert_eq!(report.mounted, 25);
        assert_eq!(report.rebuilt, 0);
    }

    #[test]
    fn interact_pins_the_nearby_landmark() {
        let mut engine = EngineState::with_adapter(config(2), Rc::new(BlockRegistry::default()), None);
        let gate = engine.world.landmark_by_id("puerta-san-juan").unwrap().position;

        engine.tick(Point3::new(gate.x, 20.0, gate.z));
        engine.interact();
        assert_eq!(engine.tracker().pinned_id(), Some("puerta-san-juan"));

        engine.tick(Point3::new(gate.x + 200.0, 20.0, gate.z));
        let plaque = engine.plaque().unwrap();
        assert!(plaque.pinned);
        assert!((plaque.hit.distance - 200.0).abs() < 1e-3);
    }
}
