//! # World Module
//!
//! This module provides the `WorldManager` struct, the central coordinator for
//! chunk generation, caching, streaming and world-space block access.
//!
//! ## Architecture
//!
//! The world uses a sparse cache: a chunk is generated the first time anything
//! touches it (streaming, a block query, or a mesher sampling across a chunk
//! seam) and is kept for the lifetime of the manager. Streaming only moves
//! chunks in and out of the *active set*, the chunks currently mounted for
//! rendering, so the active set is always a subset of the cache.
//!
//! ## Streaming
//!
//! Each `update` computes the square window of chunks around the viewer and
//! then runs two passes:
//!
//! 1. mount every chunk entering the window, then unmount every chunk leaving it
//! 2. rebuild every newly mounted chunk together with its four horizontal
//!    neighbours, so faces along a seam are re-culled once both sides exist
//!
//! The render adapter is an optional observer. A world without one still
//! generates, streams and answers queries.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    rc::Rc,
    sync::Arc,
};

use cgmath::{Point2, Point3};
use log::{debug, info, trace, warn};
use web_time::Instant;

use crate::{
    config::{clamp_load_radius, WorldConfig},
    core::StResource,
    engine_state::{
        rendering::adapter::ChunkRenderAdapter,
        voxels::{
            block::{BlockId, BlockRegistry, AIR},
            chunk::{
                coordinates::{chunk_and_neighbors, chunk_position_of_point, world_to_local},
                Chunk, ChunkPosition, CHUNK_HEIGHT,
            },
            landmarks::{Landmark, LandmarkHit, LandmarkLayout, DEFAULT_LANDMARK_DISTANCE},
        },
    },
};

pub mod terrain;

pub use terrain::{MapTile, TerrainGenerator, FLOOR_BLOCK, SEA_LEVEL};

/// A snapshot of the streaming state, as shown on the HUD status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStats {
    pub active_chunks: usize,
    pub generated_chunks: usize,
    /// How many times terrain generation actually ran.
    pub generation_runs: usize,
    pub load_radius: i32,
    /// The chunk the viewer stood in at the last `update`, if there was one.
    pub viewer_chunk: Option<ChunkPosition>,
}

/// What one `update` changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingUpdate {
    /// Chunks that entered the active set, in window order.
    pub mounted: Vec<ChunkPosition>,
    /// Chunks that left the active set, sorted by (z, x).
    pub unmounted: Vec<ChunkPosition>,
    /// Rebuild notifications the neighbour pass delivered to the adapter.
    /// Zero when no adapter is attached.
    pub rebuilds: usize,
}

impl StreamingUpdate {
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.unmounted.is_empty()
    }
}

/// Returns the square window of radius `radius` around `center`, with Z in the
/// outer loop and X in the inner loop.
pub fn streaming_window(center: ChunkPosition, radius: i32) -> Vec<ChunkPosition> {
    let side = (2 * radius + 1).max(0) as usize;
    let mut window = Vec::with_capacity(side * side);
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            window.push(Point2::new(center.x + dx, center.y + dz));
        }
    }
    window
}

/// A notification for the render adapter.
enum Notification {
    Mount(StResource<Chunk>),
    Unmount(ChunkPosition),
    Rebuild(ChunkPosition),
}

/// Owns the chunk cache and the streaming window.
pub struct WorldManager {
    registry: Rc<BlockRegistry>,
    terrain: TerrainGenerator,
    layout: Arc<LandmarkLayout>,
    load_radius: i32,
    chunks: HashMap<ChunkPosition, StResource<Chunk>>,
    active: HashSet<ChunkPosition>,
    adapter: Option<Box<dyn ChunkRenderAdapter>>,
    /// Set while the adapter is checked out to handle a notification.
    dispatching: bool,
    /// Notifications raised from inside an adapter callback.
    pending: VecDeque<Notification>,
    generation_runs: usize,
    viewer_chunk: Option<ChunkPosition>,
}

impl WorldManager {
    /// Creates a world over the authored city layout.
    ///
    /// # Arguments
    ///
    /// * `registry` - Block attributes shared with meshing and collision
    /// * `config` - Seed and streaming radius; the radius is clamped to `[2, 8]`
    pub fn new(registry: Rc<BlockRegistry>, config: WorldConfig) -> Self {
        Self::with_layout(registry, config, LandmarkLayout::shared())
    }

    /// Creates a world over a caller-supplied layout.
    pub fn with_layout(
        registry: Rc<BlockRegistry>,
        config: WorldConfig,
        layout: Arc<LandmarkLayout>,
    ) -> Self {
        let load_radius = clamp_load_radius(config.load_radius);
        info!(
            "Creating world: seed {}, load radius {}, {} structure overrides",
            config.seed,
            load_radius,
            layout.overrides.len()
        );

        WorldManager {
            registry,
            terrain: TerrainGenerator::new(config.seed),
            layout,
            load_radius,
            chunks: HashMap::new(),
            active: HashSet::new(),
            adapter: None,
            dispatching: false,
            pending: VecDeque::new(),
            generation_runs: 0,
            viewer_chunk: None,
        }
    }

    pub fn registry(&self) -> &Rc<BlockRegistry> {
        &self.registry
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn layout(&self) -> &LandmarkLayout {
        &self.layout
    }

    pub fn seed(&self) -> i32 {
        self.terrain.seed()
    }

    // ---------------------------------------------------------------------
    // Render adapter
    // ---------------------------------------------------------------------

    /// Attaches a render adapter, returning the previous one.
    ///
    /// Chunks that are already active are not replayed to the new adapter;
    /// attach before the first `update` to receive every mount. Attaching from
    /// inside an adapter callback replaces the calling adapter once its
    /// callback returns.
    pub fn attach_adapter(
        &mut self,
        adapter: Box<dyn ChunkRenderAdapter>,
    ) -> Option<Box<dyn ChunkRenderAdapter>> {
        self.adapter.replace(adapter)
    }

    pub fn detach_adapter(&mut self) -> Option<Box<dyn ChunkRenderAdapter>> {
        self.adapter.take()
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }

    /// Returns the attached adapter if it is a `T`.
    pub fn adapter<T: ChunkRenderAdapter + 'static>(&self) -> Option<&T> {
        self.adapter
            .as_ref()
            .and_then(|adapter| adapter.as_any().downcast_ref::<T>())
    }

    /// Returns the attached adapter mutably if it is a `T`.
    pub fn adapter_mut<T: ChunkRenderAdapter + 'static>(&mut self) -> Option<&mut T> {
        self.adapter
            .as_mut()
            .and_then(|adapter| adapter.as_any_mut().downcast_mut::<T>())
    }

    /// Delivers `notification` to the adapter, if one is attached.
    ///
    /// The adapter is taken out of `self` for the duration of the call so it
    /// can read (and lazily generate) world data through `&mut WorldManager`.
    /// Notifications raised by the world while the adapter is out, such as the
    /// rebuilds of a `set_block_at` made from a callback, are queued and
    /// delivered before the adapter is put back.
    ///
    /// # Returns
    ///
    /// `true` if an adapter will receive the notification.
    fn notify(&mut self, notification: Notification) -> bool {
        if self.dispatching {
            self.pending.push_back(notification);
            return true;
        }
        let Some(mut adapter) = self.adapter.take() else {
            return false;
        };

        self.dispatching = true;
        let mut next = Some(notification);
        while let Some(notification) = next {
            match notification {
                Notification::Mount(chunk) => adapter.mount(self, chunk),
                Notification::Unmount(position) => adapter.unmount(position),
                Notification::Rebuild(position) => adapter.rebuild(self, position),
            }
            next = self.pending.pop_front();
        }
        self.dispatching = false;

        if self.adapter.is_some() {
            info!("Render adapter replaced from inside a notification");
        } else {
            self.adapter = Some(adapter);
        }
        true
    }

    /// Asks the adapter to rebuild `position` and its four horizontal neighbours.
    /// Returns the number of notifications delivered.
    fn rebuild_with_neighbors(&mut self, position: ChunkPosition) -> usize {
        chunk_and_neighbors(position)
            .into_iter()
            .filter(|target| self.notify(Notification::Rebuild(*target)))
            .count()
    }

    // ---------------------------------------------------------------------
    // Generation and cache
    // ---------------------------------------------------------------------

    /// Generates the chunk at `position` without touching the cache.
    ///
    /// A pure function of (position, seed, override map).
    pub fn generate_chunk(&self, position: ChunkPosition) -> Chunk {
        self.terrain.generate_chunk(position, &self.layout.overrides)
    }

    /// Returns the cached chunk at `position`, generating and caching it first
    /// if needed. Each position is generated at most once per manager.
    pub fn ensure_chunk(&mut self, position: ChunkPosition) -> StResource<Chunk> {
        if let Some(chunk) = self.chunks.get(&position) {
            return chunk.clone();
        }

        let started = Instant::now();
        let chunk = StResource::new(self.generate_chunk(position));
        self.generation_runs += 1;
        trace!(
            "Generated chunk ({}, {}) in {:?}",
            position.x,
            position.y,
            started.elapsed()
        );

        self.chunks.insert(position, chunk.clone());
        chunk
    }

    /// Returns the cached chunk at `position` without generating it.
    pub fn chunk(&self, position: ChunkPosition) -> Option<StResource<Chunk>> {
        self.chunks.get(&position).cloned()
    }

    pub fn is_generated(&self, position: ChunkPosition) -> bool {
        self.chunks.contains_key(&position)
    }

    pub fn is_active(&self, position: ChunkPosition) -> bool {
        self.active.contains(&position)
    }

    /// The active set, sorted by (z, x).
    pub fn active_chunks(&self) -> Vec<ChunkPosition> {
        let mut active: Vec<ChunkPosition> = self.active.iter().copied().collect();
        active.sort_by_key(|position| (position.y, position.x));
        active
    }

    pub fn generation_runs(&self) -> usize {
        self.generation_runs
    }

    // ---------------------------------------------------------------------
    // Streaming
    // ---------------------------------------------------------------------

    /// Moves the streaming window to follow `viewer`.
    ///
    /// # Arguments
    ///
    /// * `viewer` - The viewer's world position; must be finite
    ///
    /// # Returns
    ///
    /// The chunks mounted and unmounted by this call.
    pub fn update(&mut self, viewer: Point3<f32>) -> StreamingUpdate {
        let started = Instant::now();
        let center = chunk_position_of_point(viewer);
        self.viewer_chunk = Some(center);

        let required = streaming_window(center, self.load_radius);
        let required_set: HashSet<ChunkPosition> = required.iter().copied().collect();

        let mounted: Vec<ChunkPosition> = required
            .into_iter()
            .filter(|position| !self.active.contains(position))
            .collect();
        let mut unmounted: Vec<ChunkPosition> = self
            .active
            .iter()
            .filter(|position| !required_set.contains(position))
            .copied()
            .collect();
        unmounted.sort_by_key(|position| (position.y, position.x));

        for &position in &mounted {
            let chunk = self.ensure_chunk(position);
            self.active.insert(position);
            self.notify(Notification::Mount(chunk));
        }

        for &position in &unmounted {
            self.active.remove(&position);
            self.notify(Notification::Unmount(position));
        }

        let mut rebuilds = 0;
        for &position in &mounted {
            rebuilds += self.rebuild_with_neighbors(position);
        }

        if !mounted.is_empty() || !unmounted.is_empty() {
            debug!(
                "Streaming around chunk ({}, {}): {} mounted, {} unmounted, {} rebuilds, {} active in {:?}",
                center.x,
                center.y,
                mounted.len(),
                unmounted.len(),
                rebuilds,
                self.active.len(),
                started.elapsed()
            );
        }

        StreamingUpdate {
            mounted,
            unmounted,
            rebuilds,
        }
    }

    pub fn load_radius(&self) -> i32 {
        self.load_radius
    }

    /// Sets the streaming radius, clamped to `[2, 8]`. Takes effect on the
    /// next `update`.
    pub fn set_load_radius(&mut self, radius: i32) {
        let clamped = clamp_load_radius(radius);
        if clamped != self.load_radius {
            info!("Load radius changed from {} to {}", self.load_radius, clamped);
        }
        self.load_radius = clamped;
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            active_chunks: self.active.len(),
            generated_chunks: self.chunks.len(),
            generation_runs: self.generation_runs,
            load_radius: self.load_radius,
            viewer_chunk: self.viewer_chunk,
        }
    }

    // ---------------------------------------------------------------------
    // Block queries
    // ---------------------------------------------------------------------

    /// Returns the block at a world coordinate, generating its chunk if needed.
    ///
    /// Below the world floor this is always [`FLOOR_BLOCK`]; above the ceiling
    /// it is always air.
    pub fn get_block_at(&mut self, x: i32, y: i32, z: i32) -> BlockId {
        if y < 0 {
            return FLOOR_BLOCK.id();
        }
        if y >= CHUNK_HEIGHT {
            return AIR;
        }

        let (position, local) = world_to_local(Point3::new(x, y, z));
        self.ensure_chunk(position).get().get_at(local)
    }

    /// Returns the block containing a continuous world position.
    pub fn block_at_point(&mut self, point: Point3<f32>) -> BlockId {
        self.get_block_at(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Collision query: whether the block containing `point` blocks movement.
    pub fn is_solid_at(&mut self, point: Point3<f32>) -> bool {
        let id = self.block_at_point(point);
        self.registry.is_solid(id)
    }

    /// Writes a block at a world coordinate.
    ///
    /// Coordinates outside the vertical range are ignored, as are ids the
    /// registry does not define. If the owning chunk is active, it and its
    /// four horizontal neighbours are rebuilt, also when the write comes from
    /// inside an adapter callback.
    ///
    /// # Returns
    ///
    /// `true` if the block was written.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> bool {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return false;
        }
        if !self.registry.contains(id) {
            warn!("Ignoring write of unknown block id {} at ({}, {}, {})", id, x, y, z);
            return false;
        }

        let (position, local) = world_to_local(Point3::new(x, y, z));
        self.ensure_chunk(position).get_mut().set_at(local, id);

        if self.active.contains(&position) {
            self.rebuild_with_neighbors(position);
        }
        true
    }

    // ---------------------------------------------------------------------
    // Map and landmarks
    // ---------------------------------------------------------------------

    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        self.terrain.terrain_height(x, z)
    }

    /// Classifies a world column for the overhead map.
    pub fn map_tile_at(&self, x: f32, z: f32) -> MapTile {
        self.terrain.map_tile_at(x as f64, z as f64)
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.layout.landmarks
    }

    /// The closest landmark within `max_distance` in the XZ plane.
    pub fn nearest_landmark(&self, position: Point3<f32>, max_distance: f32) -> Option<LandmarkHit<'_>> {
        self.layout.nearest(position, max_distance)
    }

    /// [`WorldManager::nearest_landmark`] with the default probe distance.
    pub fn nearest_landmark_default(&self, position: Point3<f32>) -> Option<LandmarkHit<'_>> {
        self.nearest_landmark(position, DEFAULT_LANDMARK_DISTANCE)
    }

    pub fn landmark_by_id(&self, id: &str) -> Option<&Landmark> {
        self.layout.by_id(id)
    }
}

impl std::fmt::Debug for WorldManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldManager")
            .field("seed", &self.terrain.seed())
            .field("load_radius", &self.load_radius)
            .field("generated_chunks", &self.chunks.len())
            .field("active_chunks", &self.active.len())
            .field("has_adapter", &self.adapter.is_some())
            .finish()
    }
}
