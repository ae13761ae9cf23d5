//! # Chunk Render Adapter
//!
//! The boundary between the world and whatever draws it. The world notifies an
//! attached [`ChunkRenderAdapter`] when chunks are mounted, unmounted or need
//! their geometry rebuilt; the adapter owns one render group per mounted chunk.
//!
//! [`MeshRendererManager`] is the reference adapter. It meshes chunks with
//! [`build_chunk_mesh`] and hands the buffers to a [`GeometryBackend`], which is
//! the only part that talks to a graphics API. [`CpuGeometryBackend`] keeps
//! uploads in memory, for headless runs and tests.
//!
//! Geometry is always disposed before its replacement is attached, so a
//! backend never holds more than two live buffers per mounted chunk.

use std::{any::Any, collections::HashMap, rc::Rc};

use cgmath::Point3;
use log::{trace, warn};

use crate::{
    core::StResource,
    engine_state::{
        rendering::meshing::{build_chunk_mesh, MeshBuffers},
        voxels::{
            chunk::{coordinates::chunk_origin, Chunk, ChunkPosition},
            world::WorldManager,
        },
    },
};

/// Receives streaming notifications from a [`WorldManager`].
///
/// Every method must be a no-op when it does not apply: unmounting or
/// rebuilding a chunk that is not mounted does nothing.
pub trait ChunkRenderAdapter {
    /// A chunk entered the active set. Mounting an already mounted chunk
    /// rebuilds it.
    fn mount(&mut self, world: &mut WorldManager, chunk: StResource<Chunk>);

    /// A chunk left the active set. Its geometry must be released.
    fn unmount(&mut self, position: ChunkPosition);

    /// The chunk at `position`, or one of its neighbours, changed.
    fn rebuild(&mut self, world: &mut WorldManager, position: ChunkPosition);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Which pass a surface is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Opaque,
    /// Blended, drawn after every opaque surface.
    Transparent,
}

/// Opaque reference to geometry owned by a [`GeometryBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub fn new(id: u64) -> Self {
        GeometryHandle(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// The graphics side of the adapter.
pub trait GeometryBackend {
    /// Uploads a non-empty buffer pair and returns a handle to it.
    fn upload(&mut self, kind: SurfaceKind, buffers: &MeshBuffers) -> GeometryHandle;

    /// Releases geometry previously returned by `upload`.
    fn dispose(&mut self, handle: GeometryHandle);
}

/// What a [`CpuGeometryBackend`] keeps for each live upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedGeometry {
    pub kind: SurfaceKind,
    pub vertex_count: usize,
    pub index_count: usize,
    pub bytes: usize,
}

/// A backend that keeps uploads in memory and tracks which are still live.
#[derive(Debug, Default)]
pub struct CpuGeometryBackend {
    next_id: u64,
    live: HashMap<GeometryHandle, UploadedGeometry>,
    uploads: usize,
    disposals: usize,
}

impl CpuGeometryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn get(&self, handle: GeometryHandle) -> Option<&UploadedGeometry> {
        self.live.get(&handle)
    }

    pub fn is_live(&self, handle: GeometryHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn uploads(&self) -> usize {
        self.uploads
    }

    pub fn disposals(&self) -> usize {
        self.disposals
    }

    /// Total size of every live upload.
    pub fn live_bytes(&self) -> usize {
        self.live.values().map(|geometry| geometry.bytes).sum()
    }
}

impl GeometryBackend for CpuGeometryBackend {
    fn upload(&mut self, kind: SurfaceKind, buffers: &MeshBuffers) -> GeometryHandle {
        let handle = GeometryHandle::new(self.next_id);
        self.next_id += 1;
        self.uploads += 1;
        self.live.insert(
            handle,
            UploadedGeometry {
                kind,
                vertex_count: buffers.vertices.len(),
                index_count: buffers.indices.len(),
                bytes: buffers.vertex_bytes().len() + buffers.index_bytes().len(),
            },
        );
        handle
    }

    fn dispose(&mut self, handle: GeometryHandle) {
        if self.live.remove(&handle).is_some() {
            self.disposals += 1;
        } else {
            warn!("Disposing unknown geometry {:?}", handle);
        }
    }
}

/// The renderable group of one mounted chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    pub position: ChunkPosition,
    /// World translation applied to the chunk-local vertices.
    pub origin: Point3<i32>,
    pub opaque: Option<GeometryHandle>,
    pub transparent: Option<GeometryHandle>,
    /// How many times geometry was built for this group.
    pub builds: usize,
}

impl RenderGroup {
    fn new(position: ChunkPosition) -> Self {
        RenderGroup {
            position,
            origin: chunk_origin(position),
            opaque: None,
            transparent: None,
            builds: 0,
        }
    }

    /// Detaches and disposes both surfaces.
    fn clear(&mut self, backend: &mut impl GeometryBackend) {
        if let Some(handle) = self.opaque.take() {
            backend.dispose(handle);
        }
        if let Some(handle) = self.transparent.take() {
            backend.dispose(handle);
        }
    }
}

/// The reference render adapter: meshes chunks and keeps one [`RenderGroup`]
/// per mounted chunk.
#[derive(Debug)]
pub struct MeshRendererManager<B: GeometryBackend> {
    backend: B,
    groups: HashMap<ChunkPosition, RenderGroup>,
    rebuilds: usize,
}

impl<B: GeometryBackend> MeshRendererManager<B> {
    pub fn new(backend: B) -> Self {
        MeshRendererManager {
            backend,
            groups: HashMap::new(),
            rebuilds: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn group(&self, position: ChunkPosition) -> Option<&RenderGroup> {
        self.groups.get(&position)
    }

    pub fn is_mounted(&self, position: ChunkPosition) -> bool {
        self.groups.contains_key(&position)
    }

    /// Mounted chunk positions, sorted by (z, x).
    pub fn mounted_chunks(&self) -> Vec<ChunkPosition> {
        let mut mounted: Vec<ChunkPosition> = self.groups.keys().copied().collect();
        mounted.sort_by_key(|position| (position.y, position.x));
        mounted
    }

    /// Total number of geometry builds across every group.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Unmounts every group, releasing all geometry.
    pub fn dispose_all(&mut self) {
        for position in self.mounted_chunks() {
            self.remove_group(position);
        }
    }

    fn remove_group(&mut self, position: ChunkPosition) {
        if let Some(mut group) = self.groups.remove(&position) {
            group.clear(&mut self.backend);
        }
    }

    fn rebuild_group(&mut self, world: &mut WorldManager, position: ChunkPosition) {
        if !self.groups.contains_key(&position) {
            return;
        }
        let Some(chunk) = world.chunk(position) else {
            warn!(
                "No chunk data for mounted chunk ({}, {}), keeping old geometry",
                position.x, position.y
            );
            return;
        };

        let registry = Rc::clone(world.registry());
        let mesh = {
            let chunk = chunk.get();
            build_chunk_mesh(&chunk, &registry, |point| {
                world.get_block_at(point.x, point.y, point.z)
            })
        };

        let Some(group) = self.groups.get_mut(&position) else {
            return;
        };
        group.clear(&mut self.backend);
        if !mesh.opaque.is_empty() {
            group.opaque = Some(self.backend.upload(SurfaceKind::Opaque, &mesh.opaque));
        }
        if !mesh.transparent.is_empty() {
            group.transparent = Some(self.backend.upload(SurfaceKind::Transparent, &mesh.transparent));
        }
        group.builds += 1;
        self.rebuilds += 1;

        trace!(
            "Rebuilt chunk ({}, {}): {} opaque quads, {} transparent quads",
            position.x,
            position.y,
            mesh.opaque.quad_count(),
            mesh.transparent.quad_count()
        );
    }
}

impl<B: GeometryBackend + 'static> ChunkRenderAdapter for MeshRendererManager<B> {
    fn mount(&mut self, world: &mut WorldManager, chunk: StResource<Chunk>) {
        let position = chunk.get().position();
        self.groups
            .entry(position)
            .or_insert_with(|| RenderGroup::new(position));
        self.rebuild_group(world, position);
    }

    fn unmount(&mut self, position: ChunkPosition) {
        self.remove_group(position);
    }

    fn rebuild(&mut self, world: &mut WorldManager, position: ChunkPosition) {
        self.rebuild_group(world, position);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<B: GeometryBackend> Drop for MeshRendererManager<B> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
