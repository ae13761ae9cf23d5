//! Rendering side of the voxel engine.
//!
//! This module turns chunk data into renderable geometry and defines the
//! contract the world uses to drive a renderer. No graphics API is touched
//! here: finished buffers go through the [`adapter::GeometryBackend`] port.

pub mod adapter;
pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use adapter::{
    ChunkRenderAdapter, CpuGeometryBackend, GeometryBackend, GeometryHandle, MeshRendererManager,
    RenderGroup, SurfaceKind,
};
pub use meshing::{build_chunk_mesh, ChunkMesh, MeshBuffers};
pub use vertex::Vertex;
