//! # Meshing
//!
//! Converts chunk voxel data into renderable surfaces.
//!
//! The mesher is deliberately simple: each visible voxel face is exactly one
//! quad with a fixed per-side shade. There is no face merging, no interior
//! short-circuit and no level of detail. A face is skipped only when the
//! neighbouring voxel occludes it, which may require sampling across a chunk
//! seam, so the caller supplies a world sampler rather than the mesher reading
//! neighbouring chunks itself.

pub mod face;
pub mod mesh;

pub use face::Face;
pub use mesh::{build_chunk_mesh, is_face_hidden, ChunkMesh, MeshBuffers};
