//! Mesh data structures and the chunk mesher.
//!
//! This module turns a chunk's voxel grid into GPU-friendly vertex and index
//! buffers. Every visible voxel face becomes one quad; neighbours are sampled
//! through the world so faces along chunk seams are culled correctly.

use cgmath::{EuclideanSpace, Point3};

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, BlockId, BlockRegistry, AIR},
        chunk::{coordinates::chunk_origin, Chunk, CHUNK_HEIGHT, CHUNK_SIZE},
    },
};

use super::face::Face;

/// One vertex/index buffer pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// The vertex data, four per quad
    pub vertices: Vec<Vertex>,
    /// The index data, six per quad
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one face as a quad.
    pub fn push_face(&mut self, face: &Face) {
        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices.extend_from_slice(&Face::indices(first_vertex));
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// The two surfaces of a chunk. Transparent blocks are blended by the renderer
/// so they never share a buffer with opaque ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    pub opaque: MeshBuffers,
    pub transparent: MeshBuffers,
}

impl ChunkMesh {
    pub fn quad_count(&self) -> usize {
        self.opaque.quad_count() + self.transparent.quad_count()
    }

    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.transparent.is_empty()
    }
}

/// Returns `true` if the face between a voxel of `block` and a neighbour of
/// `neighbor` is hidden.
///
/// A face is hidden behind any opaque neighbour, and behind a transparent
/// neighbour of the same block. Two different transparent blocks still show
/// the face between them.
pub fn is_face_hidden(registry: &BlockRegistry, block: BlockId, neighbor: BlockId) -> bool {
    neighbor != AIR && (!registry.is_transparent(neighbor) || neighbor == block)
}

/// Builds the opaque and transparent surfaces of `chunk`.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `registry` - Block attributes for transparency and color
/// * `sample` - Returns the block at a world coordinate; called for every
///   neighbour, including those in adjacent chunks
///
/// # Returns
/// A `ChunkMesh` with chunk-local vertex positions.
pub fn build_chunk_mesh<F>(chunk: &Chunk, registry: &BlockRegistry, mut sample: F) -> ChunkMesh
where
    F: FnMut(Point3<i32>) -> BlockId,
{
    let mut mesh = ChunkMesh::default();
    let origin = chunk_origin(chunk.position());

    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            for y in 0..CHUNK_HEIGHT {
                let id = chunk.get(x, y, z);
                let definition = registry.get(id);
                // Unknown ids resolve to air and draw nothing.
                if id == AIR || definition.id == AIR {
                    continue;
                }

                let target = if definition.transparent {
                    &mut mesh.transparent
                } else {
                    &mut mesh.opaque
                };

                let local = Point3::new(x, y, z);
                let world = origin + local.to_vec();
                for side in BlockSide::all() {
                    let neighbor = sample(world + side.offset());
                    if is_face_hidden(registry, id, neighbor) {
                        continue;
                    }
                    target.push_face(&Face::new(local, side, definition.base_color));
                }
            }
        }
    }

    mesh
}
