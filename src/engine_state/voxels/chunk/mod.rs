//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size column of voxel data
//! `CHUNK_SIZE` blocks wide, `CHUNK_SIZE` blocks deep and `CHUNK_HEIGHT` blocks
//! tall. Chunks are the unit of generation, caching and streaming.
//!
//! ## Storage
//!
//! Blocks are kept as a dense flat array of `BlockId` bytes indexed
//! `x + z * CHUNK_SIZE + y * CHUNK_SIZE²`, so a horizontal layer is contiguous.
//! Every local access is bounds-checked: reads outside the chunk return air and
//! writes outside the chunk are ignored.

use cgmath::Point3;

use super::block::{BlockId, AIR};

pub mod coordinates;

pub use coordinates::ChunkPosition;

/// Horizontal edge length of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// Vertical extent of a chunk (and of the world) in blocks.
pub const CHUNK_HEIGHT: i32 = 64;
/// The number of blocks in one horizontal layer of a chunk.
pub const CHUNK_LAYER_SIZE: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
/// The total number of blocks in a chunk.
pub const BLOCKS_PER_CHUNK: usize = CHUNK_LAYER_SIZE * CHUNK_HEIGHT as usize;

/// A `CHUNK_SIZE` x `CHUNK_HEIGHT` x `CHUNK_SIZE` block of voxels.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    position: ChunkPosition,
    blocks: Box<[BlockId]>,
    /// Set once by the generator after every voxel has been written.
    generated: bool,
    /// Set by any in-range `set` after generation.
    modified: bool,
}

impl Chunk {
    /// Creates a chunk filled with air. Neither flag is set.
    pub fn new(position: ChunkPosition) -> Self {
        Chunk {
            position,
            blocks: vec![AIR; BLOCKS_PER_CHUNK].into_boxed_slice(),
            generated: false,
            modified: false,
        }
    }

    pub fn position(&self) -> ChunkPosition {
        self.position
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// The raw voxel array, in storage order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Returns `true` if the local coordinate lies inside this chunk.
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&z) && (0..CHUNK_HEIGHT).contains(&y)
    }

    fn index(x: i32, y: i32, z: i32) -> usize {
        (x + z * CHUNK_SIZE) as usize + y as usize * CHUNK_LAYER_SIZE
    }

    /// Returns the block at a local coordinate, or air when out of range.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        if !Self::in_bounds(x, y, z) {
            return AIR;
        }
        self.blocks[Self::index(x, y, z)]
    }

    /// Like [`Chunk::get`] for a point.
    pub fn get_at(&self, local: Point3<i32>) -> BlockId {
        self.get(local.x, local.y, local.z)
    }

    /// Stores `id` at a local coordinate and marks the chunk modified.
    /// Out-of-range coordinates are ignored and leave the flags untouched.
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        self.blocks[Self::index(x, y, z)] = id;
        self.modified = true;
    }

    /// Like [`Chunk::set`] for a point.
    pub fn set_at(&mut self, local: Point3<i32>, id: BlockId) {
        self.set(local.x, local.y, local.z, id);
    }

    /// Marks the grid as fully populated. Writes made while generating do not
    /// count as modifications.
    pub(crate) fn finish_generation(&mut self) {
        debug_assert!(!self.generated, "chunk {:?} generated twice", self.position);
        self.generated = true;
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point2;

    use super::*;

    #[test]
    fn out_of_range_reads_are_air() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set(0, 0, 0, 5);
        assert_eq!(chunk.get(-1, 0, 0), AIR);
        assert_eq!(chunk.get(0, CHUNK_HEIGHT, 0), AIR);
        assert_eq!(chunk.get(0, 0, CHUNK_SIZE), AIR);
        assert_eq!(chunk.get(0, 0, 0), 5);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut chunk = Chunk::new(Point2::new(2, -1));
        chunk.set(CHUNK_SIZE, 0, 0, 3);
        chunk.set(0, -1, 0, 3);
        assert!(!chunk.is_modified());
        assert!(chunk.blocks().iter().all(|id| *id == AIR));
    }

    #[test]
    fn in_range_write_marks_modified() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set(15, 63, 15, 9);
        assert!(chunk.is_modified());
        assert_eq!(chunk.get(15, 63, 15), 9);
        assert_eq!(chunk.get_at(Point3::new(15, 63, 15)), 9);
    }

    #[test]
    fn finishing_generation_clears_modified() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set(1, 1, 1, 2);
        chunk.finish_generation();
        assert!(chunk.is_generated());
        assert!(!chunk.is_modified());
    }

    #[test]
    fn layers_are_contiguous() {
        let mut chunk = Chunk::new(Point2::new(0, 0));
        chunk.set(1, 0, 0, 7);
        chunk.set(0, 0, 1, 8);
        chunk.set(0, 1, 0, 9);
        assert_eq!(chunk.blocks()[1], 7);
        assert_eq!(chunk.blocks()[CHUNK_SIZE as usize], 8);
        assert_eq!(chunk.blocks()[CHUNK_LAYER_SIZE], 9);
    }
}
