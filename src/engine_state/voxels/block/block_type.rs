//! # Block Type Module
//!
//! This module names the block ids used by terrain generation and the authored
//! landmark structures. Stored voxels are plain `BlockId` bytes; `BlockType`
//! only gives those bytes readable names.

use num_derive::FromPrimitive;

use super::BlockId;

/// Enumerates every block id the default registry knows about.
///
/// The discriminants are the stored ids, so `BlockType::WATER.id()` is the byte
/// written into a chunk. The `FromPrimitive` derive converts stored ids back.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Non-solid and transparent.
    AIR = 0,
    /// Street and plaza paving.
    COBBLESTONE = 1,
    /// Sub-surface fill and fortress masonry. Also reported below the world floor.
    BRICK = 2,
    STUCCO_WHITE = 3,
    STUCCO_BLUE = 4,
    STUCCO_PINK = 5,
    STUCCO_YELLOW = 6,
    /// Roof tiles.
    TERRACOTTA_TILE = 7,
    /// Doors.
    WOOD_DARK = 8,
    /// Window grates. Solid but see-through.
    IRON_GRATE = 9,
    /// Sea fill. Non-solid and transparent.
    WATER = 10,
    /// Beaches and the default land surface.
    SAND = 11,
    PALM_TRUNK = 12,
    /// Palm canopy. Non-solid and transparent.
    PALM_LEAVES = 13,
}

impl BlockType {
    /// Returns the stored id of this block type.
    pub const fn id(self) -> BlockId {
        self as BlockId
    }

    /// Converts a stored id back into a named type.
    ///
    /// # Returns
    /// `None` when no block type uses `id`.
    pub fn from_id(id: BlockId) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(id)
    }
}

impl From<BlockType> for BlockId {
    fn from(block_type: BlockType) -> Self {
        block_type.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_convert_both_ways() {
        assert_eq!(BlockType::from_id(10), Some(BlockType::WATER));
        assert_eq!(BlockType::PALM_LEAVES.id(), 13);
        assert_eq!(BlockType::from_id(200), None);
    }
}
