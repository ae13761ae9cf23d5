//! # Block Module
//!
//! This module provides the block attribute table shared by collision queries
//! and meshing.
//!
//! Voxels are stored as raw `BlockId` bytes. Everything a caller may want to
//! know about an id (solidity, transparency, base color) lives in a
//! `BlockRegistry`, which is immutable once built and never fails a lookup:
//! unknown ids resolve to the air definition.

use serde::{Deserialize, Serialize};

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type stored per voxel.
pub type BlockId = u8;

/// The id reserved for empty space.
pub const AIR: BlockId = BlockType::AIR.id();

/// The attributes of one block id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub id: BlockId,
    pub name: String,
    /// Blocks movement.
    pub solid: bool,
    /// Lets neighbouring faces show through and is drawn in the blended pass.
    pub transparent: bool,
    /// Normalized RGB in `[0, 1]`.
    pub base_color: [f32; 3],
}

impl BlockDefinition {
    /// Builds a definition from a packed `0xRRGGBB` color.
    pub fn new(
        block_type: BlockType,
        name: &str,
        solid: bool,
        transparent: bool,
        color: u32,
    ) -> Self {
        BlockDefinition {
            id: block_type.id(),
            name: name.to_string(),
            solid,
            transparent,
            base_color: color_to_rgb(color),
        }
    }

    fn air() -> Self {
        BlockDefinition::new(BlockType::AIR, "air", false, true, 0x000000)
    }
}

/// Unpacks `0xRRGGBB` into normalized channels.
pub fn color_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 255) as f32 / 255.0,
        ((color >> 8) & 255) as f32 / 255.0,
        (color & 255) as f32 / 255.0,
    ]
}

/// Returns the definitions of every `BlockType`, in id order.
pub fn default_block_definitions() -> Vec<BlockDefinition> {
    use BlockType::*;

    vec![
        BlockDefinition::air(),
        BlockDefinition::new(COBBLESTONE, "cobblestone", true, false, 0x6f7a82),
        BlockDefinition::new(BRICK, "brick", true, false, 0x836756),
        BlockDefinition::new(STUCCO_WHITE, "stucco_white", true, false, 0xd9d2c4),
        BlockDefinition::new(STUCCO_BLUE, "stucco_blue", true, false, 0x6ea6bb),
        BlockDefinition::new(STUCCO_PINK, "stucco_pink", true, false, 0xe0a08d),
        BlockDefinition::new(STUCCO_YELLOW, "stucco_yellow", true, false, 0xdabf6f),
        BlockDefinition::new(TERRACOTTA_TILE, "terracotta_tile", true, false, 0xaa633f),
        BlockDefinition::new(WOOD_DARK, "wood_dark", true, false, 0x4f3629),
        BlockDefinition::new(IRON_GRATE, "iron_grate", true, true, 0x707478),
        BlockDefinition::new(WATER, "water", false, true, 0x3e7ba1),
        BlockDefinition::new(SAND, "sand", true, false, 0xc3b278),
        BlockDefinition::new(PALM_TRUNK, "palm_trunk", true, false, 0x74553a),
        BlockDefinition::new(PALM_LEAVES, "palm_leaves", false, true, 0x4b8f52),
    ]
}

/// An immutable lookup table from block id to `BlockDefinition`.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::voxels::block::{BlockRegistry, AIR};
///
/// let registry = BlockRegistry::default();
/// assert!(registry.is_solid(2));
/// assert_eq!(registry.get(250).id, AIR);
/// ```
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    by_id: Vec<Option<BlockDefinition>>,
    air: BlockDefinition,
}

impl BlockRegistry {
    /// Builds a registry from an ordered list of definitions.
    ///
    /// When two definitions share an id the later one wins. If the list has no
    /// air definition a default one is used as the fallback.
    pub fn new(definitions: impl IntoIterator<Item = BlockDefinition>) -> Self {
        let mut by_id: Vec<Option<BlockDefinition>> = vec![None; BlockId::MAX as usize + 1];

        for definition in definitions {
            let slot = definition.id as usize;
            by_id[slot] = Some(definition);
        }

        let air = by_id[AIR as usize]
            .clone()
            .unwrap_or_else(BlockDefinition::air);

        BlockRegistry { by_id, air }
    }

    /// Returns the definition for `id`, or the air definition if `id` is unknown.
    pub fn get(&self, id: BlockId) -> &BlockDefinition {
        self.by_id[id as usize].as_ref().unwrap_or(&self.air)
    }

    /// Returns `true` if `id` has a definition of its own.
    pub fn contains(&self, id: BlockId) -> bool {
        self.by_id[id as usize].is_some()
    }

    pub fn is_solid(&self, id: BlockId) -> bool {
        self.get(id).solid
    }

    pub fn is_transparent(&self, id: BlockId) -> bool {
        self.get(id).transparent
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        BlockRegistry::new(default_block_definitions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_fall_back_to_air() {
        let registry = BlockRegistry::default();
        let unknown = registry.get(99);
        assert_eq!(unknown.id, AIR);
        assert!(!registry.is_solid(99));
        assert!(registry.is_transparent(99));
        assert!(!registry.contains(99));
    }

    #[test]
    fn default_table_matches_block_types() {
        let registry = BlockRegistry::default();
        for definition in default_block_definitions() {
            let block_type = BlockType::from_id(definition.id).unwrap();
            assert_eq!(registry.get(block_type.id()).name, definition.name);
        }
        assert!(registry.is_solid(BlockType::IRON_GRATE.id()));
        assert!(registry.is_transparent(BlockType::IRON_GRATE.id()));
        assert!(!registry.is_solid(BlockType::WATER.id()));
    }

    #[test]
    fn later_definition_wins() {
        let registry = BlockRegistry::new(vec![
            BlockDefinition::new(BlockType::SAND, "first", true, false, 0),
            BlockDefinition::new(BlockType::SAND, "second", false, true, 0xffffff),
        ]);
        assert_eq!(registry.get(BlockType::SAND.id()).name, "second");
        assert_eq!(registry.get(BlockType::SAND.id()).base_color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn registry_without_air_still_resolves_air() {
        let registry = BlockRegistry::new(vec![BlockDefinition::new(
            BlockType::BRICK,
            "brick",
            true,
            false,
            0x836756,
        )]);
        assert_eq!(registry.get(AIR).name, "air");
        assert_eq!(registry.get(42).name, "air");
    }

    #[test]
    fn colors_unpack_per_channel() {
        assert_eq!(color_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(color_to_rgb(0x0000ff), [0.0, 0.0, 1.0]);
    }
}
