//! # Structure Stamping
//!
//! Primitive operations for authoring structures as sparse block overrides.
//! Every call is unconditional: a later stamp overwrites whatever an earlier
//! stamp wrote at the same coordinate. Air is a real override value, which is
//! how doorways and corridors get carved out of solid masses and terrain.

use std::collections::HashMap;

use cgmath::Point3;

use crate::engine_state::voxels::{
    block::{block_type::BlockType, BlockId, AIR},
    chunk::{coordinates::world_to_local, ChunkPosition, CHUNK_HEIGHT},
};

/// Accumulates overrides while a layout is being authored.
#[derive(Debug, Default)]
pub struct StructureStamper {
    blocks: HashMap<Point3<i32>, BlockId>,
}

/// Normalizes two corners into inclusive (min, max) bounds.
fn ordered_bounds(a: Point3<i32>, b: Point3<i32>) -> (Point3<i32>, Point3<i32>) {
    (
        Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
        Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
    )
}

impl StructureStamper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single override. Coordinates outside the world's vertical
    /// range are dropped.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: impl Into<BlockId>) {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return;
        }
        self.blocks.insert(Point3::new(x, y, z), id.into());
    }

    /// Sets every voxel in the inclusive box spanned by `a` and `b`.
    pub fn fill_box(&mut self, a: Point3<i32>, b: Point3<i32>, id: impl Into<BlockId>) {
        let id = id.into();
        let (min, max) = ordered_bounds(a, b);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_block(x, y, z, id);
                }
            }
        }
    }

    /// Sets the shell of the box to `id` and its interior to air.
    pub fn hollow_box(&mut self, a: Point3<i32>, b: Point3<i32>, id: impl Into<BlockId>) {
        let id = id.into();
        let (min, max) = ordered_bounds(a, b);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let is_shell = x == min.x
                        || x == max.x
                        || y == min.y
                        || y == max.y
                        || z == min.z
                        || z == max.z;
                    self.set_block(x, y, z, if is_shell { id } else { AIR });
                }
            }
        }
    }

    /// Sets every voxel in the box to air.
    pub fn carve_box(&mut self, a: Point3<i32>, b: Point3<i32>) {
        self.fill_box(a, b, AIR);
    }

    /// A five-block trunk topped by a diamond canopy (Manhattan radius 3,
    /// clipped to a 5x5 square) and a single crown block.
    pub fn place_palm(&mut self, base: Point3<i32>) {
        for y in base.y..base.y + 5 {
            self.set_block(base.x, y, base.z, BlockType::PALM_TRUNK);
        }

        for dx in -2..=2i32 {
            for dz in -2..=2i32 {
                if dx.abs() + dz.abs() <= 3 {
                    self.set_block(base.x + dx, base.y + 5, base.z + dz, BlockType::PALM_LEAVES);
                }
            }
        }

        self.set_block(base.x, base.y + 6, base.z, BlockType::PALM_LEAVES);
    }

    /// A cobblestone floor, hollow walls, a door on the -Z wall, two grated
    /// windows and a stepped terracotta roof overhanging front and back.
    pub fn place_house(&mut self, origin: Point3<i32>, width: i32, depth: i32, wall: BlockType) {
        let Point3 { x, y, z } = origin;

        self.fill_box(
            Point3::new(x, y, z),
            Point3::new(x + width - 1, y, z + depth - 1),
            BlockType::COBBLESTONE,
        );
        self.hollow_box(
            Point3::new(x, y + 1, z),
            Point3::new(x + width - 1, y + 6, z + depth - 1),
            wall,
        );

        let door_x = x + width / 2;
        self.carve_box(Point3::new(door_x, y + 1, z), Point3::new(door_x, y + 3, z));
        self.set_block(door_x, y + 1, z, BlockType::WOOD_DARK);
        self.set_block(door_x, y + 2, z, BlockType::WOOD_DARK);

        for roof_offset in 0..(width + 1) / 2 {
            let roof_y = y + 7 + roof_offset;
            self.fill_box(
                Point3::new(x + roof_offset, roof_y, z - 1),
                Point3::new(x + width - 1 - roof_offset, roof_y, z + depth),
                BlockType::TERRACOTTA_TILE,
            );
        }

        self.set_block(x + 1, y + 3, z, BlockType::IRON_GRATE);
        self.set_block(x + width - 2, y + 3, z, BlockType::IRON_GRATE);
    }

    /// Freezes the authored blocks into a lookup structure.
    pub fn finish(self) -> StructureOverrides {
        StructureOverrides::new(self.blocks)
    }
}

/// The frozen override map, indexed by owning chunk so generation only visits
/// the overrides that fall inside the chunk being built.
#[derive(Debug, Default)]
pub struct StructureOverrides {
    blocks: HashMap<Point3<i32>, BlockId>,
    by_chunk: HashMap<ChunkPosition, Vec<(Point3<i32>, BlockId)>>,
}

impl StructureOverrides {
    pub fn new(blocks: HashMap<Point3<i32>, BlockId>) -> Self {
        let mut by_chunk: HashMap<ChunkPosition, Vec<(Point3<i32>, BlockId)>> = HashMap::new();
        for (world, id) in &blocks {
            let (chunk, local) = world_to_local(*world);
            by_chunk.entry(chunk).or_default().push((local, *id));
        }
        for entries in by_chunk.values_mut() {
            entries.sort_by_key(|(local, _)| (local.y, local.z, local.x));
        }

        StructureOverrides { blocks, by_chunk }
    }

    /// The override at a world coordinate, if one was authored.
    pub fn get(&self, world: Point3<i32>) -> Option<BlockId> {
        self.blocks.get(&world).copied()
    }

    /// The overrides owned by `chunk`, as (local coordinate, id) pairs.
    pub fn in_chunk(&self, chunk: ChunkPosition) -> &[(Point3<i32>, BlockId)] {
        self.by_chunk.get(&chunk).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over every (world coordinate, id) pair.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<i32>, BlockId)> + '_ {
        self.blocks.iter().map(|(world, id)| (*world, *id))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
