//! # Terrain Generation
//!
//! Deterministic procedural terrain for an island city: an elliptical island
//! mask raised around the origin, hash noise for surface variation, a raised
//! urban core and a periodic street grid.
//!
//! Generation is a pure function of (chunk position, seed, override map). It
//! reads no mutable state, so regenerating a chunk always yields the same grid.

use cgmath::Point2;

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{Chunk, ChunkPosition, CHUNK_HEIGHT, CHUNK_SIZE},
    landmarks::StructureOverrides,
};

/// Water fills every empty cell at or below this height.
pub const SEA_LEVEL: i32 = 10;

/// Reported for every coordinate below the world floor.
pub const FLOOR_BLOCK: BlockType = BlockType::BRICK;

/// Lowest and highest surface height the height field may produce.
const MIN_SURFACE_Y: i32 = 3;
const MAX_SURFACE_Y: i32 = CHUNK_HEIGHT - 3;

/// Semi-axes of the island falloff ellipse and how far it raises the land.
const ISLAND_RADIUS_X: f64 = 132.0;
const ISLAND_RADIUS_Z: f64 = 116.0;
const ISLAND_AMPLITUDE: f64 = 16.0;

/// Semi-axes of the urban-density falloff and how far the core is raised.
const CITY_RADIUS_X: f64 = 94.0;
const CITY_RADIUS_Z: f64 = 90.0;
const CITY_BOOST: f64 = 2.8;
/// City mask value above which the surface is paved.
const PAVED_CITY_DENSITY: f64 = 0.6;

/// Streets only exist inside this square around the origin.
const ROAD_EXTENT: f64 = 84.0;

/// Island radius beyond which the map shows open water.
const MAP_WATER_RADIUS: f64 = 0.9;

/// How the overhead map classifies a world column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    Water,
    Road,
    Land,
}

/// The seeded height field and chunk filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainGenerator {
    seed: i32,
}

impl TerrainGenerator {
    pub fn new(seed: i32) -> Self {
        TerrainGenerator { seed }
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Hash noise in `[0, 1)`. Reproducible for identical (seed, x, z) but not
    /// spatially smooth: neighbouring inputs give unrelated outputs.
    pub fn noise_2d(&self, x: f64, z: f64) -> f64 {
        let value = (x * 127.1 + z * 311.7 + self.seed as f64 * 0.013).sin() * 43758.5453123;
        value - value.floor()
    }

    /// Normalized distance from the origin on an ellipse with the given semi-axes.
    fn elliptical_radius(x: f64, z: f64, radius_x: f64, radius_z: f64) -> f64 {
        ((x * x) / (radius_x * radius_x) + (z * z) / (radius_z * radius_z)).sqrt()
    }

    /// Urban density: 1 at the origin, falling linearly to 0 at the city edge.
    pub fn city_mask(&self, x: f64, z: f64) -> f64 {
        (1.0 - Self::elliptical_radius(x, z, CITY_RADIUS_X, CITY_RADIUS_Z)).max(0.0)
    }

    /// Whether a point lies on the street grid: 3-wide roads every 18 blocks.
    /// Fractional coordinates are tested as they are, not floored.
    pub fn is_road(&self, x: f64, z: f64) -> bool {
        if x.abs() > ROAD_EXTENT || z.abs() > ROAD_EXTENT {
            return false;
        }
        let road_x = ((x - 2.0).rem_euclid(18.0) - 9.0).abs() <= 1.0;
        let road_z = ((z + 5.0).rem_euclid(18.0) - 9.0).abs() <= 1.0;
        road_x || road_z
    }

    /// The surface height of a world column.
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        let (x, z) = (x as f64, z as f64);

        let island_mask =
            (1.0 - Self::elliptical_radius(x, z, ISLAND_RADIUS_X, ISLAND_RADIUS_Z)).max(0.0);
        let macro_noise = self.noise_2d(x * 0.045, z * 0.045);
        let detail_noise = self.noise_2d(x * 0.12 + 33.0, z * 0.12 - 21.0);
        let city_boost = self.city_mask(x, z) * CITY_BOOST;

        let raw_height = (SEA_LEVEL - 2) as f64
            + island_mask * ISLAND_AMPLITUDE
            + macro_noise * 4.0
            + detail_noise * 2.0
            + city_boost;

        (raw_height.floor() as i32).clamp(MIN_SURFACE_Y, MAX_SURFACE_Y)
    }

    /// The block placed at the top of a column whose surface is `top_y`.
    ///
    /// Low-lying columns are beach. Higher ground is paved on streets and in
    /// the dense city core, and sand elsewhere.
    pub fn surface_block(&self, x: i32, z: i32, top_y: i32) -> BlockType {
        if top_y <= SEA_LEVEL + 1 {
            return BlockType::SAND;
        }

        let (fx, fz) = (x as f64, z as f64);
        if self.is_road(fx, fz) || self.city_mask(fx, fz) > PAVED_CITY_DENSITY {
            BlockType::COBBLESTONE
        } else {
            BlockType::SAND
        }
    }

    /// Classifies a column for the overhead map.
    pub fn map_tile_at(&self, x: f64, z: f64) -> MapTile {
        if Self::elliptical_radius(x, z, ISLAND_RADIUS_X, ISLAND_RADIUS_Z) > MAP_WATER_RADIUS {
            MapTile::Water
        } else if self.is_road(x, z) {
            MapTile::Road
        } else {
            MapTile::Land
        }
    }

    /// Fills a fresh chunk with terrain, then applies every override that falls
    /// inside it. Overrides replace generated blocks unconditionally, air
    /// included.
    pub fn generate_chunk(&self, position: ChunkPosition, overrides: &StructureOverrides) -> Chunk {
        let mut chunk = Chunk::new(position);
        let base = Point2::new(position.x * CHUNK_SIZE, position.y * CHUNK_SIZE);

        for local_x in 0..CHUNK_SIZE {
            for local_z in 0..CHUNK_SIZE {
                let world_x = base.x + local_x;
                let world_z = base.y + local_z;
                let top_y = self.terrain_height(world_x, world_z);
                let surface = self.surface_block(world_x, world_z, top_y);

                for y in 0..CHUNK_HEIGHT {
                    let block = if y == top_y {
                        surface
                    } else if y < top_y {
                        BlockType::BRICK
                    } else if y <= SEA_LEVEL {
                        BlockType::WATER
                    } else {
                        continue;
                    };
                    chunk.set(local_x, y, local_z, block.id());
                }
            }
        }

        for (local, id) in overrides.in_chunk(position) {
            chunk.set_at(*local, *id);
        }

        chunk.finish_generation();
        chunk
    }
}
