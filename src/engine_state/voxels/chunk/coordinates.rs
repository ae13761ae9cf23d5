//! # Chunk Coordinates
//!
//! Conversions between world block coordinates and (chunk position, local
//! coordinate) pairs. Chunks span the full world height, so only X and Z are
//! decomposed; Y passes through unchanged.
//!
//! Decomposition uses floored division and a positive modulo so negative world
//! coordinates land in the chunk below zero rather than being truncated toward
//! it: world X `-1` is local X `15` of chunk X `-1`.

use cgmath::{Point2, Point3};

use super::CHUNK_SIZE;

/// Chunk coordinates on the horizontal grid (`x`, `y` hold chunk X and chunk Z).
pub type ChunkPosition = Point2<i32>;

/// Integer division rounding toward negative infinity.
pub fn floor_div(value: i32, divisor: i32) -> i32 {
    value.div_euclid(divisor)
}

/// Remainder that is always in `[0, divisor)` for a positive divisor.
pub fn positive_mod(value: i32, divisor: i32) -> i32 {
    value.rem_euclid(divisor)
}

/// Returns the chunk that owns world column (`x`, `z`).
pub fn chunk_position_of(x: i32, z: i32) -> ChunkPosition {
    Point2::new(floor_div(x, CHUNK_SIZE), floor_div(z, CHUNK_SIZE))
}

/// Splits a world block coordinate into its owning chunk and the local
/// coordinate inside that chunk.
pub fn world_to_local(world: Point3<i32>) -> (ChunkPosition, Point3<i32>) {
    (
        chunk_position_of(world.x, world.z),
        Point3::new(
            positive_mod(world.x, CHUNK_SIZE),
            world.y,
            positive_mod(world.z, CHUNK_SIZE),
        ),
    )
}

/// Inverse of [`world_to_local`].
pub fn local_to_world(chunk: ChunkPosition, local: Point3<i32>) -> Point3<i32> {
    Point3::new(
        chunk.x * CHUNK_SIZE + local.x,
        local.y,
        chunk.y * CHUNK_SIZE + local.z,
    )
}

/// World position of the chunk's (0, 0, 0) corner.
pub fn chunk_origin(chunk: ChunkPosition) -> Point3<i32> {
    local_to_world(chunk, Point3::new(0, 0, 0))
}

/// Returns the chunk containing a continuous world position.
pub fn chunk_position_of_point(point: Point3<f32>) -> ChunkPosition {
    chunk_position_of(point.x.floor() as i32, point.z.floor() as i32)
}

/// Returns `chunk` followed by its four axis-aligned horizontal neighbours.
///
/// These are the chunks whose faces can change when a voxel in `chunk` does.
pub fn chunk_and_neighbors(chunk: ChunkPosition) -> [ChunkPosition; 5] {
    [
        chunk,
        Point2::new(chunk.x + 1, chunk.y),
        Point2::new(chunk.x - 1, chunk.y),
        Point2::new(chunk.x, chunk.y + 1),
        Point2::new(chunk.x, chunk.y - 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coordinates_floor_instead_of_truncating() {
        assert_eq!(floor_div(-1, 16), -1);
        assert_eq!(floor_div(-16, 16), -1);
        assert_eq!(floor_div(-17, 16), -2);
        assert_eq!(positive_mod(-1, 16), 15);
        assert_eq!(positive_mod(-16, 16), 0);
    }

    #[test]
    fn decomposition_round_trips() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..2_000 {
            let world = Point3::new(
                rng.i32(-100_000..100_000),
                rng.i32(0..64),
                rng.i32(-100_000..100_000),
            );
            let (chunk, local) = world_to_local(world);
            assert!((0..CHUNK_SIZE).contains(&local.x));
            assert!((0..CHUNK_SIZE).contains(&local.z));
            assert_eq!(local_to_world(chunk, local), world);
        }
    }

    #[test]
    fn points_use_floored_cells() {
        assert_eq!(chunk_position_of_point(Point3::new(-0.5, 3.0, 15.9)), Point2::new(-1, 0));
        assert_eq!(chunk_position_of_point(Point3::new(16.0, 0.0, -16.0)), Point2::new(1, -1));
    }

    #[test]
    fn neighbors_are_horizontal_only() {
        let around = chunk_and_neighbors(Point2::new(3, -2));
        assert_eq!(around[0], Point2::new(3, -2));
        for neighbor in &around[1..] {
            let distance = (neighbor.x - 3).abs() + (neighbor.y + 2).abs();
            assert_eq!(distance, 1);
        }
    }
}
