/// Integration tests for chunk meshing: face culling inside a chunk and across
/// chunk seams, and the opaque/transparent split.
use std::rc::Rc;

use cgmath::{Point2, Point3};
use voxel_world::{
    config::WorldConfig,
    engine_state::{
        rendering::{build_chunk_mesh, ChunkMesh, MeshBuffers, Vertex},
        voxels::{
            block::{block_type::BlockType, BlockDefinition, BlockId, BlockRegistry, AIR},
            chunk::{coordinates::chunk_origin, Chunk},
            landmarks::{LandmarkLayout, StructureOverrides},
            world::WorldManager,
        },
    },
};

const STONE: BlockId = 1;

fn stone_registry() -> BlockRegistry {
    BlockRegistry::new(vec![
        BlockDefinition {
            id: AIR,
            name: "air".to_string(),
            solid: false,
            transparent: true,
            base_color: [0.0; 3],
        },
        BlockDefinition {
            id: STONE,
            name: "stone".to_string(),
            solid: true,
            transparent: false,
            base_color: [0.5, 0.5, 0.5],
        },
    ])
}

/// Meshes a chunk in isolation: everything outside it is air.
fn mesh_alone(chunk: &Chunk, registry: &BlockRegistry) -> ChunkMesh {
    let origin = chunk_origin(chunk.position());
    build_chunk_mesh(chunk, registry, |world| {
        chunk.get(world.x - origin.x, world.y, world.z - origin.z)
    })
}

/// Recovers the chunk-local voxel a quad belongs to from its vertices.
fn quad_voxels(buffers: &MeshBuffers) -> Vec<(Point3<i32>, [f32; 3])> {
    buffers
        .vertices
        .chunks(4)
        .map(|quad: &[Vertex]| {
            let normal = quad[0].normal;
            let min = quad.iter().fold([f32::MAX; 3], |min, vertex| {
                [
                    min[0].min(vertex.position[0]),
                    min[1].min(vertex.position[1]),
                    min[2].min(vertex.position[2]),
                ]
            });
            let voxel = Point3::new(
                (min[0] - normal[0].max(0.0)) as i32,
                (min[1] - normal[1].max(0.0)) as i32,
                (min[2] - normal[2].max(0.0)) as i32,
            );
            (voxel, normal)
        })
        .collect()
}

#[test]
fn single_stone_voxel_emits_six_quads() {
    let registry = stone_registry();
    let mut chunk = Chunk::new(Point2::new(0, 0));
    chunk.set(0, 0, 0, STONE);

    let mesh = mesh_alone(&chunk, &registry);

    assert_eq!(mesh.opaque.vertices.len(), 24);
    assert_eq!(mesh.opaque.indices.len(), 36);
    assert!(mesh.transparent.is_empty());
    assert!(mesh.opaque.indices.iter().all(|index| *index < 24));
}

#[test]
fn adjacent_opaque_voxels_hide_their_shared_face() {
    let registry = BlockRegistry::default();
    let mut chunk = Chunk::new(Point2::new(0, 0));
    chunk.set(4, 20, 4, BlockType::BRICK.id());
    chunk.set(5, 20, 4, BlockType::COBBLESTONE.id());

    let mesh = mesh_alone(&chunk, &registry);

    assert_eq!(mesh.opaque.quad_count(), 10);
    let quads = quad_voxels(&mesh.opaque);
    assert!(!quads.contains(&(Point3::new(4, 20, 4), [1.0, 0.0, 0.0])));
    assert!(!quads.contains(&(Point3::new(5, 20, 4), [-1.0, 0.0, 0.0])));
    // Facing air: exactly one quad.
    let west_faces = quads
        .iter()
        .filter(|quad| **quad == (Point3::new(4, 20, 4), [-1.0, 0.0, 0.0]))
        .count();
    assert_eq!(west_faces, 1);
}

#[test]
fn same_transparent_block_hides_shared_face() {
    let registry = BlockRegistry::default();
    let mut chunk = Chunk::new(Point2::new(0, 0));
    chunk.set(4, 20, 4, BlockType::WATER.id());
    chunk.set(4, 20, 5, BlockType::WATER.id());

    let mesh = mesh_alone(&chunk, &registry);

    assert!(mesh.opaque.is_empty());
    assert_eq!(mesh.transparent.quad_count(), 10);
}

#[test]
fn different_transparent_blocks_both_draw_the_shared_face() {
    let registry = BlockRegistry::default();
    let mut chunk = Chunk::new(Point2::new(0, 0));
    chunk.set(4, 20, 4, BlockType::WATER.id());
    chunk.set(4, 21, 4, BlockType::PALM_LEAVES.id());

    let mesh = mesh_alone(&chunk, &registry);

    assert_eq!(mesh.transparent.quad_count(), 12);
    let quads = quad_voxels(&mesh.transparent);
    assert!(quads.contains(&(Point3::new(4, 20, 4), [0.0, 1.0, 0.0])));
    assert!(quads.contains(&(Point3::new(4, 21, 4), [0.0, -1.0, 0.0])));
}

#[test]
fn opaque_voxel_behind_glass_still_draws() {
    let registry = BlockRegistry::default();
    let mut chunk = Chunk::new(Point2::new(0, 0));
    chunk.set(4, 20, 4, BlockType::BRICK.id());
    chunk.set(4, 20, 5, BlockType::IRON_GRATE.id());

    let mesh = mesh_alone(&chunk, &registry);

    assert_eq!(mesh.opaque.quad_count(), 6);
    // The grate's face toward the brick is hidden by an opaque neighbour.
    assert_eq!(mesh.transparent.quad_count(), 5);
}

#[test]
fn faces_are_culled_across_chunk_seams() {
    let layout = std::sync::Arc::new(LandmarkLayout {
        overrides: StructureOverrides::default(),
        landmarks: Vec::new(),
    });
    let registry = Rc::new(BlockRegistry::default());
    let mut world = WorldManager::with_layout(registry.clone(), WorldConfig::default(), layout);

    // Two bricks facing each other across the seam between chunks (0, 0) and (1, 0).
    world.set_block_at(15, 50, 3, BlockType::BRICK.id());
    world.set_block_at(16, 50, 3, BlockType::BRICK.id());

    let chunk = world.chunk(Point2::new(0, 0)).unwrap();
    let mesh = {
        let chunk = chunk.get();
        build_chunk_mesh(&chunk, &registry, |point| {
            world.get_block_at(point.x, point.y, point.z)
        })
    };

    let brick_faces: Vec<[f32; 3]> = quad_voxels(&mesh.opaque)
        .into_iter()
        .filter(|(voxel, _)| *voxel == Point3::new(15, 50, 3))
        .map(|(_, normal)| normal)
        .collect();
    assert_eq!(brick_faces.len(), 5);
    assert!(!brick_faces.contains(&[1.0, 0.0, 0.0]));
}

#[test]
fn generated_chunks_keep_opaque_and_transparent_apart() {
    let registry = Rc::new(BlockRegistry::default());
    let mut world = WorldManager::new(registry.clone(), WorldConfig::default());

    // The promenade: palms, water, paving and brick railings.
    for position in [Point2::new(0, -3), Point2::new(-1, -3), Point2::new(8, 0)] {
        let chunk = world.ensure_chunk(position);
        let mesh = {
            let chunk = chunk.get();
            build_chunk_mesh(&chunk, &registry, |point| {
                world.get_block_at(point.x, point.y, point.z)
            })
        };
        assert!(!mesh.is_empty());

        let chunk = chunk.get();
        for (voxel, _) in quad_voxels(&mesh.opaque) {
            let id = chunk.get_at(voxel);
            assert_ne!(id, AIR);
            assert!(!registry.is_transparent(id), "{:?} in opaque buffer", voxel);
        }
        for (voxel, _) in quad_voxels(&mesh.transparent) {
            let id = chunk.get_at(voxel);
            assert_ne!(id, AIR);
            assert!(registry.is_transparent(id), "{:?} in transparent buffer", voxel);
        }
    }
}

#[test]
fn faces_are_shaded_per_direction() {
    let registry = stone_registry();
    let mut chunk = Chunk::new(Point2::new(0, 0));
    chunk.set(2, 2, 2, STONE);

    let mesh = mesh_alone(&chunk, &registry);

    let shades: [([f32; 3], f32); 6] = [
        ([1.0, 0.0, 0.0], 0.82),
        ([-1.0, 0.0, 0.0], 0.7),
        ([0.0, 1.0, 0.0], 1.0),
        ([0.0, -1.0, 0.0], 0.58),
        ([0.0, 0.0, 1.0], 0.9),
        ([0.0, 0.0, -1.0], 0.75),
    ];
    assert_eq!(mesh.opaque.vertices.len(), 24);
    for vertex in &mesh.opaque.vertices {
        let (_, shade) = shades
            .iter()
            .find(|(normal, _)| *normal == vertex.normal)
            .unwrap();
        assert!((vertex.color[0] - 0.5 * shade).abs() < 1e-6);
    }
}
