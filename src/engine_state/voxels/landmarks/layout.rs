//! The authored old-city layout: plaza, street grid, promenade, gate,
//! fortresses, cathedral, colonial housing rows and the city wall.
//!
//! The authoring order below is significant. Later stamps overwrite earlier
//! ones where they overlap.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{stamp::StructureStamper, Landmark, LandmarkLayout};

/// Height of the plaza and street surface every structure is built on.
const GROUND_Y: i32 = 12;

/// Half-width of the square the authored street grid covers.
const STREET_GRID_EXTENT: i32 = 80;

fn p(x: i32, y: i32, z: i32) -> Point3<i32> {
    Point3::new(x, y, z)
}

/// Street grid shared with terrain generation: 3-wide roads every 18 blocks.
pub(crate) fn on_street_grid(x: i32, z: i32) -> bool {
    let road_x = ((x - 2).rem_euclid(18) - 9).abs() <= 1;
    let road_z = ((z + 5).rem_euclid(18) - 9).abs() <= 1;
    road_x || road_z
}

/// Builds the override map and landmark list. Pure and deterministic.
pub fn build_landmark_layout() -> LandmarkLayout {
    let mut stamper = StructureStamper::new();
    let mut landmarks = Vec::new();

    // Central plaza
    stamper.fill_box(p(-16, GROUND_Y, -16), p(16, GROUND_Y, 16), BlockType::COBBLESTONE);

    // Street grid
    for x in -STREET_GRID_EXTENT..=STREET_GRID_EXTENT {
        for z in -STREET_GRID_EXTENT..=STREET_GRID_EXTENT {
            if on_street_grid(x, z) {
                stamper.set_block(x, GROUND_Y, z, BlockType::COBBLESTONE);
            }
        }
    }

    build_paseo(&mut stamper, &mut landmarks);
    build_city_gate(&mut stamper, &mut landmarks);
    build_el_morro(&mut stamper, &mut landmarks);
    build_cathedral(&mut stamper, &mut landmarks);
    build_la_fortaleza(&mut stamper, &mut landmarks);
    build_housing_rows(&mut stamper);

    // City wall with a lookout walk on top
    stamper.fill_box(p(-38, GROUND_Y, -34), p(-36, 20, 40), BlockType::BRICK);
    stamper.fill_box(p(-38, 21, -34), p(-36, 22, 40), BlockType::BRICK);

    LandmarkLayout {
        overrides: stamper.finish(),
        landmarks,
    }
}

fn build_paseo(stamper: &mut StructureStamper, landmarks: &mut Vec<Landmark>) {
    for x in -24..=62 {
        for z in -43..=-38 {
            stamper.set_block(x, GROUND_Y, z, BlockType::COBBLESTONE);
        }
        stamper.set_block(x, GROUND_Y + 1, -43, BlockType::BRICK);
        stamper.set_block(x, GROUND_Y + 1, -38, BlockType::BRICK);
    }
    for x in (-20..=58).step_by(16) {
        stamper.place_palm(p(x, GROUND_Y + 1, -36));
    }

    landmarks.push(Landmark::new(
        "paseo-princesa",
        "Paseo de la Princesa",
        "Historic waterfront promenade along San Juan Bay.",
        Point3::new(20.0, 14.0, -41.0),
        24.0,
    ));
}

fn build_city_gate(stamper: &mut StructureStamper, landmarks: &mut Vec<Landmark>) {
    stamper.fill_box(p(-2, GROUND_Y, -36), p(6, 20, -34), BlockType::BRICK);
    stamper.carve_box(p(1, GROUND_Y, -36), p(3, 18, -34));
    stamper.fill_box(p(-1, 21, -36), p(5, 22, -34), BlockType::BRICK);

    landmarks.push(Landmark::new(
        "puerta-san-juan",
        "Puerta de San Juan",
        "Original city gate that connected the old city to the harbor.",
        Point3::new(2.0, 16.0, -35.0),
        16.0,
    ));
}

fn build_el_morro(stamper: &mut StructureStamper, landmarks: &mut Vec<Landmark>) {
    let Point3 { x, y, z } = p(-78, GROUND_Y, -30);

    // Base mass with an open courtyard
    stamper.fill_box(p(x, y, z), p(x + 36, y + 5, z + 30), BlockType::BRICK);
    stamper.carve_box(p(x + 8, y + 1, z + 7), p(x + 28, y + 5, z + 23));

    // Curtain walls
    stamper.fill_box(p(x, y + 6, z), p(x + 36, y + 14, z + 1), BlockType::BRICK);
    stamper.fill_box(p(x, y + 6, z + 29), p(x + 36, y + 14, z + 30), BlockType::BRICK);
    stamper.fill_box(p(x, y + 6, z), p(x + 1, y + 14, z + 30), BlockType::BRICK);
    stamper.fill_box(p(x + 35, y + 6, z), p(x + 36, y + 14, z + 30), BlockType::BRICK);

    // Corner bastions
    stamper.fill_box(p(x - 4, y + 4, z - 4), p(x + 2, y + 12, z + 2), BlockType::BRICK);
    stamper.fill_box(p(x + 34, y + 4, z - 4), p(x + 40, y + 12, z + 2), BlockType::BRICK);

    // Lighthouse tower and roof
    stamper.fill_box(p(x + 14, y + 6, z + 12), p(x + 21, y + 20, z + 19), BlockType::STUCCO_WHITE);
    stamper.fill_box(
        p(x + 13, y + 21, z + 11),
        p(x + 22, y + 22, z + 20),
        BlockType::TERRACOTTA_TILE,
    );

    landmarks.push(Landmark::new(
        "el-morro",
        "Castillo San Felipe del Morro",
        "16th-century fortress guarding the entrance to San Juan Bay.",
        Point3::new((x + 18) as f32, (y + 12) as f32, (z + 15) as f32),
        26.0,
    ));
}

fn build_cathedral(stamper: &mut StructureStamper, landmarks: &mut Vec<Landmark>) {
    let Point3 { x, y, z } = p(20, GROUND_Y, 20);

    stamper.fill_box(p(x, y, z), p(x + 20, y + 1, z + 28), BlockType::COBBLESTONE);
    stamper.hollow_box(p(x + 1, y + 2, z + 1), p(x + 19, y + 16, z + 27), BlockType::STUCCO_WHITE);
    stamper.carve_box(p(x + 2, y + 3, z + 2), p(x + 18, y + 15, z + 26));
    stamper.fill_box(p(x + 8, y + 17, z), p(x + 12, y + 19, z + 28), BlockType::TERRACOTTA_TILE);

    // Bell towers
    stamper.fill_box(p(x + 2, y + 2, z), p(x + 4, y + 20, z + 4), BlockType::STUCCO_YELLOW);
    stamper.fill_box(p(x + 16, y + 2, z), p(x + 18, y + 20, z + 4), BlockType::STUCCO_YELLOW);

    // Entrance
    stamper.carve_box(p(x + 9, y + 2, z), p(x + 11, y + 5, z));
    for door_x in x + 9..=x + 11 {
        stamper.set_block(door_x, y + 2, z, BlockType::WOOD_DARK);
    }

    landmarks.push(Landmark::new(
        "san-juan-cathedral",
        "San Juan Cathedral",
        "One of the oldest cathedrals in the Americas.",
        Point3::new((x + 10) as f32, (y + 10) as f32, (z + 14) as f32),
        22.0,
    ));
}

fn build_la_fortaleza(stamper: &mut StructureStamper, landmarks: &mut Vec<Landmark>) {
    let Point3 { x, y, z } = p(38, GROUND_Y, -12);

    stamper.fill_box(p(x, y, z), p(x + 28, y + 1, z + 20), BlockType::COBBLESTONE);
    stamper.hollow_box(p(x + 1, y + 2, z + 1), p(x + 27, y + 12, z + 19), BlockType::STUCCO_BLUE);
    stamper.carve_box(p(x + 3, y + 3, z + 3), p(x + 25, y + 11, z + 17));
    stamper.fill_box(p(x + 8, y + 13, z + 4), p(x + 20, y + 14, z + 16), BlockType::TERRACOTTA_TILE);
    stamper.fill_box(p(x + 12, y + 3, z), p(x + 16, y + 6, z), BlockType::WOOD_DARK);

    landmarks.push(Landmark::new(
        "la-fortaleza",
        "La Fortaleza",
        "Historic governor residence and UNESCO World Heritage Site.",
        Point3::new((x + 14) as f32, (y + 8) as f32, (z + 10) as f32),
        20.0,
    ));
}

/// A row of identical houses starting at (`x`, `z`), `step` blocks apart along X.
struct HouseRow {
    x: i32,
    z: i32,
    count: i32,
    step: i32,
}

const HOUSE_ROWS: [HouseRow; 4] = [
    HouseRow { x: -20, z: 22, count: 5, step: 11 },
    HouseRow { x: -18, z: 34, count: 4, step: 12 },
    HouseRow { x: -48, z: -6, count: 6, step: 10 },
    HouseRow { x: 16, z: -26, count: 4, step: 12 },
];

const HOUSE_PALETTE: [BlockType; 4] = [
    BlockType::STUCCO_BLUE,
    BlockType::STUCCO_PINK,
    BlockType::STUCCO_YELLOW,
    BlockType::STUCCO_WHITE,
];

fn build_housing_rows(stamper: &mut StructureStamper) {
    // The palette cycles across rows, not per row.
    let mut walls = HOUSE_PALETTE.iter().cycle();
    for row in &HOUSE_ROWS {
        for i in 0..row.count {
            if let Some(wall) = walls.next() {
                stamper.place_house(p(row.x + i * row.step, GROUND_Y, row.z), 8, 9, *wall);
            }
        }
    }
}
