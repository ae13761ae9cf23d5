//! # Block Side Module
//!
//! This module defines the six faces of a voxel block together with the
//! geometry and fixed shading each face is drawn with.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants fix the order faces are visited in when a chunk is meshed:
/// [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

/// Unit-cube corners for each side, wound so the quad faces outward.
const SIDE_CORNERS: [[[f32; 3]; 4]; 6] = [
    [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
    [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
];

/// Brightness multiplier per side. Stands in for real lighting: the top is
/// brightest, the bottom darkest.
const SIDE_SHADES: [f32; 6] = [0.82, 0.7, 1.0, 0.58, 0.9, 0.75];

impl BlockSide {
    /// Returns an array containing all six block faces in meshing order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Returns the integer offset to the voxel this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// Returns the outward unit normal of this face.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// Returns the four unit-cube corners of this face.
    pub fn corners(self) -> &'static [[f32; 3]; 4] {
        &SIDE_CORNERS[self as usize]
    }

    /// Returns the fixed brightness multiplier applied to this face's color.
    pub fn shade(self) -> f32 {
        SIDE_SHADES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_is_brightest_and_bottom_darkest() {
        for side in BlockSide::all() {
            assert!(side.shade() <= BlockSide::TOP.shade());
            assert!(side.shade() >= BlockSide::BOTTOM.shade());
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let normal = side.normal();
            let axis = normal.iter().position(|c| *c != 0.0).unwrap();
            let plane = if normal[axis] > 0.0 { 1.0 } else { 0.0 };
            for corner in side.corners() {
                assert_eq!(corner[axis], plane, "{:?}", side);
            }
        }
    }
}
