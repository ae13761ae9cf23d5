use cgmath::Point3;

use crate::engine_state::{rendering::Vertex, voxels::block::block_side::BlockSide};

/// Represents a single visible quad face of a voxel.
///
/// A face covers exactly one voxel side; faces are never merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Chunk-local coordinate of the voxel the face belongs to
    pub position: Point3<i32>,
    /// Which side of the voxel this face covers
    pub side: BlockSide,
    /// Unshaded base color of the voxel's block
    pub base_color: [f32; 3],
}

impl Face {
    /// Creates a face for the voxel at `position`.
    pub fn new(position: Point3<i32>, side: BlockSide, base_color: [f32; 3]) -> Self {
        Face {
            position,
            side,
            base_color,
        }
    }

    /// The base color scaled by the side's fixed shade.
    pub fn shaded_color(&self) -> [f32; 3] {
        let shade = self.side.shade();
        [
            self.base_color[0] * shade,
            self.base_color[1] * shade,
            self.base_color[2] * shade,
        ]
    }

    /// Returns the four corner vertices, in winding order.
    pub fn vertices(&self) -> [Vertex; 4] {
        let normal = self.side.normal();
        let color = self.shaded_color();
        (*self.side.corners()).map(|corner| Vertex::new(self.position, corner, normal, color))
    }

    /// Returns the two triangles of the quad, offset by `first_vertex`.
    pub fn indices(first_vertex: u32) -> [u32; 6] {
        let o = first_vertex;
        [o, o + 1, o + 2, o, o + 2, o + 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_face_keeps_full_brightness() {
        let face = Face::new(Point3::new(0, 0, 0), BlockSide::TOP, [0.5, 0.25, 1.0]);
        assert_eq!(face.shaded_color(), [0.5, 0.25, 1.0]);
        assert!(face.vertices().iter().all(|v| v.position[1] == 1.0));
    }

    #[test]
    fn quad_indices_share_the_diagonal() {
        assert_eq!(Face::indices(8), [8, 9, 10, 8, 10, 11]);
    }
}
