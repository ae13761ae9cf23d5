//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format emitted by the mesher. It is plain old
//! data so finished buffers can be handed to a GPU backend as raw bytes.

use cgmath::Point3;

/// A vertex in the voxel rendering pipeline.
///
/// Positions are relative to the owning chunk's world origin; the render group
/// carries the translation.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Color: [f32; 3] (12 bytes)
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Chunk-local position
    pub position: [f32; 3],
    /// Outward unit normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// Shaded RGB color, each channel in `[0, 1]`
    pub color: [f32; 3],
}

impl Vertex {
    /// Creates a vertex at `base + corner`.
    ///
    /// # Arguments
    /// * `base` - The chunk-local coordinate of the voxel
    /// * `corner` - The unit-cube corner offset
    /// * `normal` - The face normal
    /// * `color` - The already shaded color
    pub fn new(base: Point3<i32>, corner: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Vertex {
            position: [
                base.x as f32 + corner[0],
                base.y as f32 + corner[1],
                base.z as f32 + corner[2],
            ],
            normal,
            color,
        }
    }

    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}
