//! Procedural tunnel geometry.
//!
//! The tunnel is a 20x20 box section repeated along the z axis. Every surface
//! is emitted as a single triangle strip of [`SEGMENTS`] segments, each segment
//! contributing four vertices: two on its anchor plane `z` and two on `z - 10`.
//! Texture coordinates use the bottom-left origin convention; the vertex shader
//! flips `v` because decoded image rows are stored top-down.

use crate::resources::TextureSlot;

/// Half the width/height of the tunnel cross-section.
pub const HALF_EXTENT: f32 = 10.0;
/// Depth of a single tunnel segment.
pub const SEGMENT_DEPTH: f32 = 10.0;
/// Anchor plane of the first segment; anchors step down to 0.
pub const FIRST_ANCHOR: f32 = 60.0;
pub const SEGMENTS: usize = 7;
pub const VERTICES_PER_SEGMENT: usize = 4;
pub const VERTICES_PER_SURFACE: usize = SEGMENTS * VERTICES_PER_SEGMENT;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            tex_coords,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// One of the four faces of the tunnel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Floor,
    Ceiling,
    LeftWall,
    RightWall,
}

impl Surface {
    /// All surfaces in draw order.
    pub const ALL: [Surface; 4] = [
        Surface::Floor,
        Surface::Ceiling,
        Surface::LeftWall,
        Surface::RightWall,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn texture_slot(self) -> TextureSlot {
        match self {
            Surface::Floor => TextureSlot::Floor,
            Surface::Ceiling => TextureSlot::Ceiling,
            Surface::LeftWall | Surface::RightWall => TextureSlot::Brick,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Surface::Floor => "floor",
            Surface::Ceiling => "ceiling",
            Surface::LeftWall => "left wall",
            Surface::RightWall => "right wall",
        }
    }

    /// Builds the triangle strip for this surface.
    pub fn strip(self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(VERTICES_PER_SURFACE);
        for z in segment_anchors() {
            vertices.extend_from_slice(&self.segment(z));
        }
        vertices
    }

    fn segment(self, z: f32) -> [Vertex; VERTICES_PER_SEGMENT] {
        let e = HALF_EXTENT;
        let far = z - SEGMENT_DEPTH;
        match self {
            Surface::Floor => [
                Vertex::new([-e, -e, z], [0.0, 0.0]),
                Vertex::new([e, -e, z], [1.0, 0.0]),
                Vertex::new([-e, -e, far], [0.0, 1.0]),
                Vertex::new([e, -e, far], [1.0, 1.0]),
            ],
            // Far edge first: reversed winding relative to the floor.
            Surface::Ceiling => [
                Vertex::new([-e, e, far], [0.0, 1.0]),
                Vertex::new([e, e, far], [1.0, 1.0]),
                Vertex::new([-e, e, z], [0.0, 0.0]),
                Vertex::new([e, e, z], [1.0, 0.0]),
            ],
            Surface::LeftWall => wall(-e, z, far),
            Surface::RightWall => wall(e, z, far),
        }
    }
}

fn wall(x: f32, z: f32, far: f32) -> [Vertex; VERTICES_PER_SEGMENT] {
    let e = HALF_EXTENT;
    [
        Vertex::new([x, -e, z], [0.0, 0.0]),
        Vertex::new([x, e, z], [0.0, 1.0]),
        Vertex::new([x, -e, far], [1.0, 0.0]),
        Vertex::new([x, e, far], [1.0, 1.0]),
    ]
}

/// Anchor planes of the tunnel segments, nearest to the far end first: 60, 50, ..., 0.
pub fn segment_anchors() -> impl Iterator<Item = f32> {
    (0..SEGMENTS).map(|i| FIRST_ANCHOR - i as f32 * SEGMENT_DEPTH)
}
