//! GPU-side tunnel meshes.

use std::ops::Index;

use crate::data_structures::tunnel::Surface;

/// One tunnel surface uploaded as a non-indexed triangle strip.
#[derive(Debug)]
pub struct TunnelMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

/// The four tunnel surfaces, stored in draw order.
#[derive(Debug)]
pub struct TunnelMeshes {
    pub(crate) meshes: [TunnelMesh; 4],
}

impl Index<Surface> for TunnelMeshes {
    type Output = TunnelMesh;

    fn index(&self, surface: Surface) -> &TunnelMesh {
        &self.meshes[surface.index()]
    }
}
