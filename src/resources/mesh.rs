use wgpu::util::DeviceExt;

use crate::data_structures::{
    mesh::{TunnelMesh, TunnelMeshes},
    tunnel::Surface,
};

/// Uploads the four tunnel strips. The geometry is fixed, so this cannot fail.
pub fn build_tunnel_meshes(device: &wgpu::Device) -> TunnelMeshes {
    let meshes = Surface::ALL.map(|surface| {
        let vertices = surface.strip();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", surface.label())),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::debug!("built {} strip with {} vertices", surface.label(), vertices.len());
        TunnelMesh {
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    });
    TunnelMeshes { meshes }
}
