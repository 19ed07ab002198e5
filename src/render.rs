//! Frame composition.
//!
//! A frame is first planned as a flat list of [`DrawCommand`]s and then
//! replayed against wgpu by [`submit_frame`]. Planning needs no GPU, so the
//! draw order and the transform used for each frame can be checked directly.
//!
//! Every frame has the same shape:
//!
//! 1. `Clear` with the clear colour
//! 2. `UseTextureReplace` with the MVP matrix for the current depth
//! 3. `BindTexture` + `Draw` for the floor, ceiling, left wall and right wall
//! 4. `Present`

use cgmath::Matrix4;

use crate::{
    camera::{Camera, CameraResources, MatrixStack, Projection},
    data_structures::{
        mesh::TunnelMeshes,
        tunnel::{Surface, VERTICES_PER_SURFACE},
    },
    resources::{TextureSlot, texture::TextureRegistry},
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(wgpu::Color),
    /// Selects the texture-replace pipeline and uploads the MVP matrix.
    UseTextureReplace {
        mvp: Matrix4<f32>,
        texture_unit: u32,
    },
    BindTexture(TextureSlot),
    Draw {
        surface: Surface,
        vertices: u32,
    },
    Present,
}

/// Plans one frame of the tunnel as seen from `camera`.
pub fn plan_frame(camera: &Camera, projection: &Projection, clear_colour: wgpu::Color) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(3 + 2 * Surface::ALL.len());
    commands.push(DrawCommand::Clear(clear_colour));

    let mut model_view = MatrixStack::default();
    model_view.push();
    model_view.translate(0.0, 0.0, camera.depth);
    commands.push(DrawCommand::UseTextureReplace {
        mvp: projection.calc_matrix() * model_view.top(),
        texture_unit: 0,
    });

    for surface in Surface::ALL {
        commands.push(DrawCommand::BindTexture(surface.texture_slot()));
        commands.push(DrawCommand::Draw {
            surface,
            vertices: VERTICES_PER_SURFACE as u32,
        });
    }

    model_view.pop();
    commands.push(DrawCommand::Present);
    commands
}

/// GPU resources a frame is replayed against.
pub struct Scene<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub camera: &'a CameraResources,
    pub textures: &'a TextureRegistry,
    pub meshes: &'a TunnelMeshes,
}

/// Records and submits `commands` into `view`. Returns whether the plan asked for a present.
pub fn submit_frame(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    view: &wgpu::TextureView,
    scene: &Scene<'_>,
    commands: &[DrawCommand],
) -> bool {
    let clear_colour = commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::Clear(colour) => Some(*colour),
            _ => None,
        })
        .unwrap_or(wgpu::Color::BLACK);

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Tunnel Render Encoder"),
    });
    let mut present = false;
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Tunnel Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            multiview_mask: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        for command in commands {
            match *command {
                // Handled by the pass load op.
                DrawCommand::Clear(_) => (),
                DrawCommand::UseTextureReplace { mvp, .. } => {
                    scene.camera.write(queue, mvp);
                    render_pass.set_pipeline(scene.pipeline);
                    render_pass.set_bind_group(0, &scene.camera.bind_group, &[]);
                }
                DrawCommand::BindTexture(slot) => {
                    render_pass.set_bind_group(1, &scene.textures[slot].bind_group, &[]);
                }
                DrawCommand::Draw { surface, vertices } => {
                    let mesh = &scene.meshes[surface];
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.draw(0..vertices.min(mesh.num_vertices), 0..1);
                }
                DrawCommand::Present => present = true,
            }
        }
    }
    queue.submit(std::iter::once(encoder.finish()));
    present
}
