//! Camera, projection and the model-view matrix stack.
//!
//! The camera never rotates: it only slides along the tunnel's z axis. Its
//! state is a single depth offset that the arrow keys change in fixed steps.

use cgmath::{Deg, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::controller::SpecialKey;

// wgpu clip space has z in [0, 1], cgmath produces OpenGL's [-1, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Translation of the view along the tunnel. No bounds are enforced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub depth: f32,
    pub step: f32,
}

impl Camera {
    pub fn new(depth: f32, step: f32) -> Self {
        Self { depth, step }
    }

    pub fn handle_key(&mut self, key: SpecialKey) {
        match key {
            SpecialKey::Up => self.depth += self.step,
            SpecialKey::Down => self.depth -= self.step,
        }
    }
}

/// The area of the window rendered into, in physical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Deg<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        let mut projection = Self {
            fovy: fovy.into(),
            aspect: 1.0,
            znear,
            zfar,
        };
        projection.resize(width, height);
        projection
    }

    /// Recomputes the aspect ratio and returns the full-window viewport.
    ///
    /// A zero height is treated as a height of one. A zero width (minimized
    /// window) keeps the previous aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) -> Viewport {
        let height = height.max(1);
        if width > 0 {
            self.aspect = width as f32 / height as f32;
        }
        Viewport {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// A stack of model-view transforms. The top of the stack is the current transform.
#[derive(Clone, Debug)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }
}

impl MatrixStack {
    pub fn top(&self) -> Matrix4<f32> {
        // The base entry is never popped.
        self.stack[self.stack.len() - 1]
    }

    /// Pushes a copy of the current transform.
    pub fn push(&mut self) {
        self.stack.push(self.top());
    }

    /// Restores the previous transform. Popping the base entry is ignored.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("matrix stack underflow");
        }
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let last = self.stack.len() - 1;
        self.stack[last] = self.stack[last] * Matrix4::from_translation([x, y, z].into());
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, mvp: Matrix4<f32>) {
        self.view_proj = mvp.into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: the MVP uniform buffer and its bind group.
#[derive(Debug)]
pub struct CameraResources {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Stages a new MVP matrix; it reaches the GPU with the next submit.
    pub fn write(&self, queue: &wgpu::Queue, mvp: Matrix4<f32>) {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(mvp);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn depth_moves_in_half_steps_without_clamping() {
        let mut camera = Camera::new(-65.0, 0.5);
        for _ in 0..400 {
            camera.handle_key(SpecialKey::Up);
        }
        assert_eq!(camera.depth, -65.0 + 0.5 * 400.0);
        camera.handle_key(SpecialKey::Down);
        assert_eq!(camera.depth, 134.5);
    }

    #[test]
    fn zero_height_is_treated_as_one() {
        let mut a = Projection::new(800, 600, Deg(80.0), 1.0, 120.0);
        let mut b = a;
        let viewport_a = a.resize(640, 0);
        let viewport_b = b.resize(640, 1);
        assert_eq!(viewport_a, viewport_b);
        assert_eq!(a, b);
        assert_eq!(a.aspect, 640.0);
    }

    #[test]
    fn zero_width_keeps_the_last_aspect() {
        let mut projection = Projection::new(800, 600, Deg(80.0), 1.0, 120.0);
        let before = projection.aspect;
        let viewport = projection.resize(0, 600);
        assert_eq!(viewport.width, 0);
        assert_eq!(projection.aspect, before);
        projection.resize(0, 0);
        assert_eq!(projection.aspect, before);
        // Still a valid perspective.
        let _ = projection.calc_matrix();
    }

    #[test]
    fn viewport_covers_the_window() {
        let mut projection = Projection::new(1, 1, Deg(80.0), 1.0, 120.0);
        let viewport = projection.resize(800, 600);
        assert_eq!(
            viewport,
            Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
        assert!((projection.aspect - 800.0 / 600.0).abs() < f32::EPSILON);
    }

    #[test]
    fn near_and_far_planes_map_to_wgpu_depth_range() {
        let projection = Projection::new(800, 600, Deg(80.0), 1.0, 120.0);
        let m = projection.calc_matrix();
        let near = m * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = m * Vector4::new(0.0, 0.0, -120.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn push_translate_pop_restores_the_view() {
        let mut stack = MatrixStack::default();
        let before = stack.top();
        stack.push();
        stack.translate(0.0, 0.0, -65.0);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().w.z, -65.0);
        stack.pop();
        assert_eq!(stack.top(), before);
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }
}
