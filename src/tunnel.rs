//! The tunnel application: state, input handling and per-frame rendering.
//!
//! [`TunnelState`] holds everything that changes in response to input and
//! needs no GPU. [`Tunnel`] adds the loaded textures and meshes and turns the
//! state into frames.

use crate::{
    camera::{Camera, Projection, Viewport},
    config::TunnelConfig,
    context::Context,
    controller::{FilterMenu, SpecialKey},
    data_structures::{mesh::TunnelMeshes, texture::SamplerSettings},
    flow::Out,
    render::{DrawCommand, Scene, plan_frame, submit_frame},
    resources::{mesh::build_tunnel_meshes, texture::TextureRegistry},
};

#[derive(Clone, Debug)]
pub struct TunnelState {
    pub camera: Camera,
    pub projection: Projection,
    pub viewport: Viewport,
    /// Sampling state applied to every texture.
    pub sampler: SamplerSettings,
    pub clear_colour: wgpu::Color,
}

impl TunnelState {
    pub fn new(config: &TunnelConfig) -> Self {
        let (width, height) = config.window_size;
        let mut projection = Projection::new(
            width,
            height,
            cgmath::Deg(config.fovy_degrees),
            config.znear,
            config.zfar,
        );
        let viewport = projection.resize(width, height);
        Self {
            camera: Camera::new(config.initial_depth, config.depth_step),
            projection,
            viewport,
            sampler: SamplerSettings::default(),
            clear_colour: config.clear_colour,
        }
    }

    pub fn on_resize(&mut self, width: u32, height: u32) -> Out {
        self.viewport = self.projection.resize(width, height);
        Out::Redraw
    }

    pub fn on_special_key(&mut self, key: SpecialKey) -> Out {
        self.camera.handle_key(key);
        log::debug!("depth: {}", self.camera.depth);
        Out::Redraw
    }

    /// Applies a filter menu entry. Indices outside the menu are ignored.
    pub fn on_menu_select(&mut self, index: usize) -> Option<FilterMenu> {
        let Some(entry) = FilterMenu::from_index(index) else {
            log::warn!("ignoring unknown filter menu entry {index}");
            return None;
        };
        self.sampler = self.sampler.with(entry);
        Some(entry)
    }

    pub fn frame(&self) -> Vec<DrawCommand> {
        plan_frame(&self.camera, &self.projection, self.clear_colour)
    }
}

#[derive(Debug)]
pub struct Tunnel {
    pub state: TunnelState,
    pub textures: TextureRegistry,
    pub meshes: TunnelMeshes,
}

impl Tunnel {
    /// Loads the textures and uploads the tunnel geometry.
    pub async fn on_init(ctx: &Context, config: &TunnelConfig) -> anyhow::Result<Self> {
        let textures =
            TextureRegistry::load(&config.asset_dir, &ctx.device, &ctx.queue, &ctx.texture_layout).await?;
        let meshes = build_tunnel_meshes(&ctx.device);
        let mut state = TunnelState::new(config);
        state.on_resize(ctx.config.width, ctx.config.height);
        Ok(Self {
            state,
            textures,
            meshes,
        })
    }

    pub fn on_resize(&mut self, ctx: &mut Context, width: u32, height: u32) -> Out {
        ctx.resize(width, height);
        self.state.on_resize(width, height)
    }

    pub fn on_special_key(&mut self, key: SpecialKey) -> Out {
        self.state.on_special_key(key)
    }

    /// Applies a filter menu entry to every texture and shows it in the window title.
    pub fn on_menu_select(&mut self, ctx: &Context, index: usize) -> Out {
        let Some(entry) = self.state.on_menu_select(index) else {
            return Out::Empty;
        };
        let changed = self
            .textures
            .apply_filter(&ctx.device, &ctx.texture_layout, entry);
        log::info!("filter: {} ({changed} textures changed)", entry.label());
        ctx.window()
            .set_title(&format!("Tunnel - {}", entry.label()));
        Out::Redraw
    }

    pub fn on_render(&self, ctx: &Context) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let scene = Scene {
            pipeline: &ctx.pipeline,
            camera: &ctx.camera,
            textures: &self.textures,
            meshes: &self.meshes,
        };
        if submit_frame(&ctx.device, &ctx.queue, &view, &scene, &self.state.frame()) {
            ctx.window().pre_present_notify();
            output.present();
        }
        Ok(())
    }

    /// Releases the textures. Returns how many were released.
    pub fn on_shutdown(self) -> usize {
        let released = self.textures.release();
        log::info!("released {released} textures");
        released
    }
}
