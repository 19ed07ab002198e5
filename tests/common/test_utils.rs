use std::path::PathBuf;

use flow_tunnel::{
    camera::CameraResources, pipelines::texture_replace::mk_texture_replace_pipeline,
    resources::texture::texture_bind_group_layout,
};

pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
/// Keeps `bytes_per_row` a multiple of 256 for readback.
pub const TARGET_SIZE: u32 = 256;

pub fn asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// A device without a window plus everything the texture-replace pipeline needs.
pub struct Headless {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub camera: CameraResources,
    pub texture_layout: wgpu::BindGroupLayout,
    pub pipeline: wgpu::RenderPipeline,
}

impl Headless {
    pub async fn new() -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("headless device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let camera = CameraResources::new(&device);
        let texture_layout = texture_bind_group_layout(&device);
        let pipeline = mk_texture_replace_pipeline(
            &device,
            TARGET_FORMAT,
            &camera.bind_group_layout,
            &texture_layout,
        );
        Ok(Self {
            device,
            queue,
            camera,
            texture_layout,
            pipeline,
        })
    }

    pub fn target(&self) -> wgpu::Texture {
        self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Headless Render Target"),
            size: wgpu::Extent3d {
                width: TARGET_SIZE,
                height: TARGET_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }

    /// Copies `target` back to the CPU as tightly packed RGBA rows.
    pub async fn read_back(&self, target: &wgpu::Texture) -> anyhow::Result<Vec<u8>> {
        let bytes_per_row = 4 * TARGET_SIZE;
        let output = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Headless Readback"),
            size: (bytes_per_row * TARGET_SIZE) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(TARGET_SIZE),
                },
            },
            target.size(),
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        // Map first, then poll, then await.
        let slice = output.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        })?;
        rx.await??;
        let data = slice.get_mapped_range().to_vec();
        output.unmap();
        Ok(data)
    }
}
