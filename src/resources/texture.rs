use std::ops::Index;
use std::path::Path;

use crate::controller::FilterMenu;
use crate::data_structures::texture::{SamplerSettings, Texture};
use crate::resources::{TextureSlot, decode_image};

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Tunnel texture_bind_group_layout"),
    })
}

pub async fn load_texture(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<Texture> {
    let decoded = decode_image(path).await?;
    // The decoded buffer is dropped once the mip chain is on the GPU.
    Texture::from_decoded(device, queue, layout, decoded)
}

/// The tunnel's textures, one per [`TextureSlot`].
#[derive(Debug)]
pub struct TextureRegistry {
    textures: [Texture; 3],
}

impl TextureRegistry {
    /// Loads all three textures from `asset_dir`. Any missing or corrupt file aborts the load.
    pub async fn load(
        asset_dir: &Path,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) -> anyhow::Result<Self> {
        let paths = TextureSlot::ALL.map(|slot| asset_dir.join(slot.file_name()));
        let loads = paths
            .iter()
            .map(|path| load_texture(path, device, queue, layout));
        let loaded = futures::future::try_join_all(loads).await?;
        let textures: [Texture; 3] = loaded
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected exactly {} textures", TextureSlot::ALL.len()))?;
        for texture in &textures {
            log::info!(
                "loaded {} ({}x{}, {} components, {} mip levels)",
                texture.info.path.display(),
                texture.info.width,
                texture.info.height,
                texture.info.components,
                texture.info.mip_levels
            );
        }
        Ok(Self { textures })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        self.textures.iter()
    }

    /// Applies a filter menu entry to every texture. Returns how many textures changed.
    pub fn apply_filter(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        entry: FilterMenu,
    ) -> usize {
        let mut changed = 0;
        for texture in self.textures.iter_mut() {
            let settings: SamplerSettings = texture.settings.with(entry);
            if texture.set_sampler(device, layout, settings) {
                changed += 1;
            }
        }
        changed
    }

    /// Destroys the GPU textures. Consuming the registry guarantees this happens once.
    pub fn release(self) -> usize {
        let count = self.textures.len();
        for texture in self.textures {
            texture.texture.destroy();
        }
        count
    }
}

impl Index<TextureSlot> for TextureRegistry {
    type Output = Texture;

    fn index(&self, slot: TextureSlot) -> &Texture {
        &self.textures[slot.index()]
    }
}
