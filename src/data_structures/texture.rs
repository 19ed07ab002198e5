//! GPU textures and sampling state.
//!
//! This module provides [`Texture`], a wrapper around a mip-mapped WGPU texture
//! together with the sampler and bind group it is drawn with, and
//! [`SamplerSettings`], the filter/wrap/anisotropy state the filter menu edits.

use anyhow::*;
use image::{RgbaImage, imageops::FilterType};

use crate::controller::FilterMenu;
use crate::resources::{DecodedImage, PixelFormat};

/// Highest anisotropy level WGPU accepts for `anisotropy_clamp`.
pub const MAX_ANISOTROPY: u16 = 16;

/// Minification filter, including the mipmap selection mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapNearest,
    LinearMipmapLinear,
}

impl MinFilter {
    /// Splits into the texel filter, the filter between mip levels and whether mips are sampled at all.
    fn split(self) -> (wgpu::FilterMode, wgpu::MipmapFilterMode, bool) {
        use wgpu::{FilterMode, MipmapFilterMode};
        match self {
            MinFilter::Nearest => (FilterMode::Nearest, MipmapFilterMode::Nearest, false),
            MinFilter::Linear => (FilterMode::Linear, MipmapFilterMode::Nearest, false),
            MinFilter::NearestMipmapNearest => (FilterMode::Nearest, MipmapFilterMode::Nearest, true),
            MinFilter::NearestMipmapLinear => (FilterMode::Nearest, MipmapFilterMode::Linear, true),
            MinFilter::LinearMipmapNearest => (FilterMode::Linear, MipmapFilterMode::Nearest, true),
            MinFilter::LinearMipmapLinear => (FilterMode::Linear, MipmapFilterMode::Linear, true),
        }
    }
}

/// The sampling state shared by every tunnel texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SamplerSettings {
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: MinFilter,
    pub wrap: wgpu::AddressMode,
    pub anisotropy: u16,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: MinFilter::Nearest,
            wrap: wgpu::AddressMode::ClampToEdge,
            anisotropy: 1,
        }
    }
}

impl SamplerSettings {
    /// Returns these settings with a filter menu entry applied.
    ///
    /// Anisotropic on only raises the anisotropy level and keeps `mag_filter`
    /// at nearest, but [`Self::descriptor`] samples it linearly while the
    /// level is above 1. wgpu rejects anisotropy with any nearest filter.
    pub fn with(self, entry: FilterMenu) -> Self {
        let mut next = self;
        match entry {
            FilterMenu::Nearest => next.min_filter = MinFilter::Nearest,
            FilterMenu::Linear => next.min_filter = MinFilter::Linear,
            FilterMenu::NearestMipmapNearest => next.min_filter = MinFilter::NearestMipmapNearest,
            FilterMenu::NearestMipmapLinear => next.min_filter = MinFilter::NearestMipmapLinear,
            FilterMenu::LinearMipmapNearest => next.min_filter = MinFilter::LinearMipmapNearest,
            FilterMenu::LinearMipmapLinear => next.min_filter = MinFilter::LinearMipmapLinear,
            FilterMenu::AnisotropicOn => next.anisotropy = MAX_ANISOTROPY,
            FilterMenu::AnisotropicOff => next.anisotropy = 1,
        }
        next
    }

    /// Translates the settings into a sampler descriptor.
    ///
    /// WGPU only accepts an anisotropy clamp above 1 when every filter is linear,
    /// so anisotropic sampling upgrades all three filters to linear.
    pub fn descriptor<'a>(&self, label: Option<&'a str>) -> wgpu::SamplerDescriptor<'a> {
        let (min_filter, mipmap_filter, mipmapped) = self.min_filter.split();
        let lod_max_clamp = if mipmapped { 32.0 } else { 0.0 };
        let (mag_filter, min_filter, mipmap_filter) = if self.anisotropy > 1 {
            (
                wgpu::FilterMode::Linear,
                wgpu::FilterMode::Linear,
                wgpu::MipmapFilterMode::Linear,
            )
        } else {
            (self.mag_filter, min_filter, mipmap_filter)
        };
        wgpu::SamplerDescriptor {
            label,
            address_mode_u: self.wrap,
            address_mode_v: self.wrap,
            address_mode_w: self.wrap,
            mag_filter,
            min_filter,
            mipmap_filter,
            lod_min_clamp: 0.0,
            lod_max_clamp,
            anisotropy_clamp: self.anisotropy.clamp(1, MAX_ANISOTROPY),
            ..Default::default()
        }
    }
}

/// What the loader learned about a texture's source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    pub path: std::path::PathBuf,
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub format: PixelFormat,
    pub mip_levels: u32,
}

/// A mip-mapped GPU texture plus the sampler and bind group it is drawn with.
#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub settings: SamplerSettings,
    pub info: TextureInfo,
}

impl Texture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Uploads a decoded image with its full mip chain.
    ///
    /// The texture starts out with [`SamplerSettings::default`]: nearest
    /// filtering and clamp-to-edge wrapping on both axes.
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        decoded: DecodedImage,
    ) -> Result<Self> {
        if decoded.width == 0 || decoded.height == 0 {
            bail!("image {} has no pixels", decoded.path.display());
        }
        let label = decoded.path.display().to_string();
        let chain = mip_chain(&decoded.image.to_rgba8());
        let mip_levels = chain.len() as u32;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&label),
            size: wgpu::Extent3d {
                width: decoded.width,
                height: decoded.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: mip_levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, rgba) in chain.iter().enumerate() {
            let (width, height) = rgba.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let settings = SamplerSettings::default();
        let sampler = device.create_sampler(&settings.descriptor(Some(&label)));
        let bind_group = mk_bind_group(device, layout, &view, &sampler, &label);
        let info = TextureInfo {
            path: decoded.path,
            width: decoded.width,
            height: decoded.height,
            components: decoded.components,
            format: decoded.format,
            mip_levels,
        };

        Ok(Self {
            texture,
            view,
            sampler,
            bind_group,
            settings,
            info,
        })
    }

    /// Switches to new sampling settings, rebuilding the sampler and bind group.
    ///
    /// Returns `false` and leaves the texture untouched if nothing changed.
    pub fn set_sampler(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        settings: SamplerSettings,
    ) -> bool {
        if settings == self.settings {
            return false;
        }
        let label = self.info.path.display().to_string();
        self.sampler = device.create_sampler(&settings.descriptor(Some(&label)));
        self.bind_group = mk_bind_group(device, layout, &self.view, &self.sampler, &label);
        self.settings = settings;
        true
    }
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some(label),
    })
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Builds a full mip chain, level 0 first, each level half the size of the previous one.
pub fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height()) as usize;
    let mut chain = Vec::with_capacity(levels);
    chain.push(base.clone());
    while chain.len() < levels {
        let next = {
            let prev = &chain[chain.len() - 1];
            let width = (prev.width() / 2).max(1);
            let height = (prev.height() / 2).max(1);
            image::imageops::resize(prev, width, height, FilterType::Triangle)
        };
        chain.push(next);
    }
    chain
}
