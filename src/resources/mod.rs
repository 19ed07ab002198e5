//! Loading textures and building meshes from external files and fixed geometry.
//!
//! - `texture` decodes the tunnel images and uploads them to the GPU
//! - `mesh` turns the procedural tunnel strips into vertex buffers

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{ColorType, GenericImageView, ImageFormat};

pub mod mesh;
pub mod texture;

/// The three textures the tunnel is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Brick,
    Floor,
    Ceiling,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 3] = [TextureSlot::Brick, TextureSlot::Floor, TextureSlot::Ceiling];

    pub fn file_name(self) -> &'static str {
        match self {
            TextureSlot::Brick => "brick.tga",
            TextureSlot::Floor => "floor.tga",
            TextureSlot::Ceiling => "ceiling.tga",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Channel layout of a decoded image before it is expanded to RGBA for upload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Luminance,
    LuminanceAlpha,
    Rgb,
    Rgba,
}

impl From<ColorType> for PixelFormat {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::L16 => PixelFormat::Luminance,
            ColorType::La8 | ColorType::La16 => PixelFormat::LuminanceAlpha,
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => PixelFormat::Rgb,
            _ => PixelFormat::Rgba,
        }
    }
}

/// A decoded image file and what is known about its pixels.
#[derive(Debug)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub image: image::DynamicImage,
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub format: PixelFormat,
}

impl DecodedImage {
    pub fn pixels(&self) -> &[u8] {
        self.image.as_bytes()
    }
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = tokio::fs::read(path).await?;
    Ok(data)
}

/// Reads and decodes an image, failing with the asset path if it is missing or unreadable.
pub async fn decode_image(path: &Path) -> anyhow::Result<DecodedImage> {
    let not_found = || format!("asset not found or corrupt: {}", path.display());
    let bytes = load_binary(path).await.with_context(not_found)?;
    // TGA has no magic number, so the extension decides the decoder.
    let format = ImageFormat::from_path(path).with_context(not_found)?;
    let image = image::load_from_memory_with_format(&bytes, format).with_context(not_found)?;

    let (width, height) = image.dimensions();
    let color = image.color();
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        width,
        height,
        color
    );
    Ok(DecodedImage {
        path: path.to_path_buf(),
        width,
        height,
        components: color.channel_count(),
        format: color.into(),
        image,
    })
}
