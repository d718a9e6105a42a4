use anyhow::Context;
use image::RgbaImage;

use crate::foundation::core::ResourceId;
use crate::foundation::error::BlockrayResult;

/// Decode PNG bytes to straight-alpha RGBA8.
pub fn decode_texture(id: &ResourceId, bytes: &[u8]) -> BlockrayResult<RgbaImage> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .with_context(|| format!("decode texture {id}"))?;
    Ok(img.to_rgba8())
}
