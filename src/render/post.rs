use glam::DVec3;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::Canvas;

/// Shifts the image by whole pixels; vacated pixels are transparent.
pub fn translate(img: &RgbaImage, dx: i64, dy: i64) -> RgbaImage {
    if dx == 0 && dy == 0 {
        return img.clone();
    }
    let mut out = RgbaImage::new(img.width(), img.height());
    imageops::replace(&mut out, img, dx, dy);
    out
}

/// Removes `crop_horizontal * width` from the left and right edges and
/// `crop_vertical * height` from the top and bottom.
pub fn crop_margins(img: &RgbaImage, crop_horizontal: f64, crop_vertical: f64) -> RgbaImage {
    let (w, h) = (f64::from(img.width()), f64::from(img.height()));
    let x = (w * crop_horizontal) as u32;
    let y = (h * crop_vertical) as u32;
    let cw = ((w * (1.0 - 2.0 * crop_horizontal)) as u32).max(1);
    let ch = ((h * (1.0 - 2.0 * crop_vertical)) as u32).max(1);
    if (x, y, cw, ch) == (0, 0, img.width(), img.height()) {
        return img.clone();
    }
    imageops::crop_imm(img, x, y, cw, ch).to_image()
}

/// Display translation, margin crop, then bilinear scaling to the export size.
///
/// `translation` is in model units (1/16 of the rendered frame per unit); positive y moves
/// the image up.
pub fn finish(
    img: &RgbaImage,
    translation: DVec3,
    crop_horizontal: f64,
    crop_vertical: f64,
    export: Canvas,
) -> RgbaImage {
    let dx = (translation.x / 16.0 * f64::from(img.width())) as i64;
    let dy = (translation.y / 16.0 * f64::from(img.height())) as i64;
    let shifted = translate(img, dx, -dy);
    let cropped = crop_margins(&shifted, crop_horizontal, crop_vertical);
    if cropped.dimensions() == (export.width, export.height) {
        return cropped;
    }
    imageops::resize(&cropped, export.width, export.height, FilterType::Triangle)
}

#[cfg(test)]
#[path = "../../tests/unit/render/post.rs"]
mod tests;
