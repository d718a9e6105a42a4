use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::scene::geometry::Intersection;
use crate::texture::cache::Texture;

/// Edge length of a layered model with no layers.
const EMPTY_LAYER_SIZE: u32 = 16;

/// Front-to-back accumulation of depth-sorted hits.
///
/// Each hit contributes `channel * alpha * multiplier * (1 - accumulated_alpha)`; the walk
/// stops once the accumulated alpha reaches 1. Channels are truncated and saturate at 255.
pub fn accumulate(hits: &[Intersection]) -> Rgba<u8> {
    let mut alpha = 0.0f64;
    let mut rgb = [0.0f64; 3];
    for hit in hits {
        if alpha >= 1.0 {
            break;
        }
        let a = f64::from(hit.color[3]) / 255.0;
        let weight = a * hit.multiplier * (1.0 - alpha);
        for (acc, channel) in rgb.iter_mut().zip(hit.color.0) {
            *acc += f64::from(channel) * weight;
        }
        alpha += a;
    }
    Rgba([
        rgb[0] as u8,
        rgb[1] as u8,
        rgb[2] as u8,
        (alpha * 255.0) as u8,
    ])
}

/// Source-over for straight (non-premultiplied) RGBA8.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = f32::from(src[3]) / 255.0;
    if sa <= 0.0 {
        return dst;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

pub fn over_in_place(dst: &mut RgbaImage, src: &RgbaImage) {
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        *d = over(*d, *s);
    }
}

/// Stacks layers bottom to top on a canvas as large as the largest layer, stretching smaller
/// layers with nearest-neighbour sampling.
pub fn flatten_layers(layers: &[Texture]) -> RgbaImage {
    let width = layers
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(EMPTY_LAYER_SIZE);
    let height = layers
        .iter()
        .map(|l| l.height())
        .max()
        .unwrap_or(EMPTY_LAYER_SIZE);

    let mut out = RgbaImage::new(width, height);
    for layer in layers {
        if layer.dimensions() == (width, height) {
            over_in_place(&mut out, layer);
        } else {
            let stretched = imageops::resize(&**layer, width, height, FilterType::Nearest);
            over_in_place(&mut out, &stretched);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
