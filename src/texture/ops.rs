use image::{Rgba, RgbaImage};
use kurbo::{Affine, Point, Vec2};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Normalized `[0, 1]` texture rectangle. `u0 > u1` or `v0 > v1` mirrors the region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub u0: f64,
    pub v0: f64,
    pub u1: f64,
    pub v1: f64,
}

impl UvRect {
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(u0: f64, v0: f64, u1: f64, v1: f64) -> Self {
        Self { u0, v0, u1, v1 }
    }

    /// Zero-width or zero-height rectangles map to the transparent placeholder.
    pub fn is_degenerate(&self) -> bool {
        self.u0 == self.u1 || self.v0 == self.v1
    }

    pub(crate) fn key_bits(&self) -> [u64; 4] {
        [
            self.u0.to_bits(),
            self.v0.to_bits(),
            self.u1.to_bits(),
            self.v1.to_bits(),
        ]
    }
}

pub fn transparent_pixel() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, TRANSPARENT)
}

/// Animation strips stack frames vertically; keep the top square frame.
pub fn first_frame(img: RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    if h > w {
        image::imageops::crop_imm(&img, 0, 0, w, w).to_image()
    } else {
        img
    }
}

/// Copies the pixel rectangle spanned by `from` and `to`, walking from `from` toward `to`,
/// so a reversed corner pair yields a mirrored region. Reads outside the source are
/// transparent. The result is at least 1×1.
pub fn crop_pixels(img: &RgbaImage, from: (i64, i64), to: (i64, i64)) -> RgbaImage {
    let width = (to.0 - from.0).unsigned_abs();
    let height = (to.1 - from.1).unsigned_abs();
    let mut out = RgbaImage::from_pixel(width.max(1) as u32, height.max(1) as u32, TRANSPARENT);

    let step_x = if from.0 < to.0 { 1 } else { -1 };
    let step_y = if from.1 < to.1 { 1 } else { -1 };
    let start_x = from.0.min(to.0.max(from.0) - 1);
    let start_y = from.1.min(to.1.max(from.1) - 1);

    for x in 0..width {
        let src_x = start_x + step_x * x as i64;
        for y in 0..height {
            let src_y = start_y + step_y * y as i64;
            out.put_pixel(x as u32, y as u32, pixel_or_transparent(img, src_x, src_y));
        }
    }
    out
}

fn pixel_or_transparent(img: &RgbaImage, x: i64, y: i64) -> Rgba<u8> {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return TRANSPARENT;
    }
    *img.get_pixel(x as u32, y as u32)
}

/// Crops a frame to a UV rectangle, rounding the pixel corners up.
pub fn crop_uv(img: &RgbaImage, uv: UvRect) -> RgbaImage {
    let w = f64::from(img.width());
    let h = f64::from(img.height());
    crop_pixels(
        img,
        ((uv.u0 * w).ceil() as i64, (uv.v0 * h).ceil() as i64),
        ((uv.u1 * w).ceil() as i64, (uv.v1 * h).ceil() as i64),
    )
}

/// Rotates clockwise (image space, y down) about the image center, growing the canvas to the
/// rotated bounding box. Uncovered pixels stay transparent; sampling is nearest-neighbour.
pub fn rotate_expand(img: &RgbaImage, degrees: f64) -> RgbaImage {
    let rads = degrees.to_radians();
    let (w, h) = (f64::from(img.width()), f64::from(img.height()));
    let (sin, cos) = (rads.sin().abs(), rads.cos().abs());
    let new_w = (w * cos + h * sin).floor().max(1.0);
    let new_h = (h * cos + w * sin).floor().max(1.0);

    let forward = Affine::translate(Vec2::new((new_w - w) / 2.0, (new_h - h) / 2.0))
        * Affine::rotate_about(rads, Point::new(w / 2.0, h / 2.0));
    let inverse = forward.inverse();

    let mut out = RgbaImage::from_pixel(new_w as u32, new_h as u32, TRANSPARENT);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let src = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        *px = pixel_or_transparent(img, src.x.floor() as i64, src.y.floor() as i64);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/texture/ops.rs"]
mod tests;
