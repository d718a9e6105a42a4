use super::*;

const A: Rgba<u8> = Rgba([255, 0, 0, 255]);
const B: Rgba<u8> = Rgba([0, 255, 0, 255]);
const C: Rgba<u8> = Rgba([0, 0, 255, 255]);
const D: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn quad() -> RgbaImage {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, A);
    img.put_pixel(1, 0, B);
    img.put_pixel(0, 1, C);
    img.put_pixel(1, 1, D);
    img
}

#[test]
fn first_frame_keeps_top_square_of_strip() {
    let mut strip = RgbaImage::from_pixel(2, 6, C);
    strip.put_pixel(0, 0, A);
    let frame = first_frame(strip);
    assert_eq!(frame.dimensions(), (2, 2));
    assert_eq!(*frame.get_pixel(0, 0), A);

    let wide = RgbaImage::from_pixel(4, 2, B);
    assert_eq!(first_frame(wide).dimensions(), (4, 2));
}

#[test]
fn crop_uv_full_rect_is_identity() {
    let img = quad();
    assert_eq!(crop_uv(&img, UvRect::FULL), img);
}

#[test]
fn crop_uv_rounds_corners_up() {
    let img = RgbaImage::from_fn(16, 16, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    let out = crop_uv(&img, UvRect::new(0.25, 0.5, 0.51, 1.0));
    // 0.51 * 16 = 8.16 rounds up to 9
    assert_eq!(out.dimensions(), (5, 8));
    assert_eq!(*out.get_pixel(0, 0), Rgba([4, 8, 0, 255]));
}

#[test]
fn reversed_uv_mirrors_region() {
    let out = crop_pixels(&quad(), (2, 0), (0, 2));
    assert_eq!(*out.get_pixel(0, 0), B);
    assert_eq!(*out.get_pixel(1, 0), A);
    assert_eq!(*out.get_pixel(0, 1), D);
}

#[test]
fn out_of_bounds_reads_are_transparent() {
    let out = crop_pixels(&quad(), (1, 0), (3, 1));
    assert_eq!(out.dimensions(), (2, 1));
    assert_eq!(*out.get_pixel(0, 0), B);
    assert_eq!(*out.get_pixel(1, 0), TRANSPARENT);
}

#[test]
fn quarter_turn_is_clockwise_and_swaps_extent() {
    let mut row = RgbaImage::new(2, 1);
    row.put_pixel(0, 0, A);
    row.put_pixel(1, 0, B);
    let out = rotate_expand(&row, 90.0);
    assert_eq!(out.dimensions(), (1, 2));
    assert_eq!(*out.get_pixel(0, 0), A);
    assert_eq!(*out.get_pixel(0, 1), B);
}

#[test]
fn half_turn_flips_both_axes() {
    let out = rotate_expand(&quad(), 180.0);
    assert_eq!(out.dimensions(), (2, 2));
    assert_eq!(*out.get_pixel(0, 0), D);
    assert_eq!(*out.get_pixel(1, 1), A);
}

#[test]
fn odd_angle_expands_canvas_with_transparent_corners() {
    let img = RgbaImage::from_pixel(16, 16, A);
    let out = rotate_expand(&img, 45.0);
    // 16 * (cos 45 + sin 45) = 22.6
    assert_eq!(out.dimensions(), (22, 22));
    assert_eq!(*out.get_pixel(0, 0), TRANSPARENT);
    assert_eq!(*out.get_pixel(11, 11), A);
}

#[test]
fn degenerate_rects_are_detected() {
    assert!(UvRect::new(0.5, 0.0, 0.5, 1.0).is_degenerate());
    assert!(UvRect::new(0.0, 0.2, 1.0, 0.2).is_degenerate());
    assert!(!UvRect::FULL.is_degenerate());
    assert_eq!(transparent_pixel().get_pixel(0, 0).0, [0, 0, 0, 0]);
}
