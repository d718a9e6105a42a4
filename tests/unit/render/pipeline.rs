use std::sync::Arc;

use glam::DVec3;
use image::{Rgba, RgbaImage};

use super::*;
use crate::foundation::core::Canvas;
use crate::model::resolved::{Element, GeometricModel};

fn solid_cube_scene(canvas: Canvas) -> Arc<Scene> {
    let tex = Arc::new(RgbaImage::from_pixel(4, 4, Rgba([40, 80, 120, 255])));
    let model = GeometricModel {
        elements: vec![Element::new(
            DVec3::ZERO,
            DVec3::ONE,
            None,
            std::array::from_fn(|_| Arc::clone(&tex)),
        )],
        ambient_occlusion: false,
        rotation: DVec3::ZERO,
        translation: DVec3::ZERO,
        scale: DVec3::ONE,
    };
    Arc::new(Scene::build(&model, canvas, 40.0, 0.95))
}

#[test]
fn zero_threads_is_a_config_error() {
    assert!(matches!(
        build_thread_pool(Some(0)),
        Err(BlockrayError::Config(_))
    ));
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}

#[test]
fn traced_image_has_object_in_center_and_clear_corners() {
    let pool = build_thread_pool(Some(2)).unwrap();
    let canvas = Canvas::new(32, 32).unwrap();
    let img = trace_image(&pool, solid_cube_scene(canvas), Duration::from_secs(60)).unwrap();

    assert_eq!(img.dimensions(), (32, 32));
    assert_eq!(*img.get_pixel(16, 16), Rgba([40, 80, 120, 255]));
    assert_eq!(img.get_pixel(0, 0)[3], 0);
}

#[test]
fn rendering_is_deterministic_across_pool_sizes() {
    let canvas = Canvas::new(24, 16).unwrap();
    let scene = solid_cube_scene(canvas);
    let one = trace_image(
        &build_thread_pool(Some(1)).unwrap(),
        Arc::clone(&scene),
        Duration::from_secs(60),
    )
    .unwrap();
    let four = trace_image(
        &build_thread_pool(Some(4)).unwrap(),
        scene,
        Duration::from_secs(60),
    )
    .unwrap();
    assert_eq!(one, four);
}

#[test]
fn exceeding_deadline_is_a_timeout() {
    let pool = build_thread_pool(Some(1)).unwrap();
    let scene = solid_cube_scene(Canvas::new(512, 512).unwrap());
    let err = trace_image(&pool, scene, Duration::from_nanos(1)).unwrap_err();
    assert!(matches!(err, BlockrayError::RenderTimeout(_)));
}

#[test]
fn panic_payloads_become_messages() {
    let boxed: Box<dyn std::any::Any + Send> = Box::new("row exploded");
    assert_eq!(panic_message(boxed.as_ref()), "row exploded");
    let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
    assert_eq!(panic_message(boxed.as_ref()), "owned");
    let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
    assert_eq!(panic_message(boxed.as_ref()), "render worker panicked");
}
