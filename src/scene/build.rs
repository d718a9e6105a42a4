use glam::DVec3;
use smallvec::SmallVec;

use crate::foundation::core::Canvas;
use crate::foundation::math::{Axis, RotateAbout};
use crate::model::resolved::{ElementRotation, GeometricModel};
use crate::scene::camera::{Camera, Ray};
use crate::scene::geometry::{Cuboid, Intersection};

/// Hits gathered for one primary ray; most pixels see only a few faces.
pub type Hits = SmallVec<[Intersection; 8]>;

/// Camera plus world-space geometry for one geometric model, immutable once built.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<Cuboid>,
}

impl Scene {
    /// Orbits the camera around the origin by the model's display rotation, places every
    /// element, applies the model's Z rotation to each of them and fixes face shading.
    pub fn build(model: &GeometricModel, canvas: Canvas, camera_distance: f64, fov: f64) -> Self {
        let eye = DVec3::new(0.0, 0.0, camera_distance)
            .rotate_about(DVec3::ZERO, Axis::X, -model.rotation.x)
            .rotate_about(DVec3::ZERO, Axis::Y, -model.rotation.y);
        let camera = Camera::look_at(eye, DVec3::ZERO, DVec3::Y, fov, canvas);

        let translation = -0.5 * model.scale;
        let roll = ElementRotation {
            origin: DVec3::ZERO,
            axis: Axis::Z,
            angle: model.rotation.z,
            rescale: false,
        };
        let objects = model
            .elements
            .iter()
            .map(|element| {
                let mut cuboid = Cuboid::from_element(
                    element,
                    model.scale,
                    translation,
                    model.ambient_occlusion,
                )
                .rotated(&roll);
                cuboid.shade(camera.right);
                cuboid
            })
            .collect();

        Self { camera, objects }
    }

    /// Every object hit by `ray`, nearest first.
    pub fn trace(&self, ray: &Ray) -> Hits {
        let mut hits: Hits = self
            .objects
            .iter()
            .filter_map(|object| object.trace(ray, self.camera.forward))
            .collect();
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        hits
    }
}
