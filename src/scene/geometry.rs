use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

use glam::DVec3;
use image::Rgba;
use smallvec::SmallVec;

use crate::foundation::math::RotateAbout;
use crate::model::direction::Direction;
use crate::model::resolved::{Element, ElementRotation};
use crate::scene::camera::Ray;
use crate::texture::cache::Texture;

const DARKNESS_MULTIPLIER: f64 = 0.3;
const BRIGHTNESS_MULTIPLIER: f64 = 1.0;

/// One ray hit: distance along the ray, sampled texel and the face's brightness multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub color: Rgba<u8>,
    pub multiplier: f64,
}

/// Textured parallelogram spanned by `u` and `v` from `origin`.
///
/// Both sides are traceable. The front texture is used when the face normal opposes the
/// camera's view direction, the back texture (mirrored horizontally) otherwise.
#[derive(Clone, Debug)]
pub struct Rectangle {
    pub origin: DVec3,
    pub u: DVec3,
    pub v: DVec3,
    pub normal: DVec3,
    front: Texture,
    back: Texture,
    ambient_occlusion: bool,
    multiplier: f64,
}

impl Rectangle {
    pub fn new(
        origin: DVec3,
        u: DVec3,
        v: DVec3,
        normal: DVec3,
        front: Texture,
        back: Texture,
        ambient_occlusion: bool,
    ) -> Self {
        Self {
            origin,
            u,
            v,
            normal,
            front,
            back,
            ambient_occlusion,
            multiplier: BRIGHTNESS_MULTIPLIER,
        }
    }

    pub fn rotated(self, rotation: &ElementRotation) -> Self {
        let turn = |p: DVec3| p.rotate_about(rotation.origin, rotation.axis, rotation.angle);
        let origin = turn(self.origin);
        Self {
            u: turn(self.origin + self.u) - origin,
            v: turn(self.origin + self.v) - origin,
            normal: turn(self.origin + self.normal) - origin,
            origin,
            ..self
        }
    }

    /// Fixes the brightness multiplier against the camera's right vector. Called once, after
    /// every rotation has been applied.
    pub fn shade(&mut self, camera_right: DVec3) {
        self.multiplier = if self.ambient_occlusion {
            let dif = self.normal.dot(camera_right).clamp(-1.0, 1.0).acos() % PI;
            if dif < FRAC_PI_2 {
                dif / PI + DARKNESS_MULTIPLIER
            } else {
                BRIGHTNESS_MULTIPLIER
            }
        } else {
            BRIGHTNESS_MULTIPLIER
        };
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn trace(&self, ray: &Ray, camera_forward: DVec3) -> Option<Intersection> {
        let denom = self.normal.dot(ray.direction);
        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        if !t.is_finite() || t <= 0.0 {
            return None;
        }

        let rel = ray.at(t) - self.origin;
        let u = rel.dot(self.u) / self.u.length_squared();
        let v = rel.dot(self.v) / self.v.length_squared();
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        let (texture, mirrored) = if self.normal.dot(camera_forward) < 0.0 {
            (&self.front, false)
        } else {
            (&self.back, true)
        };
        let w = f64::from(texture.width());
        let h = f64::from(texture.height());
        let tex_x = if mirrored { w - u * w } else { u * w };
        let tex_x = (tex_x as u32).min(texture.width() - 1);
        let tex_y = ((h - v * h) as u32).min(texture.height() - 1);

        Some(Intersection {
            t,
            color: *texture.get_pixel(tex_x, tex_y),
            multiplier: self.multiplier,
        })
    }
}

/// Stretch that keeps 22.5° and 45° rotated elements covering their original footprint.
fn rescale_factor(angle: f64) -> f64 {
    if angle.abs() == 22.5 {
        1.0 / FRAC_PI_8.cos()
    } else {
        1.0 / FRAC_PI_4.cos()
    }
}

/// A model element placed in world space: six faces, or one double-sided face when the
/// element has no thickness along some axis.
#[derive(Clone, Debug)]
pub struct Cuboid {
    pub origin: DVec3,
    pub size: DVec3,
    rectangles: SmallVec<[Rectangle; 6]>,
}

impl Cuboid {
    /// Places `element` in world space. `scale` and `translation` come from the model's display
    /// transform; the element's own rotation is applied here.
    pub fn from_element(
        element: &Element,
        scale: DVec3,
        translation: DVec3,
        ambient_occlusion: bool,
    ) -> Self {
        let mut origin = element.from * scale + translation;
        let mut size = (element.to - element.from) * scale;
        let rotation = element.rotation.map(|r| ElementRotation {
            origin: r.origin * scale + translation,
            ..r
        });

        if let Some(r) = rotation
            && r.rescale
        {
            let factor = rescale_factor(r.angle);
            let mut stretched = size * factor;
            stretched[r.axis.index()] = size[r.axis.index()];
            origin -= (stretched - size) / 2.0;
            size = stretched;
        }

        let ao = ambient_occlusion && !rotation.is_some_and(|r| r.is_rotated());
        let face = |d: Direction| element.face(d).clone();
        let rect = |o: DVec3, u: DVec3, v: DVec3, d: Direction, front: Direction, back: Direction| {
            Rectangle::new(origin + o, u, v, d.normal(), face(front), face(back), ao)
        };
        let (sx, sy, sz) = (size.x, size.y, size.z);

        let mut rectangles: SmallVec<[Rectangle; 6]> = if sx == 0.0 {
            smallvec::smallvec![rect(
                DVec3::ZERO,
                DVec3::new(0.0, 0.0, sz),
                DVec3::new(0.0, sy, 0.0),
                Direction::West,
                Direction::West,
                Direction::East,
            )]
        } else if sy == 0.0 {
            smallvec::smallvec![rect(
                DVec3::new(0.0, sy, sz),
                DVec3::new(sx, 0.0, 0.0),
                DVec3::new(0.0, 0.0, -sz),
                Direction::Up,
                Direction::Up,
                Direction::Down,
            )]
        } else if sz == 0.0 {
            smallvec::smallvec![rect(
                DVec3::new(sx, 0.0, 0.0),
                DVec3::new(-sx, 0.0, 0.0),
                DVec3::new(0.0, sy, 0.0),
                Direction::North,
                Direction::North,
                Direction::South,
            )]
        } else {
            let single = |o: DVec3, u: DVec3, v: DVec3, d: Direction| rect(o, u, v, d, d, d);
            smallvec::smallvec![
                single(
                    DVec3::new(sx, 0.0, 0.0),
                    DVec3::new(-sx, 0.0, 0.0),
                    DVec3::new(0.0, sy, 0.0),
                    Direction::North,
                ),
                single(
                    DVec3::new(sx, 0.0, sz),
                    DVec3::new(0.0, 0.0, -sz),
                    DVec3::new(0.0, sy, 0.0),
                    Direction::East,
                ),
                single(
                    DVec3::new(0.0, 0.0, sz),
                    DVec3::new(sx, 0.0, 0.0),
                    DVec3::new(0.0, sy, 0.0),
                    Direction::South,
                ),
                single(
                    DVec3::ZERO,
                    DVec3::new(0.0, 0.0, sz),
                    DVec3::new(0.0, sy, 0.0),
                    Direction::West,
                ),
                single(
                    DVec3::new(0.0, sy, sz),
                    DVec3::new(sx, 0.0, 0.0),
                    DVec3::new(0.0, 0.0, -sz),
                    Direction::Up,
                ),
                single(
                    DVec3::ZERO,
                    DVec3::new(sx, 0.0, 0.0),
                    DVec3::new(0.0, 0.0, sz),
                    Direction::Down,
                ),
            ]
        };

        if let Some(r) = rotation {
            rectangles = rectangles.into_iter().map(|rect| rect.rotated(&r)).collect();
        }

        Self {
            origin,
            size,
            rectangles,
        }
    }

    /// Whole-object rotation applied on top of the element's own rotation.
    pub fn rotated(self, rotation: &ElementRotation) -> Self {
        Self {
            rectangles: self
                .rectangles
                .into_iter()
                .map(|rect| rect.rotated(rotation))
                .collect(),
            ..self
        }
    }

    pub fn shade(&mut self, camera_right: DVec3) {
        for rect in &mut self.rectangles {
            rect.shade(camera_right);
        }
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// Nearest hit among this cuboid's faces.
    pub fn trace(&self, ray: &Ray, camera_forward: DVec3) -> Option<Intersection> {
        self.rectangles
            .iter()
            .filter_map(|rect| rect.trace(ray, camera_forward))
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
