use glam::DVec3;

use crate::foundation::core::Canvas;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Pinhole camera with one precomputed primary ray per output pixel.
#[derive(Clone, Debug)]
pub struct Camera {
    pub origin: DVec3,
    pub forward: DVec3,
    pub right: DVec3,
    pub up: DVec3,
    /// Horizontal half-extent of the image plane at unit distance.
    pub w: f64,
    /// Vertical half-extent of the image plane at unit distance.
    pub h: f64,
    canvas: Canvas,
    rays: Vec<Ray>,
}

impl Camera {
    /// `fov` is in degrees; the half-height of the image plane is `tan(fov)`.
    pub fn look_at(origin: DVec3, target: DVec3, up: DVec3, fov: f64, canvas: Canvas) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        let h = fov.to_radians().tan();
        let w = h * canvas.aspect_ratio();

        let mut camera = Self {
            origin,
            forward,
            right,
            up,
            w,
            h,
            canvas,
            rays: Vec::new(),
        };
        let rays = (0..canvas.height)
            .flat_map(|y| (0..canvas.width).map(move |x| (x, y)))
            .map(|(x, y)| camera.make_ray(x, y))
            .collect();
        camera.rays = rays;
        camera
    }

    fn make_ray(&self, x: u32, y: u32) -> Ray {
        let width = f64::from(self.canvas.width);
        let height = f64::from(self.canvas.height);
        let ndc_x = 2.0 * f64::from(x) / width - 1.0;
        let ndc_y = 2.0 * (height - f64::from(y)) / height - 1.0;
        let direction =
            (self.forward + self.right * self.w * ndc_x + self.up * self.h * ndc_y).normalize();
        Ray {
            origin: self.origin,
            direction,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Primary ray through pixel `(x, y)`, `y` counted from the top row.
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        self.rays[y as usize * self.canvas.width as usize + x as usize]
    }

    /// All rays of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[Ray] {
        let w = self.canvas.width as usize;
        let start = y as usize * w;
        &self.rays[start..start + w]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
